//! Characters, whitespace and lines.

use mdpeg_ast::{ElementKind, Span};

use crate::classify::ByteClass;
use crate::machine::{Action, Machine};

impl Machine<'_, '_> {
    pub(super) fn spacechar(&mut self) -> bool {
        self.class(ByteClass::Space)
    }

    pub(super) fn nonspacechar(&mut self) -> bool {
        self.byte_if(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
    }

    /// `\n`, `\r` or `\r\n`.
    pub(super) fn newline(&mut self) -> bool {
        self.byte(b'\n') || (self.byte(b'\r') && self.opt(|m| m.byte(b'\n')))
    }

    pub(super) fn sp(&mut self) -> bool {
        self.star(Self::spacechar)
    }

    /// Spaces with at most one line break among them.
    pub(super) fn spnl(&mut self) -> bool {
        self.sp() && self.opt(|m| m.newline() && m.sp())
    }

    pub(super) fn blank_line(&mut self) -> bool {
        self.seq(|m| m.sp() && m.newline())
    }

    /// Up to three spaces.
    pub(super) fn nonindent_space(&mut self) -> bool {
        self.opt(|m| m.literal("   ") || m.literal("  ") || m.literal(" "))
    }

    pub(super) fn indent(&mut self) -> bool {
        self.literal("    ") || self.byte(b'\t')
    }

    /// A line including its terminator, or the unterminated rest of the
    /// input.
    pub(super) fn raw_line(&mut self) -> Option<Span> {
        self.capture(|m| m.star(|m| m.byte_if(|b| b != b'\r' && b != b'\n')) && m.newline())
            .or_else(|| self.capture(|m| m.plus(Self::any) && m.at_end()))
    }

    /// A raw line as a string element.
    pub(super) fn line(&mut self) -> bool {
        match self.raw_line() {
            Some(span) => self.act_on(Action::Matched(ElementKind::Str), span),
            None => false,
        }
    }

    pub(super) fn indented_line(&mut self) -> bool {
        self.seq(|m| m.indent() && m.line())
    }

    pub(super) fn optionally_indented_line(&mut self) -> bool {
        self.seq(|m| m.opt(Self::indent) && m.line())
    }

    /// Starts an empty list; fails at the end of the input.
    pub(super) fn start_list(&mut self) -> bool {
        self.peek(Self::any) && self.act(Action::Clear)
    }

    /// A character that may begin inline markup.
    pub(super) fn special_char(&mut self) -> bool {
        self.class(ByteClass::Special) || self.extended_special_char()
    }

    fn extended_special_char(&mut self) -> bool {
        let extensions = *self.extensions();
        (extensions.notes && self.byte(b'^'))
            || (extensions.smart && self.byte_if(|b| matches!(b, b'"' | b'\'' | b'-' | b'.')))
    }

    /// Any character that is not whitespace and cannot begin markup.
    pub(super) fn normal_char(&mut self) -> bool {
        self.seq(|m| {
            m.not(|m| m.newline() || m.spacechar() || m.special_char()) && m.any()
        })
    }

    pub(super) fn alphanumeric(&mut self) -> bool {
        self.class(ByteClass::Alphanumeric)
    }

    pub(super) fn whitespace(&mut self) -> bool {
        self.spacechar() || self.newline()
    }
}
