//! Paragraphs, headings, block quotes, code blocks and rules.

use mdpeg_ast::ElementKind;

use crate::machine::{Action, Machine, Slot};

const LIST: Slot = Slot::new(1);

const LEVEL: Slot = Slot::new(1);
const INLINES: Slot = Slot::new(2);

impl Machine<'_, '_> {
    pub(super) fn para(&mut self) -> bool {
        self.seq(|m| {
            m.nonindent_space()
                && m.inlines()
                && m.plus(Self::blank_line)
                && m.act(Action::SetKind(ElementKind::Para))
        })
    }

    /// Inline text not followed by a blank line.
    pub(super) fn plain(&mut self) -> bool {
        self.inlines() && self.act(Action::SetKind(ElementKind::Plain))
    }

    /// One to six `#`, yielding an empty heading of that level.
    pub(super) fn atx_start(&mut self) -> bool {
        if !self.peek_byte(b'#') {
            return false;
        }
        let span = self.capture(|m| {
            ["######", "#####", "####", "###", "##", "#"]
                .iter()
                .any(|marker| m.literal(marker))
        });
        match span {
            Some(span) => self.act_on(Action::AtxStart, span),
            None => false,
        }
    }

    fn atx_inline(&mut self) -> bool {
        self.seq(|m| {
            m.not(Self::newline)
                && m.not(|m| {
                    m.sp() && m.star(|m| m.byte(b'#')) && m.sp() && m.newline()
                })
                && m.inline()
        })
    }

    fn atx_heading(&mut self) -> bool {
        self.seq(|m| {
            m.push(2)
                && m.atx_start()
                && m.set(LEVEL)
                && m.sp()
                && m.start_list()
                && m.plus(|m| m.atx_inline() && m.act(Action::Cons(INLINES)))
                && m.opt(|m| m.sp() && m.star(|m| m.byte(b'#')) && m.sp())
                && m.newline()
                && m.act(Action::AtxHeading {
                    level: LEVEL,
                    inlines: INLINES,
                })
                && m.pop(2)
        })
    }

    /// A line of `marker` characters underlining a setext heading.
    pub(super) fn setext_bottom(&mut self, marker: u8) -> bool {
        self.seq(|m| m.plus(|m| m.byte(marker)) && m.newline())
    }

    fn setext_heading(&mut self, marker: u8, kind: ElementKind) -> bool {
        self.seq(|m| {
            m.peek(|m| m.raw_line().is_some() && m.setext_bottom(marker))
                && m.push(1)
                && m.start_list()
                && m.plus(|m| m.not(Self::endline) && m.inline() && m.act(Action::Cons(LIST)))
                && m.sp()
                && m.newline()
                && m.setext_bottom(marker)
                && m.act(Action::Wrap(kind, LIST))
                && m.pop(1)
        })
    }

    pub(super) fn heading(&mut self) -> bool {
        self.setext_heading(b'=', ElementKind::H1)
            || self.setext_heading(b'-', ElementKind::H2)
            || self.atx_heading()
    }

    /// Quoted lines, kept raw and parsed as blocks later.
    pub(super) fn block_quote(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.block_quote_raw()
                && m.set(LIST)
                && m.act(Action::BlockQuote(LIST))
                && m.pop(1)
        })
    }

    fn block_quote_raw(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.plus(|m| {
                    m.byte(b'>')
                        && m.opt(|m| m.byte(b' '))
                        && m.line()
                        && m.act(Action::Cons(LIST))
                        && m.star(|m| {
                            m.not(|m| m.byte(b'>'))
                                && m.not(Self::blank_line)
                                && m.line()
                                && m.act(Action::Cons(LIST))
                        })
                        && m.star(|m| m.blank_line() && m.act(Action::ConsLiteral(LIST, "\n")))
                })
                && m.act(Action::Concat {
                    list: LIST,
                    kind: ElementKind::Raw,
                    newline: true,
                })
                && m.pop(1)
        })
    }

    fn nonblank_indented_line(&mut self) -> bool {
        self.not(Self::blank_line) && self.indented_line()
    }

    fn verbatim_chunk(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.star(|m| m.blank_line() && m.act(Action::ConsLiteral(LIST, "\n")))
                && m.plus(|m| m.nonblank_indented_line() && m.act(Action::Cons(LIST)))
                && m.act(Action::Concat {
                    list: LIST,
                    kind: ElementKind::Str,
                    newline: false,
                })
                && m.pop(1)
        })
    }

    /// Indented code.
    pub(super) fn verbatim(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.plus(|m| m.verbatim_chunk() && m.act(Action::Cons(LIST)))
                && m.act(Action::Concat {
                    list: LIST,
                    kind: ElementKind::Verbatim,
                    newline: false,
                })
                && m.pop(1)
        })
    }

    fn rule_of(&mut self, marker: u8) -> bool {
        self.seq(|m| {
            m.byte(marker)
                && m.sp()
                && m.byte(marker)
                && m.sp()
                && m.byte(marker)
                && m.star(|m| m.sp() && m.byte(marker))
        })
    }

    pub(super) fn horizontal_rule(&mut self) -> bool {
        self.seq(|m| {
            m.nonindent_space()
                && (m.rule_of(b'_') || m.rule_of(b'-') || m.rule_of(b'*'))
                && m.sp()
                && m.newline()
                && m.plus(Self::blank_line)
                && m.act(Action::Element(ElementKind::HRule))
        })
    }
}
