//! Inline content: text runs, whitespace, emphasis, code and escapes.

use mdpeg_ast::ElementKind;

use crate::classify::ByteClass;
use crate::machine::{Action, Machine, Slot};

const ITEMS: Slot = Slot::new(1);

impl Machine<'_, '_> {
    /// A run of inlines, yielding a `List`.
    pub(super) fn inlines(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.plus(|m| {
                    (m.not(Self::endline) && m.inline() && m.act(Action::Cons(ITEMS)))
                        || m.seq(|m| {
                            m.endline() && m.peek(Self::inline) && m.act(Action::Cons(ITEMS))
                        })
                })
                && m.opt(Self::endline)
                && m.act(Action::Wrap(ElementKind::List, ITEMS))
                && m.pop(1)
        })
    }

    pub(super) fn inline(&mut self) -> bool {
        self.nested(Self::inline_choice)
    }

    fn inline_choice(&mut self) -> bool {
        self.str()
            || self.endline()
            || self.ul_or_star_line()
            || self.space()
            || self.strong()
            || self.emph()
            || self.image()
            || self.link()
            || self.note_reference()
            || self.inline_note()
            || self.code()
            || self.raw_html()
            || self.entity()
            || self.escaped_char()
            || self.smart()
            || self.symbol()
    }

    /// Plain text; a single chunk stays a bare `Str`.
    pub(super) fn str(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.capture_then(Action::ConsMatched(ITEMS), |m| m.plus(Self::normal_char))
                && m.star(|m| m.str_chunk() && m.act(Action::Cons(ITEMS)))
                && m.act(Action::StrRun(ITEMS))
                && m.pop(1)
        })
    }

    /// Text continuing a run, including intraword underscores.
    fn str_chunk(&mut self) -> bool {
        let chunk = |m: &mut Self| {
            m.plus(|m| {
                m.normal_char()
                    || m.seq(|m| m.plus(|m| m.byte(b'_')) && m.peek(Self::alphanumeric))
            })
        };
        self.capture_then(Action::Matched(ElementKind::Str), chunk) || self.apos_chunk()
    }

    fn apos_chunk(&mut self) -> bool {
        self.extensions().smart
            && self.seq(|m| {
                m.byte(b'\'')
                    && m.peek(Self::alphanumeric)
                    && m.act(Action::Element(ElementKind::Apostrophe))
            })
    }

    fn space(&mut self) -> bool {
        self.plus(Self::spacechar) && self.act(Action::Literal(ElementKind::Space, " "))
    }

    fn escaped_char(&mut self) -> bool {
        self.seq(|m| {
            m.byte(b'\\')
                && m.not(Self::newline)
                && m.capture_then(Action::Matched(ElementKind::Str), |m| {
                    m.class(ByteClass::Escapable)
                })
        })
    }

    /// Hexadecimal, decimal or named character reference, kept as HTML.
    fn entity(&mut self) -> bool {
        self.capture_then(Action::Matched(ElementKind::Html), |m| {
            m.hex_entity() || m.dec_entity() || m.char_entity()
        })
    }

    fn hex_entity(&mut self) -> bool {
        self.seq(|m| {
            m.literal("&#")
                && m.class(ByteClass::HexMarker)
                && m.plus(|m| m.class(ByteClass::HexDigit))
                && m.byte(b';')
        })
    }

    fn dec_entity(&mut self) -> bool {
        self.seq(|m| m.literal("&#") && m.plus(|m| m.class(ByteClass::Digit)) && m.byte(b';'))
    }

    fn char_entity(&mut self) -> bool {
        self.seq(|m| {
            m.byte(b'&') && m.plus(|m| m.class(ByteClass::AlphanumericAscii)) && m.byte(b';')
        })
    }

    pub(super) fn endline(&mut self) -> bool {
        self.line_break() || self.terminal_endline() || self.normal_endline()
    }

    /// A line break that does not end the paragraph.
    fn normal_endline(&mut self) -> bool {
        self.seq(|m| {
            m.sp()
                && m.newline()
                && m.not(Self::blank_line)
                && m.not(|m| m.byte(b'>'))
                && m.not(Self::atx_start)
                && m.not(|m| {
                    m.line()
                        && (m.plus(|m| m.byte(b'-')) || m.plus(|m| m.byte(b'=')))
                        && m.newline()
                })
                && m.act(Action::Literal(ElementKind::Space, "\n"))
        })
    }

    fn terminal_endline(&mut self) -> bool {
        self.seq(|m| m.sp() && m.newline() && m.at_end() && m.act(Action::Clear))
    }

    fn line_break(&mut self) -> bool {
        self.seq(|m| {
            m.literal("  ")
                && m.normal_endline()
                && m.act(Action::Element(ElementKind::LineBreak))
        })
    }

    fn symbol(&mut self) -> bool {
        self.capture_then(Action::Matched(ElementKind::Str), Self::special_char)
    }

    /// Runs of four or more `*` or `_`, or a spaced-out run, kept literally.
    fn ul_or_star_line(&mut self) -> bool {
        self.capture_then(Action::Matched(ElementKind::Str), |m| {
            m.marker_line(b'_') || m.marker_line(b'*')
        })
    }

    fn marker_line(&mut self, marker: u8) -> bool {
        self.seq(|m| (0..4).all(|_| m.byte(marker)) && m.star(|m| m.byte(marker)))
            || self.seq(|m| {
                m.spacechar() && m.plus(|m| m.byte(marker)) && m.peek(Self::spacechar)
            })
    }

    fn emph(&mut self) -> bool {
        self.emph_with(b'*') || self.emph_with(b'_')
    }

    fn emph_with(&mut self, marker: u8) -> bool {
        self.seq(|m| {
            m.byte(marker)
                && m.not(Self::whitespace)
                && m.push(1)
                && m.start_list()
                && m.plus(|m| {
                    ((m.not(|m| m.byte(marker)) && m.inline()) || m.strong_with(marker))
                        && m.act(Action::Cons(ITEMS))
                })
                && m.byte(marker)
                && m.act(Action::Wrap(ElementKind::Emph, ITEMS))
                && m.pop(1)
        })
    }

    fn strong(&mut self) -> bool {
        self.strong_with(b'*') || self.strong_with(b'_')
    }

    fn strong_with(&mut self, marker: u8) -> bool {
        self.seq(|m| {
            m.byte(marker)
                && m.byte(marker)
                && m.not(Self::whitespace)
                && m.push(1)
                && m.start_list()
                && m.plus(|m| {
                    m.not(|m| m.byte(marker) && m.byte(marker))
                        && m.inline()
                        && m.act(Action::Cons(ITEMS))
                })
                && m.byte(marker)
                && m.byte(marker)
                && m.act(Action::Wrap(ElementKind::Strong, ITEMS))
                && m.pop(1)
        })
    }

    /// Exactly `n` backticks.
    fn ticks(&mut self, n: usize) -> bool {
        self.seq(|m| (0..n).all(|_| m.byte(b'`')) && m.not(|m| m.byte(b'`')))
    }

    /// A code span delimited by one to five backticks.
    fn code(&mut self) -> bool {
        (1..=5).any(|n| self.code_with(n))
    }

    fn code_with(&mut self, n: usize) -> bool {
        self.seq(|m| {
            m.ticks(n)
                && m.sp()
                && m.capture_then(Action::Matched(ElementKind::Code), |m| {
                    m.plus(|m| {
                        m.plus(|m| m.not(|m| m.byte(b'`')) && m.nonspacechar())
                            || m.seq(|m| m.not(|m| m.ticks(n)) && m.plus(|m| m.byte(b'`')))
                            || m.seq(|m| {
                                m.not(|m| m.sp() && m.ticks(n))
                                    && (m.seq(|m| m.newline() && m.not(Self::blank_line))
                                        || m.spacechar())
                            })
                    })
                })
                && m.sp()
                && m.ticks(n)
        })
    }
}

#[cfg(test)]
mod tests {
    use mdpeg_ast::AstArena;

    use crate::context::ParseContext;
    use crate::grammar::tests::blocks;
    use crate::machine::{Machine, MAX_NESTING};
    use crate::Extensions;

    #[test]
    fn test_emphasis_and_strong() {
        insta::assert_snapshot!(blocks("*a* __b__ *c **d***\n\n", Extensions::default()), @r###"
        Document
          Para
            Emph
              Str "a"
            Space " "
            Strong
              Str "b"
            Space " "
            Emph
              Str "c"
              Space " "
              Strong
                Str "d"
        "###);
    }

    #[test]
    fn test_intraword_underscore_stays_text() {
        insta::assert_snapshot!(blocks("snake_case_name\n\n", Extensions::default()), @r###"
        Document
          Para
            List
              Str "snake"
              Str "_case_name"
        "###);
    }

    #[test]
    fn test_code_entities_and_escapes() {
        insta::assert_snapshot!(blocks("``a ` b`` &amp; &#x41; \\*\n\n", Extensions::default()), @r###"
        Document
          Para
            Code "a ` b"
            Space " "
            Html "&amp;"
            Space " "
            Html "&#x41;"
            Space " "
            Str "*"
        "###);
    }

    #[test]
    fn test_line_break_and_star_line() {
        insta::assert_snapshot!(blocks("a  \nb ****\n\n", Extensions::default()), @r###"
        Document
          Para
            Str "a"
            LineBreak
            Str "b"
            Space " "
            Str "****"
        "###);
    }

    #[test]
    fn test_unclosed_emphasis_is_literal() {
        insta::assert_snapshot!(blocks("*a\n\n", Extensions::default()), @r###"
        Document
          Para
            Str "*"
            Str "a"
        "###);
    }

    #[test]
    fn test_inline_fails_beyond_nesting_limit() {
        let arena = AstArena::new();
        let ctx = ParseContext::new(&arena, Extensions::default());
        let mut machine = Machine::new(&ctx, "word");

        machine.nesting = MAX_NESTING;
        assert!(!machine.inline());

        machine.nesting = 0;
        assert!(machine.inline());
        assert_eq!(machine.nesting, 0);
    }
}
