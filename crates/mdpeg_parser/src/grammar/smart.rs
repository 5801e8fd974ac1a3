//! Typographic punctuation.

use mdpeg_ast::ElementKind;

use crate::classify::ByteClass;
use crate::machine::{Action, Machine, Slot};

const ITEMS: Slot = Slot::new(1);

impl Machine<'_, '_> {
    pub(super) fn smart(&mut self) -> bool {
        self.extensions().smart
            && (self.single_quoted()
                || self.apostrophe()
                || self.double_quoted()
                || self.dash()
                || self.ellipsis())
    }

    fn apostrophe(&mut self) -> bool {
        self.byte(b'\'') && self.act(Action::Element(ElementKind::Apostrophe))
    }

    fn ellipsis(&mut self) -> bool {
        (self.literal("...") || self.literal(". . ."))
            && self.act(Action::Element(ElementKind::Ellipsis))
    }

    fn dash(&mut self) -> bool {
        self.em_dash() || self.en_dash()
    }

    fn em_dash(&mut self) -> bool {
        (self.literal("---") || self.literal("--")) && self.act(Action::Element(ElementKind::EmDash))
    }

    /// A hyphen in a number range.
    fn en_dash(&mut self) -> bool {
        self.seq(|m| {
            m.byte(b'-')
                && m.peek(|m| m.class(ByteClass::Digit))
                && m.act(Action::Element(ElementKind::EnDash))
        })
    }

    fn single_quote_start(&mut self) -> bool {
        self.seq(|m| m.byte(b'\'') && m.not(Self::whitespace))
    }

    fn single_quote_end(&mut self) -> bool {
        self.seq(|m| m.byte(b'\'') && m.not(Self::alphanumeric))
    }

    fn single_quoted(&mut self) -> bool {
        self.seq(|m| {
            m.single_quote_start()
                && m.push(1)
                && m.start_list()
                && m.plus(|m| {
                    m.not(Self::single_quote_end) && m.inline() && m.act(Action::Cons(ITEMS))
                })
                && m.single_quote_end()
                && m.act(Action::Wrap(ElementKind::SingleQuoted, ITEMS))
                && m.pop(1)
        })
    }

    fn double_quoted(&mut self) -> bool {
        self.seq(|m| {
            m.byte(b'"')
                && m.push(1)
                && m.start_list()
                && m.plus(|m| {
                    m.not(|m| m.byte(b'"')) && m.inline() && m.act(Action::Cons(ITEMS))
                })
                && m.byte(b'"')
                && m.act(Action::Wrap(ElementKind::DoubleQuoted, ITEMS))
                && m.pop(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::tests::blocks;
    use crate::Extensions;

    fn smart() -> Extensions {
        Extensions {
            smart: true,
            ..Extensions::new()
        }
    }

    #[test]
    fn test_quotes_and_apostrophes() {
        insta::assert_snapshot!(blocks("\"it's 'so'\"\n\n", smart()), @r###"
        Document
          Para
            DoubleQuoted
              List
                Str "it"
                Apostrophe
                Str "s"
              Space " "
              SingleQuoted
                Str "so"
        "###);
    }

    #[test]
    fn test_dashes_and_ellipsis() {
        insta::assert_snapshot!(blocks("a---b 1-2 c... d\n\n", smart()), @r###"
        Document
          Para
            Str "a"
            EmDash
            Str "b"
            Space " "
            Str "1"
            EnDash
            Str "2"
            Space " "
            Str "c"
            Ellipsis
            Space " "
            Str "d"
        "###);
    }

    #[test]
    fn test_punctuation_is_plain_without_smart() {
        insta::assert_snapshot!(blocks("a--b\n\n", Extensions::default()), @r###"
        Document
          Para
            Str "a--b"
        "###);
    }
}
