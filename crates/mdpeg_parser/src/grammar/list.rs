//! Bullet and ordered lists.
//!
//! Item text is collected raw, with the marker and one level of
//! indentation removed. Tight items are parsed as plain blocks later; a
//! loose item gets a trailing blank line so its content becomes
//! paragraphs. A nested list that follows its parent line without a blank
//! line is split off with the block separator.

use mdpeg_ast::ElementKind;

use crate::classify::ByteClass;
use crate::machine::{Action, Machine, Slot};

const ITEMS: Slot = Slot::new(1);

const ITEM: Slot = Slot::new(1);
const LOOSE_ITEMS: Slot = Slot::new(2);

impl Machine<'_, '_> {
    pub(super) fn bullet(&mut self) -> bool {
        self.seq(|m| {
            m.not(Self::horizontal_rule)
                && m.nonindent_space()
                && m.byte_if(|b| matches!(b, b'-' | b'*' | b'+'))
                && m.plus(Self::spacechar)
        })
    }

    pub(super) fn enumerator(&mut self) -> bool {
        self.seq(|m| {
            m.nonindent_space()
                && m.plus(|m| m.class(ByteClass::Digit))
                && m.byte(b'.')
                && m.plus(Self::spacechar)
        })
    }

    pub(super) fn bullet_list(&mut self) -> bool {
        self.seq(|m| {
            m.peek(Self::bullet)
                && (m.list_tight() || m.list_loose())
                && m.act(Action::SetKind(ElementKind::BulletList))
        })
    }

    pub(super) fn ordered_list(&mut self) -> bool {
        self.seq(|m| {
            m.peek(Self::enumerator)
                && (m.list_tight() || m.list_loose())
                && m.act(Action::SetKind(ElementKind::OrderedList))
        })
    }

    fn list_marker(&mut self) -> bool {
        self.def_marker() || self.bullet() || self.enumerator()
    }

    pub(super) fn list_tight(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.plus(|m| m.list_item_tight() && m.act(Action::Cons(ITEMS)))
                && m.star(Self::blank_line)
                && m.not(Self::list_marker)
                && m.act(Action::Wrap(ElementKind::List, ITEMS))
                && m.pop(1)
        })
    }

    pub(super) fn list_loose(&mut self) -> bool {
        self.seq(|m| {
            m.push(2)
                && m.start_list()
                && m.plus(|m| {
                    m.list_item()
                        && m.set(ITEM)
                        && m.star(Self::blank_line)
                        && m.act(Action::LooseItem {
                            item: ITEM,
                            list: LOOSE_ITEMS,
                        })
                })
                && m.act(Action::Wrap(ElementKind::List, LOOSE_ITEMS))
                && m.pop(2)
        })
    }

    fn list_item(&mut self) -> bool {
        self.seq(|m| {
            m.list_marker()
                && m.push(1)
                && m.start_list()
                && m.list_block()
                && m.act(Action::Cons(ITEMS))
                && m.star(|m| m.list_continuation_block() && m.act(Action::Cons(ITEMS)))
                && m.act(Action::ListItem(ITEMS))
                && m.pop(1)
        })
    }

    fn list_item_tight(&mut self) -> bool {
        self.seq(|m| {
            m.list_marker()
                && m.push(1)
                && m.start_list()
                && m.list_block()
                && m.act(Action::Cons(ITEMS))
                && m.star(|m| {
                    m.not(Self::blank_line)
                        && m.list_continuation_block()
                        && m.act(Action::Cons(ITEMS))
                })
                && m.not(Self::list_continuation_block)
                && m.act(Action::ListItem(ITEMS))
                && m.pop(1)
        })
    }

    /// The first line of an item and its lazy continuation lines.
    fn list_block(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.not(Self::blank_line)
                && m.line()
                && m.act(Action::Cons(ITEMS))
                && m.star(|m| m.list_block_line() && m.act(Action::Cons(ITEMS)))
                && m.act(Action::Concat {
                    list: ITEMS,
                    kind: ElementKind::Str,
                    newline: false,
                })
                && m.pop(1)
        })
    }

    /// Indented blocks inside an item, after optional blank lines.
    fn list_continuation_block(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && match m.capture(|m| m.star(Self::blank_line)) {
                    Some(span) => m.act_on(Action::ConsSeparator(ITEMS), span),
                    None => false,
                }
                && m.plus(|m| m.indent() && m.list_block() && m.act(Action::Cons(ITEMS)))
                && m.act(Action::Concat {
                    list: ITEMS,
                    kind: ElementKind::Str,
                    newline: false,
                })
                && m.pop(1)
        })
    }

    fn list_block_line(&mut self) -> bool {
        self.seq(|m| {
            m.not(Self::blank_line)
                && m.not(|m| {
                    m.def_marker()
                        || m.seq(|m| m.opt(Self::indent) && (m.bullet() || m.enumerator()))
                })
                && m.not(Self::horizontal_rule)
                && m.optionally_indented_line()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::tests::blocks;
    use crate::Extensions;

    #[test]
    fn test_tight_bullet_list() {
        insta::assert_snapshot!(blocks("- a\n- b\n\n", Extensions::default()), @r###"
        Document
          BulletList
            ListItem
              Raw "a\n"
            ListItem
              Raw "b\n"
        "###);
    }

    #[test]
    fn test_loose_items_end_with_blank_line() {
        insta::assert_snapshot!(blocks("1. a\n\n2. b\n\n", Extensions::default()), @r###"
        Document
          OrderedList
            ListItem
              Raw "a\n\n\n"
            ListItem
              Raw "b\n\n\n"
        "###);
    }

    #[test]
    fn test_nested_list_is_separated() {
        insta::assert_snapshot!(blocks("- a\n    - b\n\n", Extensions::default()), @r###"
        Document
          BulletList
            ListItem
              Raw "a\n\u{1}- b\n"
        "###);
    }

    #[test]
    fn test_indented_marker_starts_list() {
        insta::assert_snapshot!(blocks(" - a\n - b\n\n", Extensions::default()), @r###"
        Document
          BulletList
            ListItem
              Raw "a\n"
            ListItem
              Raw "b\n"
        "###);
    }
}
