//! Markdown grammar.
//!
//! Every rule is a method on [`Machine`] returning whether it matched. A
//! rule that fails leaves the cursor and the thunk queue untouched, so
//! rules compose with `&&` for sequences and `||` for ordered choice.
//! Rules that build a value record actions instead of building it; the
//! value of the last action is the rule's result.
//!
//! Rules that need scratch lists reserve a value stack frame with
//! [`Machine::push`] and address it with [`Slot`] constants declared next
//! to the rule.

mod block;
mod dlist;
mod html;
mod inline;
mod lexical;
mod link;
mod list;
mod note;
mod smart;
mod table;

use crate::machine::{Action, Machine, Slot};

const BLOCKS: Slot = Slot::new(1);

impl Machine<'_, '_> {
    /// `Doc <- StartList (Block)* commit`
    pub(crate) fn document(&mut self) -> bool {
        let start = self.mark();
        let matched = self.push(1)
            && self.start_list()
            && self.star(|m| m.block() && m.act(Action::Cons(BLOCKS)))
            && self.act(Action::Document(BLOCKS))
            && self.pop(1)
            && self.commit(start);
        if !matched {
            self.rewind(start);
        }
        matched
    }

    /// Collects reference declarations, skipping every other block.
    pub(crate) fn references(&mut self) -> bool {
        let start = self.mark();
        let matched = self.push(1)
            && self.start_list()
            && self.star(|m| (m.reference() && m.act(Action::Cons(BLOCKS))) || m.skip_block())
            && self.act(Action::References(BLOCKS))
            && self.pop(1)
            && self.commit(start);
        if !matched {
            self.rewind(start);
        }
        matched
    }

    /// Collects footnote declarations, skipping every other block.
    pub(crate) fn notes(&mut self) -> bool {
        let start = self.mark();
        let matched = self.push(1)
            && self.start_list()
            && self.star(|m| (m.note() && m.act(Action::Cons(BLOCKS))) || m.skip_block())
            && self.act(Action::Notes(BLOCKS))
            && self.pop(1)
            && self.commit(start);
        if !matched {
            self.rewind(start);
        }
        matched
    }

    fn block(&mut self) -> bool {
        self.seq(|m| {
            m.star(Self::blank_line)
                && (m.block_quote()
                    || m.verbatim()
                    || m.note()
                    || m.reference()
                    || m.horizontal_rule()
                    || m.heading()
                    || m.definition_list()
                    || m.ordered_list()
                    || m.bullet_list()
                    || m.html_block()
                    || m.style_block()
                    || (m.extensions().tables && m.table())
                    || m.para()
                    || m.plain())
        })
    }

    /// Consumes one block of any kind without building it.
    fn skip_block(&mut self) -> bool {
        self.html_block()
            || self.seq(|m| {
                m.plus(|m| {
                    m.not(|m| m.byte(b'#'))
                        && m.not(|m| m.setext_bottom(b'='))
                        && m.not(|m| m.setext_bottom(b'-'))
                        && m.not(Self::blank_line)
                        && m.raw_line().is_some()
                }) && m.star(Self::blank_line)
            })
            || self.plus(Self::blank_line)
            || self.raw_line().is_some()
    }
}
