//! Definition lists.
//!
//! Each definition is a `List` holding its titles followed by a list of
//! `DefData` items, which are ordinary list items re-keyed.

use mdpeg_ast::ElementKind;

use crate::machine::{Action, Machine, Slot};

const ITEMS: Slot = Slot::new(1);

impl Machine<'_, '_> {
    pub(super) fn definition_list(&mut self) -> bool {
        self.extensions().dlists
            && self.seq(|m| {
                m.push(1)
                    && m.start_list()
                    && m.plus(|m| m.definition() && m.act(Action::Cons(ITEMS)))
                    && m.act(Action::Wrap(ElementKind::DefinitionList, ITEMS))
                    && m.pop(1)
            })
    }

    fn definition(&mut self) -> bool {
        self.seq(|m| {
            m.peek(|m| {
                m.nonindent_space()
                    && m.not(Self::defmark)
                    && m.nonspacechar()
                    && m.raw_line().is_some()
                    && m.opt(Self::blank_line)
                    && m.defmark()
            }) && m.push(1)
                && m.start_list()
                && m.plus(|m| m.dlist_title() && m.act(Action::Cons(ITEMS)))
                && (m.def_tight() || m.def_loose())
                && m.act(Action::Definition(ITEMS))
                && m.act(Action::Wrap(ElementKind::List, ITEMS))
                && m.pop(1)
        })
    }

    fn dlist_title(&mut self) -> bool {
        self.seq(|m| {
            m.nonindent_space()
                && m.not(Self::defmark)
                && m.peek(Self::nonspacechar)
                && m.push(1)
                && m.start_list()
                && m.plus(|m| m.not(Self::endline) && m.inline() && m.act(Action::Cons(ITEMS)))
                && m.sp()
                && m.newline()
                && m.act(Action::Wrap(ElementKind::DefTitle, ITEMS))
                && m.pop(1)
        })
    }

    fn def_tight(&mut self) -> bool {
        self.seq(|m| m.peek(Self::defmark) && m.list_tight())
    }

    fn def_loose(&mut self) -> bool {
        self.seq(|m| m.blank_line() && m.peek(Self::defmark) && m.list_loose())
    }

    fn defmark(&mut self) -> bool {
        self.seq(|m| {
            m.nonindent_space()
                && m.byte_if(|b| matches!(b, b':' | b'~'))
                && m.plus(Self::spacechar)
        })
    }

    /// A definition marker, when definition lists are enabled.
    pub(super) fn def_marker(&mut self) -> bool {
        self.extensions().dlists && self.defmark()
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::tests::blocks;
    use crate::Extensions;

    fn dlists() -> Extensions {
        Extensions {
            dlists: true,
            ..Extensions::new()
        }
    }

    #[test]
    fn test_tight_definitions() {
        let input = "Apple\n: A fruit.\n: A company.\n\nPear\n: Also a fruit.\n\n";
        insta::assert_snapshot!(blocks(input, dlists()), @r###"
        Document
          DefinitionList
            List
              DefTitle
                Str "Apple"
              List
                DefData
                  Raw "A fruit.\n"
                DefData
                  Raw "A company.\n"
            List
              DefTitle
                Str "Pear"
              List
                DefData
                  Raw "Also a fruit.\n"
        "###);
    }

    #[test]
    fn test_loose_definition() {
        let input = "Term\n\n~ Meaning.\n\n";
        insta::assert_snapshot!(blocks(input, dlists()), @r###"
        Document
          DefinitionList
            List
              DefTitle
                Str "Term"
              List
                DefData
                  Raw "Meaning.\n\n\n"
        "###);
    }

    #[test]
    fn test_definition_syntax_is_para_when_disabled() {
        insta::assert_snapshot!(blocks("Apple\n: A fruit.\n\n", Extensions::default()), @r###"
        Document
          Para
            Str "Apple"
            Space "\n"
            Str ":"
            Space " "
            Str "A"
            Space " "
            Str "fruit."
        "###);
    }
}
