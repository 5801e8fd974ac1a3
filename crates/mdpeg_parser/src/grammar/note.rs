//! Footnotes: references, declarations and inline notes.

use mdpeg_ast::ElementKind;

use crate::machine::{Action, Machine, Slot};

const ITEMS: Slot = Slot::new(1);

const LABEL: Slot = Slot::new(1);
const BLOCKS: Slot = Slot::new(2);

impl Machine<'_, '_> {
    /// `[^label]`, resolved against the collected declarations.
    pub(super) fn note_reference(&mut self) -> bool {
        self.extensions().notes
            && self.seq(|m| {
                m.push(1)
                    && m.raw_note_reference()
                    && m.set(LABEL)
                    && m.act(Action::NoteReference(LABEL))
                    && m.pop(1)
            })
    }

    fn raw_note_reference(&mut self) -> bool {
        let label = self.enclosed(
            |m| m.literal("[^"),
            |m| m.plus(|m| m.not(Self::newline) && m.not(|m| m.byte(b']')) && m.any()),
            |m| m.byte(b']'),
        );
        match label {
            Some(span) => self.act_on(Action::Matched(ElementKind::Str), span),
            None => false,
        }
    }

    /// `[^label]: text`, with indented continuation blocks.
    pub(super) fn note(&mut self) -> bool {
        self.extensions().notes
            && self.seq(|m| {
                m.push(2)
                    && m.nonindent_space()
                    && m.raw_note_reference()
                    && m.set(LABEL)
                    && m.byte(b':')
                    && m.sp()
                    && m.start_list()
                    && m.raw_note_block()
                    && m.act(Action::Cons(BLOCKS))
                    && m.star(|m| {
                        m.peek(Self::indent) && m.raw_note_block() && m.act(Action::Cons(BLOCKS))
                    })
                    && m.act(Action::Note {
                        label: LABEL,
                        blocks: BLOCKS,
                    })
                    && m.pop(2)
            })
    }

    /// `^[inlines]`
    pub(super) fn inline_note(&mut self) -> bool {
        self.extensions().notes
            && self.seq(|m| {
                m.literal("^[")
                    && m.push(1)
                    && m.start_list()
                    && m.plus(|m| {
                        m.not(|m| m.byte(b']')) && m.inline() && m.act(Action::Cons(ITEMS))
                    })
                    && m.byte(b']')
                    && m.act(Action::InlineNote(ITEMS))
                    && m.pop(1)
            })
    }

    /// Lines of a note paragraph plus the blank lines after it, as raw text.
    fn raw_note_block(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.plus(|m| {
                    m.not(Self::blank_line)
                        && m.optionally_indented_line()
                        && m.act(Action::Cons(ITEMS))
                })
                && m.capture_then(Action::ConsMatched(ITEMS), |m| m.star(Self::blank_line))
                && m.act(Action::Concat {
                    list: ITEMS,
                    kind: ElementKind::Raw,
                    newline: true,
                })
                && m.pop(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::tests::{blocks, blocks_with_declarations};
    use crate::Extensions;

    fn notes() -> Extensions {
        Extensions {
            notes: true,
            ..Extensions::new()
        }
    }

    #[test]
    fn test_note_declaration_keeps_raw_blocks() {
        let input = "[^n]: First line\n    lazy\n\n    Second block.\n\n";
        insta::assert_snapshot!(blocks(input, notes()), @r###"
        Document
          Note "n"
            Raw "First line\nlazy\n\n\n"
            Raw "Second block.\n\n\n"
        "###);
    }

    #[test]
    fn test_reference_copies_note_blocks() {
        let input = "Text[^n].\n\n[^n]: The note.\n\n";
        insta::assert_snapshot!(blocks_with_declarations(input, notes()), @r###"
        Document
          Para
            Str "Text"
            Note ""
              Raw "The note.\n\n\n"
            Str "."
          Note "n"
            Raw "The note.\n\n\n"
        "###);
    }

    #[test]
    fn test_unknown_note_reference_is_literal() {
        insta::assert_snapshot!(blocks_with_declarations("See[^x]\n\n", notes()), @r###"
        Document
          Para
            Str "See"
            Str "[^x]"
        "###);
    }

    #[test]
    fn test_inline_note() {
        insta::assert_snapshot!(blocks("Text^[an *aside*]\n\n", notes()), @r###"
        Document
          Para
            Str "Text"
            Note ""
              Str "an"
              Space " "
              Emph
                Str "aside"
        "###);
    }

    #[test]
    fn test_notes_disabled_leaves_text() {
        insta::assert_snapshot!(blocks("a^[b]\n\n", Extensions::default()), @r###"
        Document
          Para
            Str "a^"
            List
              Str "["
              List
                Str "b"
              Str "]"
              Str ""
        "###);
    }
}
