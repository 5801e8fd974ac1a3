//! Per-parse state shared by every pass over one document.

use std::cell::{Cell, OnceCell};

use mdpeg_ast::{AstArena, Element, Siblings};

use crate::machine::{Machine, Rule};
use crate::{Extensions, ParseError};

/// State bundled for one call to the parser.
///
/// The reference and footnote tables are written once by the pre-passes
/// and only read afterwards, including by the nested parses of raw block
/// content.
pub(crate) struct ParseContext<'a> {
    arena: &'a AstArena,
    extensions: Extensions,
    references: OnceCell<Option<&'a Element<'a>>>,
    notes: OnceCell<Option<&'a Element<'a>>>,
    /// Set while the blocks of a footnote are being parsed.
    in_note: Cell<bool>,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(arena: &'a AstArena, extensions: Extensions) -> Self {
        Self {
            arena,
            extensions,
            references: OnceCell::new(),
            notes: OnceCell::new(),
            in_note: Cell::new(false),
        }
    }

    #[inline]
    pub(crate) fn arena(&self) -> &'a AstArena {
        self.arena
    }

    #[inline]
    pub(crate) fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Runs `rule` over `input`, committing its actions.
    pub(crate) fn run(
        &self,
        rule: Rule,
        input: &'a str,
    ) -> Result<Option<&'a Element<'a>>, ParseError> {
        Machine::new(self, input).run(rule)
    }

    pub(crate) fn store_references(&self, list: Option<&'a Element<'a>>) -> Result<(), ParseError> {
        self.references
            .set(list)
            .map_err(|_| ParseError::internal("reference table populated twice"))
    }

    pub(crate) fn store_notes(&self, list: Option<&'a Element<'a>>) -> Result<(), ParseError> {
        self.notes
            .set(list)
            .map_err(|_| ParseError::internal("footnote table populated twice"))
    }

    /// Reference declarations collected so far; empty until the pre-pass
    /// has committed.
    pub(crate) fn references(&self) -> Siblings<'a> {
        Siblings::new(self.references.get().copied().flatten())
    }

    /// Footnote declarations collected so far.
    pub(crate) fn notes(&self) -> Siblings<'a> {
        Siblings::new(self.notes.get().copied().flatten())
    }

    /// Whether the text being parsed belongs to a footnote. Footnotes do
    /// not nest, so references found there stay literal.
    pub(crate) fn in_note(&self) -> bool {
        self.in_note.get()
    }

    /// Marks the text being parsed as footnote content, returning the
    /// previous state.
    pub(crate) fn enter_note(&self, in_note: bool) -> bool {
        self.in_note.replace(in_note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_start_empty() {
        let arena = AstArena::new();
        let ctx = ParseContext::new(&arena, Extensions::default());
        assert_eq!(ctx.references().count(), 0);
        assert_eq!(ctx.notes().count(), 0);
    }

    #[test]
    fn test_tables_are_written_once() {
        let arena = AstArena::new();
        let ctx = ParseContext::new(&arena, Extensions::default());
        let reference = arena.link(None, "/url", "");

        ctx.store_references(Some(reference)).unwrap();
        assert_eq!(ctx.references().count(), 1);

        let err = ctx.store_references(None).unwrap_err();
        assert!(matches!(err, ParseError::Internal(_)));
        assert_eq!(ctx.references().count(), 1);
    }
}
