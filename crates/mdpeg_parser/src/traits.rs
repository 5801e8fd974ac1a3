//! Parser trait definition.

use mdpeg_ast::{AstArena, Element};

use crate::ParseError;

/// Trait for parsing source text into an element tree.
///
/// # Example
///
/// ```rust
/// use mdpeg_ast::{AstArena, Element, ElementKind};
/// use mdpeg_parser::{ParseError, Parser};
///
/// struct VerbatimParser;
///
/// impl Parser for VerbatimParser {
///     fn name(&self) -> &str {
///         "verbatim"
///     }
///
///     fn file_extensions(&self) -> &[&str] {
///         &["txt"]
///     }
///
///     fn parse<'a>(
///         &self,
///         arena: &'a AstArena,
///         source: &str,
///     ) -> Result<&'a Element<'a>, ParseError> {
///         let text = arena.string(arena.alloc_str(source));
///         text.set_kind(ElementKind::Verbatim);
///         Ok(arena.list(ElementKind::Document, Some(text)))
///     }
/// }
///
/// let arena = AstArena::new();
/// let root = VerbatimParser.parse(&arena, "as is").unwrap();
/// assert_eq!(root.plain_text(), "as is");
/// assert!(VerbatimParser.can_parse("TXT"));
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["md", "markdown"]`).
    fn file_extensions(&self) -> &[&str];

    /// Parses the source text into an element tree rooted at a
    /// [`Document`](mdpeg_ast::ElementKind::Document) element.
    ///
    /// # Arguments
    ///
    /// * `arena` - The arena owning every element of the tree
    /// * `source` - The source text to parse
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<&'a Element<'a>, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.file_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
