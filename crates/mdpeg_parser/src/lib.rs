//! # mdpeg_parser
//!
//! Backtracking PEG parser for markdown.
//!
//! This crate provides:
//! - A `Parser` trait for implementing document parsers
//! - A markdown parser with optional syntax extensions (tables, footnotes,
//!   definition lists, typographic punctuation, HTML filtering)
//! - Byte classes used by the grammar
//!
//! ## Architecture
//!
//! Grammar rules are methods of a matching machine that walks the input
//! with ordered choice and unlimited backtracking. Rules never build
//! elements while they match: they queue deferred actions, which are
//! replayed once the outermost rule succeeds. Abandoned alternatives thus
//! leave no trace in the tree.
//!
//! Link references and footnotes may be used before they are declared.
//! Two pre-passes collect the declarations before the main parse.
//!
//! ## Example
//!
//! ```rust
//! use mdpeg_ast::{AstArena, ElementKind};
//! use mdpeg_parser::{parse, Extensions};
//!
//! let arena = AstArena::new();
//! let source = "# Hello\n\nThis is a [paragraph][].\n\n[paragraph]: /para\n";
//!
//! let root = parse(&arena, source, Extensions::default()).unwrap();
//! let kinds: Vec<_> = root.children().map(|block| block.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     [ElementKind::H1, ElementKind::Para, ElementKind::Reference]
//! );
//! ```

pub mod classify;
mod config;
mod context;
mod error;
mod grammar;
mod machine;
mod markdown;
mod resolver;
mod traits;

use mdpeg_ast::{AstArena, Element};

pub use classify::{classify, ByteClass};
pub use config::Extensions;
pub use error::{ConfigError, ParseError};
pub use markdown::MarkdownParser;
pub use traits::Parser;

/// Parses `source` with the given extensions.
///
/// Shorthand for [`MarkdownParser::new`] followed by [`Parser::parse`].
pub fn parse<'a>(
    arena: &'a AstArena,
    source: &str,
    extensions: Extensions,
) -> Result<&'a Element<'a>, ParseError> {
    MarkdownParser::new(extensions).parse(arena, source)
}
