//! Markdown document parser.
//!
//! A parse runs in four steps over one [`ParseContext`]:
//!
//! 1. The input is normalized: tabs are expanded and two newlines appended.
//! 2. The declaration pre-passes fill the reference and footnote tables.
//! 3. The document rule builds the block list.
//! 4. Raw text kept by quotes, list items and footnotes is parsed as nested
//!    documents, with the same tables.

use mdpeg_ast::{list, AstArena, Contents, Element, ElementKind, Siblings};
use tracing::{debug, warn};

use crate::context::ParseContext;
use crate::machine::{BLOCK_SEPARATOR, Rule};
use crate::resolver::collect_declarations;
use crate::{Extensions, ParseError, Parser};

const TAB_STOP: usize = 4;

/// Deepest nesting of raw blocks, such as a list inside a quote inside a
/// list, that is parsed. Deeper raw blocks are left as `Raw` text.
pub(crate) const MAX_RAW_DEPTH: usize = 64;

/// Markdown parser implementation.
///
/// Supports plain markdown plus the syntax extensions enabled in its
/// [`Extensions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser {
    extensions: Extensions,
}

impl MarkdownParser {
    /// Creates a parser accepting the given extensions.
    pub fn new(extensions: Extensions) -> Self {
        Self { extensions }
    }

    /// Returns the enabled extensions.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<&'a Element<'a>, ParseError> {
        let input = arena.alloc_str(&preformat(source));
        debug!(bytes = input.len(), extensions = ?self.extensions, "parsing markdown");

        let ctx = ParseContext::new(arena, self.extensions);
        collect_declarations(&ctx, input)?;

        let blocks = ctx.run(Rule::Document, input)?;
        expand_raw_blocks(&ctx, blocks, 0)?;

        let document = arena.element(ElementKind::Document);
        document.set_children(blocks);
        Ok(document)
    }
}

/// Expands tabs to the next multiple of four columns and terminates the
/// input with a blank line.
fn preformat(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 2);
    let mut column = 0;
    for c in source.chars() {
        match c {
            '\t' => {
                let width = TAB_STOP - column % TAB_STOP;
                out.extend(std::iter::repeat_n(' ', width));
                column += width;
            }
            '\n' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out.push_str("\n\n");
    out
}

/// Replaces every `Raw` element below `elements` by a `List` of the blocks
/// parsed from its text.
fn expand_raw_blocks<'a>(
    ctx: &ParseContext<'a>,
    elements: Option<&'a Element<'a>>,
    depth: usize,
) -> Result<(), ParseError> {
    for element in Siblings::new(elements) {
        if element.kind() == ElementKind::Raw {
            if depth >= MAX_RAW_DEPTH {
                warn!(depth, "raw block nesting too deep, keeping text");
                continue;
            }
            let text = element.text().unwrap_or_default();
            let mut blocks = Vec::new();
            for chunk in text.split(BLOCK_SEPARATOR).filter(|chunk| !chunk.is_empty()) {
                blocks.extend(Siblings::new(ctx.run(Rule::Document, chunk)?));
            }
            debug!(depth, bytes = text.len(), blocks = blocks.len(), "expanded raw block");

            element.set_kind(ElementKind::List);
            element.set_contents(Contents::None);
            element.set_children(list::from_elements(blocks));
            expand_raw_blocks(ctx, element.first_child(), depth + 1)?;
            continue;
        }

        if let Some(link) = element.link() {
            expand_raw_blocks(ctx, link.label, depth)?;
        }
        if element.kind() == ElementKind::Note {
            let outer = ctx.enter_note(true);
            let expanded = expand_raw_blocks(ctx, element.first_child(), depth);
            ctx.enter_note(outer);
            expanded?;
        } else {
            expand_raw_blocks(ctx, element.first_child(), depth)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdpeg_ast::dump;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse_dump(source: &str, extensions: Extensions) -> String {
        let arena = AstArena::new();
        let root = MarkdownParser::new(extensions).parse(&arena, source).unwrap();
        dump(root)
    }

    #[rstest]
    #[case("a\tb", "a   b\n\n")]
    #[case("\tx\n  \ty", "    x\n    y\n\n")]
    #[case("", "\n\n")]
    #[case("é\t|", "é   |\n\n")]
    fn test_preformat(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(preformat(source), expected);
    }

    #[test]
    fn test_parser_name() {
        let parser = MarkdownParser::default();
        assert_eq!(parser.name(), "markdown");
        assert!(parser.can_parse("MD"));
        assert!(!parser.can_parse("txt"));
    }

    #[test]
    fn test_list_items_become_blocks() {
        insta::assert_snapshot!(parse_dump("- a\n- b\n", Extensions::default()), @r###"
        Document
          BulletList
            ListItem
              List
                Plain
                  Str "a"
            ListItem
              List
                Plain
                  Str "b"
        "###);
    }

    #[test]
    fn test_nested_list_chunks() {
        insta::assert_snapshot!(parse_dump("- a\n    - b\n", Extensions::default()), @r###"
        Document
          BulletList
            ListItem
              List
                Plain
                  Str "a"
                BulletList
                  ListItem
                    List
                      Plain
                        Str "b"
        "###);
    }

    #[test]
    fn test_block_quote_is_expanded() {
        insta::assert_snapshot!(parse_dump("> # Title\n> text\n", Extensions::default()), @r###"
        Document
          BlockQuote
            List
              H1
                Str "Title"
              Para
                Str "text"
        "###);
    }

    #[test]
    fn test_self_referencing_note_stays_finite() {
        let extensions = Extensions {
            notes: true,
            ..Extensions::new()
        };
        insta::assert_snapshot!(parse_dump("A[^1]\n\n[^1]: B[^1]\n", extensions), @r###"
        Document
          Para
            Str "A"
            Note ""
              List
                Para
                  Str "B"
                  Str "[^1]"
          Note "1"
            List
              Para
                Str "B"
                Str "[^1]"
        "###);
    }

    #[test]
    fn test_deep_quotes_stop_expanding() {
        let source = format!("{} x\n", ">".repeat(MAX_RAW_DEPTH + 1));
        let arena = AstArena::new();
        let root = MarkdownParser::default().parse(&arena, &source).unwrap();

        let mut depth = 0;
        let mut quote = root.first_child();
        let mut innermost = None;
        while let Some(element) = quote.filter(|e| e.kind() == ElementKind::BlockQuote) {
            depth += 1;
            innermost = element.first_child();
            quote = innermost.and_then(Element::first_child);
        }
        assert_eq!(depth, MAX_RAW_DEPTH + 1);
        assert_eq!(innermost.map(Element::kind), Some(ElementKind::Raw));
    }
}
