//! Raw HTML blocks, style blocks and inline HTML.

use mdpeg_ast::ElementKind;

use crate::classify::ByteClass;
use crate::machine::{Action, HtmlFilter, Machine};

/// A block-level tag name, matched in all-lower or all-upper case.
#[derive(Debug, Clone, Copy)]
struct BlockTag {
    lower: &'static str,
    upper: &'static str,
    /// Whether a block of this tag may contain a nested block of the same
    /// tag.
    nests: bool,
}

const fn tag(lower: &'static str, upper: &'static str) -> BlockTag {
    BlockTag {
        lower,
        upper,
        nests: true,
    }
}

const fn flat_tag(lower: &'static str, upper: &'static str) -> BlockTag {
    BlockTag {
        lower,
        upper,
        nests: false,
    }
}

const SCRIPT: BlockTag = flat_tag("script", "SCRIPT");
const STYLE: BlockTag = flat_tag("style", "STYLE");

/// Tags opening an HTML block, in matching order.
const BLOCK_TAGS: [BlockTag; 34] = [
    tag("address", "ADDRESS"),
    tag("blockquote", "BLOCKQUOTE"),
    tag("center", "CENTER"),
    tag("dir", "DIR"),
    tag("div", "DIV"),
    tag("dl", "DL"),
    tag("fieldset", "FIELDSET"),
    tag("form", "FORM"),
    tag("h1", "H1"),
    tag("h2", "H2"),
    tag("h3", "H3"),
    tag("h4", "H4"),
    tag("h5", "H5"),
    tag("h6", "H6"),
    tag("menu", "MENU"),
    tag("noframes", "NOFRAMES"),
    tag("noscript", "NOSCRIPT"),
    tag("ol", "OL"),
    tag("p", "P"),
    tag("pre", "PRE"),
    tag("table", "TABLE"),
    tag("ul", "UL"),
    tag("dd", "DD"),
    tag("dt", "DT"),
    tag("frameset", "FRAMESET"),
    tag("li", "LI"),
    tag("tbody", "TBODY"),
    tag("td", "TD"),
    tag("tfoot", "TFOOT"),
    tag("th", "TH"),
    tag("thead", "THEAD"),
    tag("tr", "TR"),
    SCRIPT,
    flat_tag("head", "HEAD"),
];

/// Tags that may appear as a self-closing block, in matching order.
const SELF_CLOSING_TAGS: [BlockTag; 35] = [
    tag("dir", "DIR"),
    tag("div", "DIV"),
    tag("dl", "DL"),
    tag("fieldset", "FIELDSET"),
    tag("form", "FORM"),
    tag("h1", "H1"),
    tag("h2", "H2"),
    tag("h3", "H3"),
    tag("h4", "H4"),
    tag("h5", "H5"),
    tag("h6", "H6"),
    tag("noframes", "NOFRAMES"),
    tag("p", "P"),
    tag("table", "TABLE"),
    tag("dd", "DD"),
    tag("tbody", "TBODY"),
    tag("td", "TD"),
    tag("tfoot", "TFOOT"),
    tag("th", "TH"),
    tag("thead", "THEAD"),
    SCRIPT,
    tag("tr", "TR"),
    tag("li", "LI"),
    tag("frameset", "FRAMESET"),
    tag("dt", "DT"),
    tag("ul", "UL"),
    tag("pre", "PRE"),
    tag("ol", "OL"),
    tag("noscript", "NOSCRIPT"),
    tag("menu", "MENU"),
    tag("isindex", "ISINDEX"),
    tag("hr", "HR"),
    tag("center", "CENTER"),
    tag("blockquote", "BLOCKQUOTE"),
    tag("address", "ADDRESS"),
];

impl Machine<'_, '_> {
    fn tag_name(&mut self, tag: BlockTag) -> bool {
        self.literal(tag.lower) || self.literal(tag.upper)
    }

    fn html_block_open(&mut self, tag: BlockTag) -> bool {
        self.seq(|m| {
            m.byte(b'<')
                && m.spnl()
                && m.tag_name(tag)
                && m.spnl()
                && m.star(Self::html_attribute)
                && m.byte(b'>')
        })
    }

    fn html_block_close(&mut self, tag: BlockTag) -> bool {
        self.seq(|m| {
            m.byte(b'<') && m.spnl() && m.byte(b'/') && m.tag_name(tag) && m.spnl() && m.byte(b'>')
        })
    }

    /// An element from its opening to its matching closing tag.
    fn html_block_in(&mut self, tag: BlockTag) -> bool {
        self.seq(|m| {
            m.html_block_open(tag)
                && m.star(|m| {
                    (tag.nests && m.nested(|m| m.html_block_in(tag)))
                        || m.seq(|m| m.not(|m| m.html_block_close(tag)) && m.any())
                })
                && m.html_block_close(tag)
        })
    }

    fn html_block_in_tags(&mut self) -> bool {
        BLOCK_TAGS.iter().any(|&tag| self.html_block_in(tag))
    }

    fn html_block_type(&mut self) -> bool {
        SELF_CLOSING_TAGS.iter().any(|&tag| self.tag_name(tag))
    }

    fn html_block_self_closing(&mut self) -> bool {
        self.seq(|m| {
            m.byte(b'<')
                && m.spnl()
                && m.html_block_type()
                && m.spnl()
                && m.star(Self::html_attribute)
                && m.byte(b'/')
                && m.spnl()
                && m.byte(b'>')
        })
    }

    pub(super) fn html_block(&mut self) -> bool {
        self.seq(|m| {
            if !m.peek_byte(b'<') {
                return false;
            }
            let block = m.capture(|m| {
                m.html_block_in_tags() || m.html_comment() || m.html_block_self_closing()
            });
            match block {
                Some(span) => {
                    m.plus(Self::blank_line)
                        && m.act_on(Action::Html(HtmlFilter::Html, ElementKind::HtmlBlock), span)
                }
                None => false,
            }
        })
    }

    fn in_style_tags(&mut self) -> bool {
        self.seq(|m| {
            m.html_block_open(STYLE)
                && m.star(|m| m.not(|m| m.html_block_close(STYLE)) && m.any())
                && m.html_block_close(STYLE)
        })
    }

    pub(super) fn style_block(&mut self) -> bool {
        self.seq(|m| match m.capture(Self::in_style_tags) {
            Some(span) => {
                m.star(Self::blank_line)
                    && m.act_on(Action::Html(HtmlFilter::Styles, ElementKind::HtmlBlock), span)
            }
            None => false,
        })
    }

    /// Inline HTML: a comment, a script element or any single tag.
    pub(super) fn raw_html(&mut self) -> bool {
        let span = self.capture(|m| {
            m.html_comment() || m.html_block_in(SCRIPT) || m.html_tag()
        });
        match span {
            Some(span) => self.act_on(Action::Html(HtmlFilter::Html, ElementKind::Html), span),
            None => false,
        }
    }

    fn html_comment(&mut self) -> bool {
        self.seq(|m| {
            m.literal("<!--")
                && m.star(|m| m.not(|m| m.literal("-->")) && m.any())
                && m.literal("-->")
        })
    }

    fn html_tag(&mut self) -> bool {
        self.seq(|m| {
            m.byte(b'<')
                && m.spnl()
                && m.opt(|m| m.byte(b'/'))
                && m.plus(|m| m.class(ByteClass::AlphanumericAscii))
                && m.spnl()
                && m.star(Self::html_attribute)
                && m.opt(|m| m.byte(b'/'))
                && m.spnl()
                && m.byte(b'>')
        })
    }

    fn html_attribute(&mut self) -> bool {
        self.seq(|m| {
            m.plus(|m| m.byte(b'-') || m.class(ByteClass::AlphanumericAscii))
                && m.spnl()
                && m.opt(|m| {
                    m.byte(b'=')
                        && m.spnl()
                        && (m.quoted()
                            || m.plus(|m| m.not(|m| m.byte(b'>')) && m.nonspacechar()))
                })
                && m.spnl()
        })
    }

    fn quoted(&mut self) -> bool {
        [b'"', b'\''].into_iter().any(|quote| {
            self.seq(|m| {
                m.byte(quote) && m.star(|m| m.not(|m| m.byte(quote)) && m.any()) && m.byte(quote)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::tests::blocks;
    use crate::Extensions;

    #[test]
    fn test_nested_block_is_one_element() {
        let input = "<div class=\"outer\">\n<div>inner</div>\n</div>\n\n";
        insta::assert_snapshot!(blocks(input, Extensions::default()), @r###"
        Document
          HtmlBlock "<div class=\"outer\">\n<div>inner</div>\n</div>"
        "###);
    }

    #[test]
    fn test_comment_and_self_closing_blocks() {
        insta::assert_snapshot!(blocks("<!-- note -->\n\n<HR />\n\n", Extensions::default()), @r###"
        Document
          HtmlBlock "<!-- note -->"
          HtmlBlock "<HR />"
        "###);
    }

    #[test]
    fn test_filter_html_drops_blocks_and_inline_html() {
        let extensions = Extensions {
            filter_html: true,
            ..Extensions::new()
        };
        insta::assert_snapshot!(blocks("<p>x</p>\n\na <b>b</b>\n\n", extensions), @r###"
        Document
          List
          Para
            Str "a"
            Space " "
            List
            Str "b"
            List
        "###);
    }

    #[test]
    fn test_style_block_filter() {
        let input = "<style>p { color: red }</style>\n\n";
        insta::assert_snapshot!(blocks(input, Extensions::default()), @r###"
        Document
          HtmlBlock "<style>p { color: red }</style>"
        "###);
        let extensions = Extensions {
            filter_styles: true,
            ..Extensions::new()
        };
        insta::assert_snapshot!(blocks(input, extensions), @r###"
        Document
          List
        "###);
    }

    #[test]
    fn test_nesting_within_limit_is_one_block() {
        let depth = 30;
        let input = format!("{}x{}\n\n", "<div>".repeat(depth), "</div>".repeat(depth));
        let tree = blocks(&input, Extensions::default());
        assert!(tree.starts_with("Document\n  HtmlBlock \"<div><div>"));
        assert_eq!(tree.lines().count(), 2);
    }

    #[test]
    fn test_deeply_nested_blocks_fall_back_to_text() {
        let depth = 10_000;
        let input = format!("{}x{}\n\n", "<div>".repeat(depth), "</div>".repeat(depth));
        let tree = blocks(&input, Extensions::default());
        assert!(tree.starts_with("Document\n  Para\n    Html \"<div>\"\n"));
        assert!(!tree.contains("HtmlBlock"));
    }
}
