//! Element kind definitions.

use serde::{Deserialize, Serialize};

/// The kind of an [`Element`](crate::Element).
///
/// Block kinds describe document structure (paragraphs, lists, tables),
/// inline kinds describe text runs and formatting. A handful of kinds are
/// transient: [`ElementKind::Raw`] only exists until nested block content
/// has been re-parsed, and [`ElementKind::List`] is a plain grouping node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ElementKind {
    /// Root of a parsed document.
    Document,
    /// Anonymous grouping of child elements.
    List,
    /// Unparsed block source awaiting a nested block parse.
    Raw,

    // Inline
    Space,
    LineBreak,
    Ellipsis,
    EmDash,
    EnDash,
    Apostrophe,
    SingleQuoted,
    DoubleQuoted,
    Str,
    Link,
    Image,
    Code,
    Html,
    Emph,
    Strong,

    // Block
    Plain,
    Para,
    ListItem,
    BulletList,
    OrderedList,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    BlockQuote,
    Verbatim,
    HtmlBlock,
    HRule,
    /// Link reference declaration (`[label]: url "title"`).
    Reference,
    /// Footnote, either declared, referenced or inline.
    Note,

    // Tables
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell,
    /// Run of `|` characters closing a cell that spans columns.
    CellSpan,
    TableCaption,
    TableLabel,
    /// Column alignment row, one letter per column.
    TableSeparator,

    // Definition lists
    DefinitionList,
    DefTitle,
    DefData,
}

impl ElementKind {
    /// Returns the heading kind for `level` (1 to 6).
    pub const fn heading(level: usize) -> Option<Self> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    /// Returns the heading level if this is a heading kind.
    pub const fn heading_level(&self) -> Option<u8> {
        match self {
            Self::H1 => Some(1),
            Self::H2 => Some(2),
            Self::H3 => Some(3),
            Self::H4 => Some(4),
            Self::H5 => Some(5),
            Self::H6 => Some(6),
            _ => None,
        }
    }

    /// Returns true if this kind forms a block of the document, or a
    /// structural part of one such as a table cell.
    ///
    /// [`List`](Self::List), [`Raw`](Self::Raw) and [`Note`](Self::Note) are
    /// neither block nor inline: their role depends on their parent. A note
    /// is a block when declared and an inline when referenced.
    pub const fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Document
                | Self::Plain
                | Self::Para
                | Self::ListItem
                | Self::BulletList
                | Self::OrderedList
                | Self::H1
                | Self::H2
                | Self::H3
                | Self::H4
                | Self::H5
                | Self::H6
                | Self::BlockQuote
                | Self::Verbatim
                | Self::HtmlBlock
                | Self::HRule
                | Self::Reference
                | Self::Table
                | Self::TableHead
                | Self::TableBody
                | Self::TableRow
                | Self::TableCell
                | Self::TableCaption
                | Self::TableLabel
                | Self::TableSeparator
                | Self::DefinitionList
                | Self::DefTitle
                | Self::DefData
        )
    }

    /// Returns true if this kind appears inside paragraphs.
    pub const fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::Space
                | Self::LineBreak
                | Self::Ellipsis
                | Self::EmDash
                | Self::EnDash
                | Self::Apostrophe
                | Self::SingleQuoted
                | Self::DoubleQuoted
                | Self::Str
                | Self::Link
                | Self::Image
                | Self::Code
                | Self::Html
                | Self::Emph
                | Self::Strong
                | Self::CellSpan
        )
    }

    /// Returns true if elements of this kind carry a text payload.
    pub const fn has_text(&self) -> bool {
        matches!(
            self,
            Self::Str
                | Self::Space
                | Self::Code
                | Self::Html
                | Self::HtmlBlock
                | Self::Verbatim
                | Self::Raw
                | Self::Note
                | Self::CellSpan
                | Self::TableSeparator
        )
    }

    /// Returns true if elements of this kind carry a link record.
    pub const fn has_link(&self) -> bool {
        matches!(self, Self::Link | Self::Image | Self::Reference)
    }

    /// Returns the kind name as a static string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::List => "List",
            Self::Raw => "Raw",
            Self::Space => "Space",
            Self::LineBreak => "LineBreak",
            Self::Ellipsis => "Ellipsis",
            Self::EmDash => "EmDash",
            Self::EnDash => "EnDash",
            Self::Apostrophe => "Apostrophe",
            Self::SingleQuoted => "SingleQuoted",
            Self::DoubleQuoted => "DoubleQuoted",
            Self::Str => "Str",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::Code => "Code",
            Self::Html => "Html",
            Self::Emph => "Emph",
            Self::Strong => "Strong",
            Self::Plain => "Plain",
            Self::Para => "Para",
            Self::ListItem => "ListItem",
            Self::BulletList => "BulletList",
            Self::OrderedList => "OrderedList",
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
            Self::H5 => "H5",
            Self::H6 => "H6",
            Self::BlockQuote => "BlockQuote",
            Self::Verbatim => "Verbatim",
            Self::HtmlBlock => "HtmlBlock",
            Self::HRule => "HRule",
            Self::Reference => "Reference",
            Self::Note => "Note",
            Self::Table => "Table",
            Self::TableHead => "TableHead",
            Self::TableBody => "TableBody",
            Self::TableRow => "TableRow",
            Self::TableCell => "TableCell",
            Self::CellSpan => "CellSpan",
            Self::TableCaption => "TableCaption",
            Self::TableLabel => "TableLabel",
            Self::TableSeparator => "TableSeparator",
            Self::DefinitionList => "DefinitionList",
            Self::DefTitle => "DefTitle",
            Self::DefData => "DefData",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, ElementKind::H1)]
    #[case(3, ElementKind::H3)]
    #[case(6, ElementKind::H6)]
    fn test_heading_round_trip(#[case] level: usize, #[case] kind: ElementKind) {
        assert_eq!(ElementKind::heading(level), Some(kind));
        assert_eq!(kind.heading_level(), Some(level as u8));
    }

    #[test]
    fn test_heading_out_of_range() {
        assert_eq!(ElementKind::heading(0), None);
        assert_eq!(ElementKind::heading(7), None);
        assert_eq!(ElementKind::Para.heading_level(), None);
    }

    #[test]
    fn test_block_and_inline_are_disjoint() {
        assert!(ElementKind::Para.is_block());
        assert!(!ElementKind::Para.is_inline());
        assert!(ElementKind::Emph.is_inline());
        assert!(!ElementKind::Emph.is_block());
        assert!(!ElementKind::List.is_block());
        assert!(!ElementKind::List.is_inline());
    }

    #[rstest]
    #[case(ElementKind::TableCell, true, false)]
    #[case(ElementKind::TableCaption, true, false)]
    #[case(ElementKind::TableLabel, true, false)]
    #[case(ElementKind::CellSpan, false, true)]
    #[case(ElementKind::Note, false, false)]
    #[case(ElementKind::Raw, false, false)]
    fn test_table_and_positional_kinds(
        #[case] kind: ElementKind,
        #[case] block: bool,
        #[case] inline: bool,
    ) {
        assert_eq!(kind.is_block(), block);
        assert_eq!(kind.is_inline(), inline);
    }

    #[test]
    fn test_payload_kinds() {
        assert!(ElementKind::Str.has_text());
        assert!(ElementKind::Link.has_link());
        assert!(ElementKind::Reference.has_link());
        assert!(!ElementKind::Para.has_text());
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementKind::BulletList.to_string(), "BulletList");
        assert_eq!(ElementKind::HRule.to_string(), "HRule");
    }

    #[test]
    fn test_serialize_pascal_case() {
        let json = serde_json::to_string(&ElementKind::TableCaption).unwrap();
        assert_eq!(json, "\"TableCaption\"");

        let kind: ElementKind = serde_json::from_str("\"DefData\"").unwrap();
        assert_eq!(kind, ElementKind::DefData);
    }
}
