//! Integration tests for whole-document parsing.
//!
//! These tests go through the public API only: preformatting, the
//! declaration pre-passes, the document rule and raw block expansion.

use mdpeg_ast::{dump, AstArena, ElementKind};
use mdpeg_parser::{parse, ConfigError, Extensions, MarkdownParser, Parser};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn parse_dump(source: &str, extensions: Extensions) -> String {
    let arena = AstArena::new();
    let root = parse(&arena, source, extensions).expect("document should parse");
    dump(root)
}

#[rstest]
#[case("")]
#[case("\n")]
#[case("   \n\n\t\n")]
fn test_blank_input_has_no_blocks(#[case] source: &str) {
    let arena = AstArena::new();
    let root = parse(&arena, source, Extensions::default()).unwrap();
    assert_eq!(root.kind(), ElementKind::Document);
    assert!(root.first_child().is_none());
}

#[test]
fn test_paragraphs_in_order() {
    let arena = AstArena::new();
    let root = parse(&arena, "a\n\npara2\n\npara3\n", Extensions::default()).unwrap();

    let texts: Vec<_> = root
        .children()
        .map(|block| (block.kind(), block.plain_text()))
        .collect();
    assert_eq!(
        texts,
        [
            (ElementKind::Para, "a".to_string()),
            (ElementKind::Para, "para2".to_string()),
            (ElementKind::Para, "para3".to_string()),
        ]
    );
}

#[test]
fn test_setext_needs_underline() {
    insta::assert_snapshot!(parse_dump("Title\nNotUnderline\n", Extensions::default()), @r###"
    Document
      Para
        Str "Title"
        Space "\n"
        Str "NotUnderline"
    "###);
}

#[test]
fn test_reference_declared_after_use() {
    let source = "[foo][]\n\n[foo]: /url \"Title\"\n";
    insta::assert_snapshot!(parse_dump(source, Extensions::default()), @r###"
    Document
      Para
        Link url="/url" title="Title"
          Str "foo"
      Reference url="/url" title="Title"
        Str "foo"
    "###);
}

#[test]
fn test_undeclared_reference_stays_text() {
    insta::assert_snapshot!(parse_dump("[bar][]\n", Extensions::default()), @r###"
    Document
      Para
        List
          Str "["
          List
            Str "bar"
          Str "]"
          Str "[]"
    "###);
}

#[test]
fn test_tight_list_items_are_plain() {
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
fn test_loose_list_items_are_paragraphs() {
    insta::assert_snapshot!(parse_dump("- a\n\n- b\n", Extensions::default()), @r###"
    Document
      BulletList
        ListItem
          List
            Para
              Str "a"
        ListItem
          List
            Para
              Str "b"
    "###);
}

#[test]
fn test_pipe_table() {
    let source = "| a | b |\n|---|--:|\n| 1 | 2 |\n";
    insta::assert_snapshot!(parse_dump(source, "tables".parse().unwrap()), @r###"
    Document
      Table
        TableSeparator "lr"
        TableHead
          TableRow
            TableCell
              Str "a"
            TableCell
              Str "b"
        TableBody
          TableRow
            TableCell
              Str "1"
            TableCell
              Str "2"
    "###);
}

#[test]
fn test_pipe_table_disabled() {
    let arena = AstArena::new();
    let root = parse(&arena, "| a |\n|---|\n", Extensions::default()).unwrap();
    let kinds: Vec<_> = root.children().map(|block| block.kind()).collect();
    assert_eq!(kinds, [ElementKind::Para]);
}

#[test]
fn test_footnote_reference_is_expanded() {
    let source = "Text[^n].\n\n[^n]: The note.\n";
    insta::assert_snapshot!(parse_dump(source, "notes".parse().unwrap()), @r###"
    Document
      Para
        Str "Text"
        Note ""
          List
            Para
              Str "The"
              Space " "
              Str "note."
        Str "."
      Note "n"
        List
          Para
            Str "The"
            Space " "
            Str "note."
    "###);
}

#[test]
fn test_definition_list() {
    let source = "Apple\n: A fruit.\n";
    insta::assert_snapshot!(parse_dump(source, "dlists".parse().unwrap()), @r###"
    Document
      DefinitionList
        List
          DefTitle
            Str "Apple"
          List
            DefData
              List
                Plain
                  Str "A"
                  Space " "
                  Str "fruit."
    "###);
}

#[test]
fn test_smart_punctuation() {
    insta::assert_snapshot!(parse_dump("a---b c...\n\n", "smart".parse().unwrap()), @r###"
    Document
      Para
        Str "a"
        EmDash
        Str "b"
        Space " "
        Str "c"
        Ellipsis
    "###);
}

#[test]
fn test_tree_serializes_to_json() {
    let arena = AstArena::new();
    let root = parse(&arena, "[x](/u)\n\n", Extensions::default()).unwrap();

    let value = serde_json::to_value(root).unwrap();
    assert_eq!(
        value,
        json!({
            "kind": "Document",
            "children": [{
                "kind": "Para",
                "children": [{
                    "kind": "Link",
                    "url": "/u",
                    "title": "",
                    "label": [{ "kind": "Str", "text": "x" }],
                }],
            }],
        })
    );
}

#[test]
fn test_parser_trait_object() {
    let parsers: Vec<Box<dyn Parser>> = vec![Box::new(MarkdownParser::new(Extensions::all()))];
    let parser = parsers
        .iter()
        .find(|parser| parser.can_parse("markdown"))
        .unwrap();

    let arena = AstArena::new();
    let root = parser.parse(&arena, "# Hi\n").unwrap();
    assert_eq!(root.first_child().map(|block| block.kind()), Some(ElementKind::H1));
}

#[rstest]
#[case("tables, notes", Extensions { tables: true, notes: true, ..Extensions::new() })]
#[case("", Extensions::new())]
#[case("filterHTML,filterStyles", Extensions { filter_html: true, filter_styles: true, ..Extensions::new() })]
fn test_extensions_from_names(#[case] names: &str, #[case] expected: Extensions) {
    assert_eq!(names.parse::<Extensions>().unwrap(), expected);
}

#[test]
fn test_unknown_extension_is_rejected() {
    let err = "tables,footnotes".parse::<Extensions>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownOption(ref name) if name == "footnotes"));
    assert!(Extensions::from_json(r#"{ "footnotes": true }"#).is_err());
}
