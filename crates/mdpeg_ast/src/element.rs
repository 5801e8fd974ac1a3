//! Element node definitions.
//!
//! An [`Element`] is a node of an intrusive singly linked tree: it points to
//! its first child and to its next sibling. All links are stored in
//! [`Cell`]s so that elements can be re-keyed and relinked through the
//! shared `&'a Element<'a>` references handed out by the arena.

use std::cell::Cell;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::ElementKind;

/// Payload carried by an element.
#[derive(Debug, Clone, Copy, Default)]
pub enum Contents<'a> {
    /// Pure container, no payload.
    #[default]
    None,
    /// Literal text (strings, code, raw HTML, footnote labels).
    Text(&'a str),
    /// Link target (links, images, reference declarations).
    Link(&'a Link<'a>),
}

/// Link record shared by links, images and reference declarations.
#[derive(Debug, Clone, Copy)]
pub struct Link<'a> {
    /// Inline elements making up the link text.
    pub label: Option<&'a Element<'a>>,
    /// Target URL.
    pub url: &'a str,
    /// Title, empty when absent.
    pub title: &'a str,
}

impl<'a> Link<'a> {
    /// Returns an iterator over the label elements.
    pub fn label(&self) -> Siblings<'a> {
        Siblings::new(self.label)
    }
}

/// A node of the markdown element tree.
#[derive(Debug)]
pub struct Element<'a> {
    kind: Cell<ElementKind>,
    contents: Cell<Contents<'a>>,
    children: Cell<Option<&'a Element<'a>>>,
    next: Cell<Option<&'a Element<'a>>>,
}

impl<'a> Element<'a> {
    /// Creates an element with no payload, children or siblings.
    #[inline]
    pub const fn new(kind: ElementKind) -> Self {
        Self {
            kind: Cell::new(kind),
            contents: Cell::new(Contents::None),
            children: Cell::new(None),
            next: Cell::new(None),
        }
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind.get()
    }

    #[inline]
    pub fn set_kind(&self, kind: ElementKind) {
        self.kind.set(kind);
    }

    #[inline]
    pub fn contents(&self) -> Contents<'a> {
        self.contents.get()
    }

    #[inline]
    pub fn set_contents(&self, contents: Contents<'a>) {
        self.contents.set(contents);
    }

    /// Returns the text payload, if any.
    pub fn text(&self) -> Option<&'a str> {
        match self.contents.get() {
            Contents::Text(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub fn set_text(&self, text: &'a str) {
        self.contents.set(Contents::Text(text));
    }

    /// Returns the link record, if any.
    pub fn link(&self) -> Option<&'a Link<'a>> {
        match self.contents.get() {
            Contents::Link(link) => Some(link),
            _ => None,
        }
    }

    #[inline]
    pub fn first_child(&self) -> Option<&'a Element<'a>> {
        self.children.get()
    }

    #[inline]
    pub fn set_children(&self, children: Option<&'a Element<'a>>) {
        self.children.set(children);
    }

    #[inline]
    pub fn next_sibling(&self) -> Option<&'a Element<'a>> {
        self.next.get()
    }

    #[inline]
    pub fn set_next(&self, next: Option<&'a Element<'a>>) {
        self.next.set(next);
    }

    /// Returns an iterator over the children of this element.
    pub fn children(&self) -> Siblings<'a> {
        Siblings::new(self.children.get())
    }

    /// Concatenates the text of every descendant, link labels included.
    pub fn plain_text(&'a self) -> String {
        crate::visitor::collect_text(self)
    }
}

/// Iterator over an element and the siblings following it.
#[derive(Debug, Clone, Copy)]
pub struct Siblings<'a> {
    next: Option<&'a Element<'a>>,
}

impl<'a> Siblings<'a> {
    /// Starts iterating at `head`.
    pub const fn new(head: Option<&'a Element<'a>>) -> Self {
        Self { next: head }
    }
}

impl<'a> Iterator for Siblings<'a> {
    type Item = &'a Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next_sibling();
        Some(current)
    }
}

impl Serialize for Element<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let contents = self.contents();
        let has_children = self.first_child().is_some();
        let len = 1
            + match contents {
                Contents::None => 0,
                Contents::Text(_) => 1,
                Contents::Link(_) => 3,
            }
            + usize::from(has_children);

        let mut state = serializer.serialize_struct("Element", len)?;
        state.serialize_field("kind", &self.kind())?;
        match contents {
            Contents::None => {}
            Contents::Text(text) => state.serialize_field("text", text)?,
            Contents::Link(link) => {
                state.serialize_field("url", link.url)?;
                state.serialize_field("title", link.title)?;
                state.serialize_field("label", &link.label())?;
            }
        }
        if has_children {
            state.serialize_field("children", &self.children())?;
        }
        state.end()
    }
}

impl Serialize for Siblings<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AstArena;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_element_is_empty() {
        let element = Element::new(ElementKind::Para);
        assert_eq!(element.kind(), ElementKind::Para);
        assert!(element.text().is_none());
        assert!(element.link().is_none());
        assert!(element.first_child().is_none());
        assert!(element.next_sibling().is_none());
    }

    #[test]
    fn test_rekey_through_shared_reference() {
        let arena = AstArena::new();
        let element = arena.element(ElementKind::List);
        let alias: &Element<'_> = element;
        alias.set_kind(ElementKind::BulletList);
        assert_eq!(element.kind(), ElementKind::BulletList);
    }

    #[test]
    fn test_children_iterates_in_link_order() {
        let arena = AstArena::new();
        let first = arena.string("a");
        let second = arena.string("b");
        first.set_next(Some(second));
        let parent = arena.element(ElementKind::Para);
        parent.set_children(Some(first));

        let texts: Vec<_> = parent.children().filter_map(Element::text).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_serialize_text_element() {
        let arena = AstArena::new();
        let element = arena.string("hello");
        let json = serde_json::to_value(element).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "Str", "text": "hello" }));
    }

    #[test]
    fn test_serialize_link_element() {
        let arena = AstArena::new();
        let label = arena.string("home");
        let link = arena.link(Some(label), "/", "Home page");
        let json = serde_json::to_value(link).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "Link",
                "url": "/",
                "title": "Home page",
                "label": [{ "kind": "Str", "text": "home" }],
            })
        );
    }

    #[test]
    fn test_serialize_nested_children() {
        let arena = AstArena::new();
        let text = arena.string("x");
        let emph = arena.list(ElementKind::Emph, Some(text));
        let para = arena.list(ElementKind::Para, Some(emph));
        let json = serde_json::to_value(para).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "Para",
                "children": [{
                    "kind": "Emph",
                    "children": [{ "kind": "Str", "text": "x" }],
                }],
            })
        );
    }

    #[test]
    fn test_plain_text_includes_link_labels() {
        let arena = AstArena::new();
        let label = arena.string("docs");
        let link = arena.link(Some(label), "/docs", "");
        let before = arena.string("see ");
        before.set_next(Some(link));
        let para = arena.element(ElementKind::Para);
        para.set_children(Some(before));
        assert_eq!(para.plain_text(), "see docs");
    }
}
