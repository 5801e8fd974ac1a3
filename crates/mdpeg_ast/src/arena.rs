//! Arena allocator for AST nodes.
//!
//! Uses `bumpalo` for bump allocation of elements and the strings they
//! reference. Every element of one parse lives in the same arena and is
//! freed together with it; nothing is released individually, so elements
//! abandoned by a backtracking parser simply stay unreferenced.

use bumpalo::Bump;

use crate::element::{Contents, Element, Link};
use crate::list::reverse;
use crate::ElementKind;

/// Arena allocator for AST nodes.
///
/// Besides raw allocation it offers the element constructors used while
/// building a tree: [`element`](Self::element), [`string`](Self::string),
/// [`string_from_list`](Self::string_from_list), [`list`](Self::list) and
/// [`link`](Self::link).
///
/// # Example
///
/// ```rust
/// use mdpeg_ast::{AstArena, ElementKind};
///
/// let arena = AstArena::new();
///
/// let word = arena.string("hello");
/// let para = arena.list(ElementKind::Para, Some(word));
/// assert_eq!(para.first_child().and_then(|child| child.text()), Some("hello"));
/// ```
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    /// Creates a new arena allocator.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates a new arena with the specified initial capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Allocates a value in the arena and returns a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocates a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Allocates an empty element of the given kind.
    #[inline]
    pub fn element(&self, kind: ElementKind) -> &Element<'_> {
        self.bump.alloc(Element::new(kind))
    }

    /// Allocates a [`ElementKind::Str`] element holding `text`.
    pub fn string<'a>(&'a self, text: &'a str) -> &'a Element<'a> {
        let element = self.element(ElementKind::Str);
        element.set_contents(Contents::Text(text));
        element
    }

    /// Allocates a [`ElementKind::Str`] element with the concatenated
    /// text of a cons list, optionally followed by a newline.
    ///
    /// The list is reversed in place first, so it must be a freshly built
    /// cons list that nothing else links to.
    pub fn string_from_list<'a>(
        &'a self,
        list: Option<&'a Element<'a>>,
        extra_newline: bool,
    ) -> &'a Element<'a> {
        let mut text = String::new();
        let mut current = reverse(list);
        while let Some(element) = current {
            text.push_str(element.text().unwrap_or_default());
            current = element.next_sibling();
        }
        if extra_newline {
            text.push('\n');
        }
        self.string(self.alloc_str(&text))
    }

    /// Allocates an element of `kind` whose children are the reversed
    /// cons list `list`.
    pub fn list<'a>(&'a self, kind: ElementKind, list: Option<&'a Element<'a>>) -> &'a Element<'a> {
        let element = self.element(kind);
        element.set_children(reverse(list));
        element
    }

    /// Allocates a [`ElementKind::Link`] element.
    pub fn link<'a>(
        &'a self,
        label: Option<&'a Element<'a>>,
        url: &'a str,
        title: &'a str,
    ) -> &'a Element<'a> {
        let link = self.alloc(Link { label, url, title });
        let element = self.element(ElementKind::Link);
        element.set_contents(Contents::Link(link));
        element
    }

    /// Returns the total bytes allocated in this arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Resets the arena, deallocating all allocated objects.
    #[inline]
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::cons;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arena_alloc() {
        let arena = AstArena::new();
        let value = arena.alloc(42u32);
        assert_eq!(*value, 42);
    }

    #[test]
    fn test_arena_alloc_str() {
        let arena = AstArena::new();
        let s = arena.alloc_str("hello world");
        assert_eq!(s, "hello world");
    }

    #[test]
    fn test_string_element() {
        let arena = AstArena::new();
        let element = arena.string("text");
        assert_eq!(element.kind(), ElementKind::Str);
        assert_eq!(element.text(), Some("text"));
    }

    #[test]
    fn test_string_from_list_concatenates_in_source_order() {
        let arena = AstArena::new();
        let list = cons(arena.string("line 1\n"), None);
        let list = cons(arena.string("line 2\n"), Some(list));

        let joined = arena.string_from_list(Some(list), false);
        assert_eq!(joined.text(), Some("line 1\nline 2\n"));
    }

    #[test]
    fn test_string_from_list_extra_newline() {
        let arena = AstArena::new();
        let list = cons(arena.string("quote"), None);
        let joined = arena.string_from_list(Some(list), true);
        assert_eq!(joined.text(), Some("quote\n"));

        let empty = arena.string_from_list(None, false);
        assert_eq!(empty.text(), Some(""));
    }

    #[test]
    fn test_list_reverses_children() {
        let arena = AstArena::new();
        let list = cons(arena.string("first"), None);
        let list = cons(arena.string("second"), Some(list));

        let para = arena.list(ElementKind::Para, Some(list));
        let texts: Vec<_> = para.children().filter_map(Element::text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_link_element() {
        let arena = AstArena::new();
        let link = arena.link(None, "/url", "Title");
        assert_eq!(link.kind(), ElementKind::Link);
        let record = link.link().unwrap();
        assert_eq!(record.url, "/url");
        assert_eq!(record.title, "Title");
        assert!(record.label.is_none());
    }

    #[test]
    fn test_arena_reset() {
        let mut arena = AstArena::new();
        let _ = arena.alloc(42u32);
        let bytes_before = arena.allocated_bytes();
        arena.reset();
        let _ = arena.alloc(100u32);
        assert!(arena.allocated_bytes() > 0 || bytes_before > 0);
    }
}
