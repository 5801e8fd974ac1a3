//! Indented text rendering of an element tree, for debugging and snapshots.

use std::fmt::Write as _;
use std::ops::ControlFlow;

use crate::visitor::{walk_children, walk_element, walk_label, VisitResult, Visitor};
use crate::{Contents, Element};

const INDENT: &str = "  ";

/// Renders `element` and its subtree, one element per line.
///
/// Each line holds the kind followed by the payload: quoted text, or the
/// url and title of a link. Children and link labels are indented below
/// their parent.
///
/// ```rust
/// use mdpeg_ast::{dump, AstArena, ElementKind};
///
/// let arena = AstArena::new();
/// let para = arena.list(ElementKind::Para, Some(arena.string("hi")));
/// assert_eq!(dump(para), "Para\n  Str \"hi\"\n");
/// ```
pub fn dump<'a>(element: &'a Element<'a>) -> String {
    let mut printer = TreePrinter {
        out: String::new(),
        depth: 0,
    };
    let _ = walk_element(&mut printer, element);
    printer.out
}

struct TreePrinter {
    out: String,
    depth: usize,
}

impl<'a> Visitor<'a> for TreePrinter {
    fn enter_element(&mut self, element: &'a Element<'a>) -> VisitResult {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(element.kind().as_str());
        let _ = match element.contents() {
            Contents::None => Ok(()),
            Contents::Text(text) => write!(self.out, " {text:?}"),
            Contents::Link(link) => write!(self.out, " url={:?} title={:?}", link.url, link.title),
        };
        self.out.push('\n');
        self.depth += 1;
        ControlFlow::Continue(())
    }

    fn visit_element(&mut self, element: &'a Element<'a>) -> VisitResult {
        walk_label(self, element)?;
        walk_children(self, element)
    }

    fn exit_element(&mut self, _element: &'a Element<'a>) -> VisitResult {
        self.depth -= 1;
        ControlFlow::Continue(())
    }
}
