//! Visitor pattern for element tree traversal.
//!
//! # Overview
//!
//! - [`Visitor`] - Read-only traversal trait with enter/visit/exit hooks
//! - [`walk_element`] - Visits one element and, by default, its subtree
//! - [`walk_children`] - Traverses the children of an element
//! - [`walk_label`] - Traverses the label of a link element
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//!
//! use mdpeg_ast::visitor::{walk_element, VisitResult, Visitor};
//! use mdpeg_ast::{AstArena, Element, ElementKind};
//!
//! struct Headings(usize);
//!
//! impl<'a> Visitor<'a> for Headings {
//!     fn enter_element(&mut self, element: &'a Element<'a>) -> VisitResult {
//!         if element.kind().heading_level().is_some() {
//!             self.0 += 1;
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let arena = AstArena::new();
//! let heading = arena.list(ElementKind::H2, Some(arena.string("Title")));
//! let doc = arena.list(ElementKind::Document, Some(heading));
//!
//! let mut headings = Headings(0);
//! let _ = walk_element(&mut headings, doc);
//! assert_eq!(headings.0, 1);
//! ```

use std::ops::ControlFlow;

use crate::{Element, ElementKind};

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_children, walk_element, walk_label};

struct TextCollector {
    text: String,
}

impl<'a> Visitor<'a> for TextCollector {
    fn enter_element(&mut self, element: &'a Element<'a>) -> VisitResult {
        match element.kind() {
            ElementKind::Raw
            | ElementKind::Reference
            | ElementKind::Note
            | ElementKind::CellSpan
            | ElementKind::TableSeparator => {}
            _ => {
                if let Some(text) = element.text() {
                    self.text.push_str(text);
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn visit_element(&mut self, element: &'a Element<'a>) -> VisitResult {
        walk_label(self, element)?;
        walk_children(self, element)
    }
}

pub(crate) fn collect_text<'a>(element: &'a Element<'a>) -> String {
    let mut collector = TextCollector {
        text: String::new(),
    };
    let _ = walk_element(&mut collector, element);
    collector.text
}
