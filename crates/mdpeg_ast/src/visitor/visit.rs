//! Visitor trait for traversing element trees.

use std::ops::ControlFlow;

use crate::Element;

use super::walk::walk_children;

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue visiting
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Visitor trait for traversing element trees.
///
/// [`walk_element`](super::walk_element) calls [`enter_element`], then
/// [`visit_element`], then [`exit_element`]. The default
/// `visit_element` descends into the children; override it to skip
/// subtrees or to also walk link labels with
/// [`walk_label`](super::walk_label).
///
/// [`enter_element`]: Visitor::enter_element
/// [`visit_element`]: Visitor::visit_element
/// [`exit_element`]: Visitor::exit_element
pub trait Visitor<'a>: Sized {
    /// Called before an element's content is visited.
    fn enter_element(&mut self, _element: &'a Element<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Visits the content of an element.
    fn visit_element(&mut self, element: &'a Element<'a>) -> VisitResult {
        walk_children(self, element)
    }

    /// Called after an element's content has been visited.
    fn exit_element(&mut self, _element: &'a Element<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }
}
