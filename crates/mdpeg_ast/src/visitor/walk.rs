//! Walk functions for tree traversal.

use std::ops::ControlFlow;

use crate::Element;

use super::visit::{VisitResult, Visitor};

/// Walks an element: enter hook, content, exit hook.
pub fn walk_element<'a, V>(visitor: &mut V, element: &'a Element<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    visitor.enter_element(element)?;
    visitor.visit_element(element)?;
    visitor.exit_element(element)
}

/// Walks all children of an element in order.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, element: &'a Element<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    for child in element.children() {
        walk_element(visitor, child)?;
    }
    ControlFlow::Continue(())
}

/// Walks the label elements of a link, image or reference.
#[inline]
pub fn walk_label<'a, V>(visitor: &mut V, element: &'a Element<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    if let Some(link) = element.link() {
        for child in link.label() {
            walk_element(visitor, child)?;
        }
    }
    ControlFlow::Continue(())
}
