//! Sibling list construction.
//!
//! Rules build child lists by prepending each new element with [`cons`]
//! and restore source order with a single [`reverse`] when the enclosing
//! element is created. Both operate in place on the `next` links.

use crate::Element;

/// Prepends `item` to `list` and returns the new head.
#[inline]
pub fn cons<'a>(item: &'a Element<'a>, list: Option<&'a Element<'a>>) -> &'a Element<'a> {
    item.set_next(list);
    item
}

/// Reverses `list` in place and returns the new head.
pub fn reverse<'a>(list: Option<&'a Element<'a>>) -> Option<&'a Element<'a>> {
    let mut reversed = None;
    let mut current = list;
    while let Some(element) = current {
        current = element.next_sibling();
        element.set_next(reversed);
        reversed = Some(element);
    }
    reversed
}

/// Appends `item` after the last element of `list`.
///
/// `item` becomes the new tail: whatever followed it is dropped.
pub fn append<'a>(item: &'a Element<'a>, list: &'a Element<'a>) {
    item.set_next(None);
    chain(list, item);
}

/// Links the list starting at `rest` after the last element of `list`.
pub fn chain<'a>(list: &'a Element<'a>, rest: &'a Element<'a>) {
    let mut tail = list;
    while let Some(next) = tail.next_sibling() {
        tail = next;
    }
    tail.set_next(Some(rest));
}

/// Links `items` in iteration order and returns the head.
pub fn from_elements<'a, I>(items: I) -> Option<&'a Element<'a>>
where
    I: IntoIterator<Item = &'a Element<'a>>,
{
    let mut list = None;
    for item in items {
        list = Some(cons(item, list));
    }
    reverse(list)
}
