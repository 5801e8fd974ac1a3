//! Value stack carrying partial results between nested rules.

use mdpeg_ast::Element;

use super::thunk::Slot;

const INITIAL_SLOTS: usize = 256;

/// Activation-record stack of element slots.
///
/// A rule reserves a frame with [`push`](Self::push), reads and writes it
/// by [`Slot`] and releases it with [`pop`](Self::pop). The backing vector
/// grows on demand.
#[derive(Debug)]
pub(crate) struct ValueStack<'a> {
    slots: Vec<Option<&'a Element<'a>>>,
    top: usize,
}

impl<'a> ValueStack<'a> {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![None; INITIAL_SLOTS],
            top: 0,
        }
    }

    /// Reserves `n` cleared slots.
    pub(crate) fn push(&mut self, n: u8) {
        let start = self.top;
        self.top += usize::from(n);
        if self.top > self.slots.len() {
            let grown = (self.slots.len() * 2).max(self.top);
            self.slots.resize(grown, None);
        }
        self.slots[start..self.top].fill(None);
    }

    /// Releases `n` slots.
    pub(crate) fn pop(&mut self, n: u8) {
        debug_assert!(self.top >= usize::from(n), "value stack underflow");
        self.top = self.top.saturating_sub(usize::from(n));
    }

    pub(crate) fn get(&self, slot: Slot) -> Option<&'a Element<'a>> {
        self.index(slot).and_then(|index| self.slots[index])
    }

    pub(crate) fn set(&mut self, slot: Slot, value: Option<&'a Element<'a>>) {
        if let Some(index) = self.index(slot) {
            self.slots[index] = value;
        }
    }

    fn index(&self, slot: Slot) -> Option<usize> {
        self.top.checked_sub(slot.offset())
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdpeg_ast::AstArena;

    #[test]
    fn test_slots_are_relative_to_top() {
        let arena = AstArena::new();
        let mut stack = ValueStack::new();
        stack.push(2);
        stack.set(Slot::new(1), Some(arena.string("top")));
        stack.set(Slot::new(2), Some(arena.string("below")));

        stack.push(1);
        assert!(stack.get(Slot::new(1)).is_none());
        assert_eq!(stack.get(Slot::new(2)).and_then(Element::text), Some("top"));
        stack.pop(1);

        assert_eq!(stack.get(Slot::new(1)).and_then(Element::text), Some("top"));
        assert_eq!(stack.get(Slot::new(2)).and_then(Element::text), Some("below"));
    }

    #[test]
    fn test_push_clears_reused_slots() {
        let arena = AstArena::new();
        let mut stack = ValueStack::new();
        stack.push(1);
        stack.set(Slot::new(1), Some(arena.string("stale")));
        stack.pop(1);
        stack.push(1);
        assert!(stack.get(Slot::new(1)).is_none());
    }

    #[test]
    fn test_grows_past_initial_capacity() {
        let arena = AstArena::new();
        let mut stack = ValueStack::new();
        for _ in 0..(INITIAL_SLOTS / 2 + 10) {
            stack.push(3);
        }
        stack.set(Slot::new(1), Some(arena.string("deep")));
        assert_eq!(stack.get(Slot::new(1)).and_then(Element::text), Some("deep"));
        assert_eq!(stack.depth(), (INITIAL_SLOTS / 2 + 10) * 3);
    }
}
