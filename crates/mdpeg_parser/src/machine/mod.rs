//! Backtracking match engine.
//!
//! A [`Machine`] walks the input with a single cursor. Grammar rules are
//! methods returning `bool`; every rule either succeeds or leaves the
//! cursor and the thunk queue exactly as it found them. The combinators
//! below ([`seq`](Machine::seq), [`star`](Machine::star),
//! [`peek`](Machine::peek), ...) provide that guarantee so individual rules
//! can be written as plain `&&`/`||` chains.

mod exec;
mod stack;
mod thunk;

use mdpeg_ast::{Element, Position, Span};
use tracing::trace;

use crate::classify::ByteClass;
use crate::context::ParseContext;
use crate::{Extensions, ParseError};

pub(crate) use exec::BLOCK_SEPARATOR;
use exec::Executor;
pub(crate) use thunk::{Action, HtmlFilter, Slot};
use thunk::ThunkQueue;

/// Deepest nesting of recursive rules, such as emphasis inside a link
/// label or parentheses inside a link target. A rule past the limit fails
/// to match, so its markup falls back to literal text.
pub(crate) const MAX_NESTING: usize = 64;

/// Top-level rules a parse can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    /// Block content; yields the list of blocks.
    Document,
    /// Reference declaration pre-pass.
    References,
    /// Footnote declaration pre-pass.
    Notes,
}

/// Saved matcher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mark {
    pos: usize,
    thunks: usize,
}

pub(crate) struct Machine<'a, 'c> {
    ctx: &'c ParseContext<'a>,
    input: &'a str,
    pos: usize,
    /// Position of the last commit.
    min: usize,
    /// Furthest position a primitive failed at.
    max: usize,
    thunks: ThunkQueue,
    /// Open levels of recursive rules.
    pub(crate) nesting: usize,
    tree: Option<&'a Element<'a>>,
    fault: Option<ParseError>,
}

impl<'a, 'c> Machine<'a, 'c> {
    pub(crate) fn new(ctx: &'c ParseContext<'a>, input: &'a str) -> Self {
        Self {
            ctx,
            input,
            pos: 0,
            min: 0,
            max: 0,
            thunks: ThunkQueue::new(),
            nesting: 0,
            tree: None,
            fault: None,
        }
    }

    /// Matches `rule` against the whole input.
    ///
    /// Succeeds when the rule matched and only whitespace is left over.
    pub(crate) fn run(mut self, rule: Rule) -> Result<Option<&'a Element<'a>>, ParseError> {
        let matched = match rule {
            Rule::Document => self.document(),
            Rule::References => self.references(),
            Rule::Notes => self.notes(),
        };
        if let Some(fault) = self.fault.take() {
            return Err(fault);
        }
        if !matched || !self.rest_is_blank() {
            return Err(self.failure());
        }
        Ok(self.tree)
    }

    #[inline]
    pub(crate) fn extensions(&self) -> &Extensions {
        self.ctx.extensions()
    }

    // ---- state ----------------------------------------------------------

    #[inline]
    pub(crate) fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            thunks: self.thunks.len(),
        }
    }

    #[inline]
    pub(crate) fn rewind(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.thunks.truncate(mark.thunks);
    }

    /// Replays every queued thunk if `mark` is the start of the queue.
    ///
    /// Only an outermost rule can commit; nested rules get `false` and the
    /// enclosing rule fails with them.
    pub(crate) fn commit(&mut self, mark: Mark) -> bool {
        if mark.thunks != 0 {
            return false;
        }
        let thunks = self.thunks.take();
        trace!(thunks = thunks.len(), "replaying deferred actions");

        let mut executor = Executor::new(self.ctx, self.input);
        for thunk in thunks {
            if let Err(err) = executor.run(thunk) {
                self.fault = Some(err);
                return false;
            }
        }
        if let Some(tree) = executor.tree() {
            self.tree = Some(tree);
        }
        self.min = self.pos;
        true
    }

    fn rest_is_blank(&self) -> bool {
        self.input.as_bytes()[self.pos..]
            .iter()
            .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
    }

    fn failure(&self) -> ParseError {
        let furthest = self.max.max(self.pos);
        let after = Position::from_offset(self.input, self.min);
        match self.input.get(furthest..).and_then(|rest| rest.chars().next()) {
            Some(found) => ParseError::UnexpectedChar {
                after,
                at: Position::from_offset(self.input, furthest),
                found,
            },
            None if furthest < self.input.len() => ParseError::UnexpectedChar {
                after,
                at: Position::from_offset(self.input, furthest),
                found: char::REPLACEMENT_CHARACTER,
            },
            None => ParseError::UnexpectedEof { after },
        }
    }

    // ---- combinators ----------------------------------------------------

    /// Sequence: runs `f`, restoring the state if it fails.
    #[inline]
    pub(crate) fn seq(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let mark = self.mark();
        if f(self) {
            true
        } else {
            self.rewind(mark);
            false
        }
    }

    /// `e*`: greedy repetition. An iteration that consumes nothing ends
    /// the loop.
    pub(crate) fn star(&mut self, mut f: impl FnMut(&mut Self) -> bool) -> bool {
        loop {
            let before = self.pos;
            if !self.seq(&mut f) || self.pos == before {
                return true;
            }
        }
    }

    /// `e+`
    pub(crate) fn plus(&mut self, mut f: impl FnMut(&mut Self) -> bool) -> bool {
        if !self.seq(&mut f) {
            return false;
        }
        self.star(f)
    }

    /// `e?`
    #[inline]
    pub(crate) fn opt(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        self.seq(f);
        true
    }

    /// `&e`: positive lookahead, consumes nothing.
    pub(crate) fn peek(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let mark = self.mark();
        let matched = f(self);
        self.rewind(mark);
        matched
    }

    /// `!e`: negative lookahead, consumes nothing.
    #[inline]
    pub(crate) fn not(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        !self.peek(f)
    }

    /// `< e >`: returns the span `f` consumed.
    pub(crate) fn capture(&mut self, f: impl FnOnce(&mut Self) -> bool) -> Option<Span> {
        let start = self.pos;
        self.seq(f).then(|| self.span_from(start))
    }

    /// `< e > { action }`
    pub(crate) fn capture_then(
        &mut self,
        action: Action,
        f: impl FnOnce(&mut Self) -> bool,
    ) -> bool {
        match self.capture(f) {
            Some(span) => self.act_on(action, span),
            None => false,
        }
    }

    /// `open < body > close`: returns the span of `body`.
    pub(crate) fn enclosed(
        &mut self,
        open: impl FnOnce(&mut Self) -> bool,
        body: impl FnOnce(&mut Self) -> bool,
        close: impl FnOnce(&mut Self) -> bool,
    ) -> Option<Span> {
        let mark = self.mark();
        if open(self)
            && let Some(span) = self.capture(body)
            && close(self)
        {
            return Some(span);
        }
        self.rewind(mark);
        None
    }

    /// Runs `f` one nesting level deeper, failing once [`MAX_NESTING`]
    /// levels are open.
    pub(crate) fn nested(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        if self.nesting >= MAX_NESTING {
            return false;
        }
        self.nesting += 1;
        let matched = self.seq(f);
        self.nesting -= 1;
        matched
    }

    // ---- primitives -----------------------------------------------------

    #[inline]
    pub(crate) fn current(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn peek_byte(&self, byte: u8) -> bool {
        self.current() == Some(byte)
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    fn miss(&mut self) {
        self.max = self.max.max(self.pos);
    }

    /// Matches one byte satisfying `pred`.
    #[inline]
    pub(crate) fn byte_if(&mut self, pred: impl FnOnce(u8) -> bool) -> bool {
        match self.current() {
            Some(b) if pred(b) => {
                self.pos += 1;
                true
            }
            _ => {
                self.miss();
                false
            }
        }
    }

    #[inline]
    pub(crate) fn byte(&mut self, byte: u8) -> bool {
        self.byte_if(|b| b == byte)
    }

    /// `.`
    #[inline]
    pub(crate) fn any(&mut self) -> bool {
        self.byte_if(|_| true)
    }

    #[inline]
    pub(crate) fn class(&mut self, class: ByteClass) -> bool {
        self.byte_if(|b| class.contains(b))
    }

    pub(crate) fn literal(&mut self, text: &str) -> bool {
        if self.input.as_bytes()[self.pos..].starts_with(text.as_bytes()) {
            self.pos += text.len();
            true
        } else {
            self.miss();
            false
        }
    }

    // ---- actions --------------------------------------------------------

    #[inline]
    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }

    /// Empty span at the cursor.
    #[inline]
    pub(crate) fn here(&self) -> Span {
        Span::empty(self.pos as u32)
    }

    /// Records `action` with an empty span. Always succeeds.
    #[inline]
    pub(crate) fn act(&mut self, action: Action) -> bool {
        let span = self.here();
        self.act_on(action, span)
    }

    /// Records `action` over `span`. Always succeeds.
    #[inline]
    pub(crate) fn act_on(&mut self, action: Action, span: Span) -> bool {
        self.thunks.record(action, span);
        true
    }

    #[inline]
    pub(crate) fn push(&mut self, n: u8) -> bool {
        self.act(Action::Push(n))
    }

    #[inline]
    pub(crate) fn pop(&mut self, n: u8) -> bool {
        self.act(Action::Pop(n))
    }

    #[inline]
    pub(crate) fn set(&mut self, slot: Slot) -> bool {
        self.act(Action::Set(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdpeg_ast::AstArena;
    use pretty_assertions::assert_eq;

    fn with_machine(input: &str, f: impl FnOnce(&mut Machine<'_, '_>)) {
        let arena = AstArena::new();
        let ctx = ParseContext::new(&arena, Extensions::default());
        let input = arena.alloc_str(input);
        let mut machine = Machine::new(&ctx, input);
        f(&mut machine);
    }

    #[test]
    fn test_seq_restores_position_and_thunks() {
        with_machine("abc", |m| {
            let matched = m.seq(|m| m.byte(b'a') && m.act(Action::Clear) && m.byte(b'x'));
            assert!(!matched);
            assert_eq!(m.pos, 0);
            assert_eq!(m.thunks.len(), 0);
        });
    }

    #[test]
    fn test_ordered_choice_takes_first_match() {
        with_machine("abc", |m| {
            let matched = m.literal("ab") || m.literal("abc");
            assert!(matched);
            assert_eq!(m.pos, 2);
        });
    }

    #[test]
    fn test_star_is_greedy_and_never_fails() {
        with_machine("aaab", |m| {
            assert!(m.star(|m| m.byte(b'a')));
            assert_eq!(m.pos, 3);
            assert!(m.star(|m| m.byte(b'a')));
            assert_eq!(m.pos, 3);
        });
    }

    #[test]
    fn test_star_stops_on_empty_iteration() {
        with_machine("x", |m| {
            assert!(m.star(|m| m.opt(|m| m.byte(b'y'))));
            assert_eq!(m.pos, 0);
        });
    }

    #[test]
    fn test_plus_requires_one_match() {
        with_machine("b", |m| {
            assert!(!m.plus(|m| m.byte(b'a')));
            assert!(m.plus(|m| m.byte(b'b')));
        });
    }

    #[test]
    fn test_lookahead_consumes_nothing() {
        with_machine("ab", |m| {
            assert!(m.peek(|m| m.literal("ab") && m.act(Action::Clear)));
            assert_eq!(m.pos, 0);
            assert_eq!(m.thunks.len(), 0);
            assert!(m.not(|m| m.byte(b'b')));
            assert!(!m.not(|m| m.byte(b'a')));
        });
    }

    #[test]
    fn test_capture_and_enclosed() {
        with_machine("<url>rest", |m| {
            let span = m.enclosed(
                |m| m.byte(b'<'),
                |m| m.plus(|m| m.byte_if(|b| b != b'>')),
                |m| m.byte(b'>'),
            );
            assert_eq!(span, Some(Span::new(1, 4)));
            assert_eq!(m.capture(|m| m.literal("rest")), Some(Span::new(5, 9)));
            assert!(m.at_end());
        });
    }

    #[test]
    fn test_enclosed_rewinds_on_missing_close() {
        with_machine("<url", |m| {
            let span = m.enclosed(
                |m| m.byte(b'<'),
                |m| m.plus(|m| m.byte_if(|b| b != b'>')),
                |m| m.byte(b'>'),
            );
            assert_eq!(span, None);
            assert_eq!(m.pos, 0);
        });
    }

    #[test]
    fn test_nested_commit_is_refused() {
        with_machine("ab", |m| {
            m.act(Action::Clear);
            let mark = m.mark();
            assert!(!m.commit(mark));
            assert_eq!(m.thunks.len(), 1);
        });
    }

    #[test]
    fn test_failure_reports_furthest_position() {
        let arena = AstArena::new();
        let ctx = ParseContext::new(&arena, Extensions::default());
        let mut machine = Machine::new(&ctx, "ab\ncd");
        assert!(machine.literal("ab\nc"));
        assert!(!machine.byte(b'x'));
        machine.pos = 0;

        let err = machine.failure();
        assert!(matches!(
            err,
            ParseError::UnexpectedChar { at, found: 'd', .. } if at == Position::new(2, 1)
        ));
    }

    #[test]
    fn test_failure_at_end_of_input() {
        let arena = AstArena::new();
        let ctx = ParseContext::new(&arena, Extensions::default());
        let mut machine = Machine::new(&ctx, "ab");
        assert!(!machine.literal("abc"));
        machine.pos = 2;
        assert!(!machine.any());

        assert!(matches!(machine.failure(), ParseError::UnexpectedEof { .. }));
    }
}
