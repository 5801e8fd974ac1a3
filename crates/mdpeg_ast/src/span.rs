//! Span and position types for source locations.

use serde::{Deserialize, Serialize};

/// A position in source text.
///
/// Lines are 1-indexed, columns are 0-indexed byte offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Translates a byte offset in `source` into a line and column.
    ///
    /// Offsets past the end of `source` are clamped to its end.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let bytes = &source.as_bytes()[..offset.min(source.len())];
        let line = bytes.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = bytes
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |newline| newline + 1);

        Self::new(line as u32, (bytes.len() - line_start) as u32)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span representing a range in source text.
///
/// Uses byte offsets (0-indexed) for efficient slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (0-indexed, inclusive).
    pub start: u32,
    /// End byte offset (0-indexed, exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at `offset`.
    #[inline]
    pub const fn empty(offset: u32) -> Self {
        Self::new(offset, offset)
    }

    /// Returns the length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the span as a `usize` range for slicing.
    #[inline]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_position() {
        let pos = Position::new(1, 0);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 0);
        assert_eq!(pos.to_string(), "1:0");
    }

    #[rstest]
    #[case("abc", 0, Position::new(1, 0))]
    #[case("abc", 2, Position::new(1, 2))]
    #[case("ab\ncd", 3, Position::new(2, 0))]
    #[case("ab\ncd\n", 5, Position::new(2, 2))]
    #[case("ab\n\n", 4, Position::new(3, 0))]
    #[case("ab", 10, Position::new(1, 2))]
    fn test_position_from_offset(
        #[case] source: &str,
        #[case] offset: usize,
        #[case] expected: Position,
    ) {
        assert_eq!(Position::from_offset(source, offset), expected);
    }

    #[test]
    fn test_span() {
        let span = Span::new(3, 8);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert_eq!(span.range(), 3..8);
        assert!(Span::empty(4).is_empty());
    }
}
