//! Parse error types.

use mdpeg_ast::Position;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Matching stopped in front of a character no rule accepts.
    #[error("{at}: unexpected character {found:?} after {after}")]
    UnexpectedChar {
        /// Position of the last committed match.
        after: Position,
        /// Furthest position any rule reached.
        at: Position,
        /// The offending character.
        found: char,
    },

    /// Input ended while a rule still expected more.
    #[error("unexpected end of input after {after}")]
    UnexpectedEof {
        /// Position of the last committed match.
        after: Position,
    },

    /// An internal parser invariant was violated.
    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the furthest position reached, if this is a syntax error.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::UnexpectedChar { at, .. } => Some(*at),
            Self::UnexpectedEof { after } => Some(*after),
            Self::Internal(_) => None,
        }
    }
}

/// Errors that can occur while reading parser configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse JSON configuration.
    #[error("Failed to parse extensions: {0}")]
    Json(#[from] serde_json::Error),

    /// An option name is not recognized.
    #[error("Unknown extension: {0}")]
    UnknownOption(String),
}
