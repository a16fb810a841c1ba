//! Codec error types
//!
//! A `DecodeError` is fatal to the whole decode call: the caller receives
//! either a complete document or the error, never a partial document.

use thiserror::Error;

/// Result type for codec operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised for structurally invalid source text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A quoted field was opened but never closed
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote {
        /// 1-based source line where the quote was opened
        line: usize,
    },

    /// Non-whitespace text followed a closing quote without a separator
    #[error("unexpected character {found:?} after closing quote on line {line}")]
    TrailingAfterQuote {
        /// 1-based source line of the stray character
        line: usize,
        /// The offending character
        found: char,
    },
}

impl DecodeError {
    /// Returns the 1-based source line the error was detected on
    pub fn line(&self) -> usize {
        match self {
            DecodeError::UnterminatedQuote { line } => *line,
            DecodeError::TrailingAfterQuote { line, .. } => *line,
        }
    }
}
