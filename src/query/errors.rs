//! # Query Facade Errors

use thiserror::Error;

use crate::codec::DecodeError;

/// Result type for facade operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query facade errors.
///
/// Unlike the engine, which degrades malformed textual conditions per
/// record, the facade validates its structured operand shapes eagerly and
/// rejects the whole request.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Source text exceeds the request's size guard
    #[error("source is {actual} bytes, exceeding the {limit}-byte limit")]
    SourceTooLarge { actual: usize, limit: usize },

    /// Source text failed to decode
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A structured filter's operand has the wrong shape for its operator
    #[error("filter on column {column:?}: {reason}")]
    InvalidOperand { column: String, reason: String },

    /// A regex filter's pattern failed to compile
    #[error("filter on column {column:?}: invalid pattern: {source}")]
    InvalidPattern {
        column: String,
        #[source]
        source: regex::Error,
    },
}

impl QueryError {
    /// Invalid-operand constructor used throughout filter compilation
    pub fn invalid_operand(column: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOperand {
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_propagates_unmodified() {
        let decode_err = DecodeError::UnterminatedQuote { line: 4 };
        let err = QueryError::from(decode_err.clone());
        assert_eq!(err.to_string(), decode_err.to_string());
    }

    #[test]
    fn test_invalid_operand_names_column() {
        let err = QueryError::invalid_operand("age", "expected a number");
        assert!(err.to_string().contains("age"));
        assert!(err.to_string().contains("expected a number"));
    }
}
