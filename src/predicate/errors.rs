//! Condition error types

use thiserror::Error;

/// Result type for condition operations
pub type ConditionResult<T> = Result<T, ConditionSyntaxError>;

/// Errors raised for structurally invalid condition text.
///
/// Fatal when [`evaluate`](crate::predicate::evaluate) is called directly;
/// the filter engine instead catches these per record and treats the record
/// as failing the filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionSyntaxError {
    /// The leading token is not a recognized operator
    #[error("unrecognized operator in condition {condition:?}")]
    UnknownOperator {
        /// The full (trimmed) condition text
        condition: String,
    },

    /// BETWEEN is missing a bound or its AND keyword
    #[error("BETWEEN requires two bounds joined by AND, got {operand:?}")]
    MalformedBetween {
        /// Everything after the BETWEEN keyword
        operand: String,
    },

    /// A BETWEEN bound is not numeric
    #[error("BETWEEN bound {bound:?} is not numeric")]
    NonNumericBound {
        /// The offending bound token
        bound: String,
    },

    /// IN is missing its parenthesized candidate list
    #[error("IN requires a parenthesized list, got {operand:?}")]
    MalformedIn {
        /// Everything after the IN keyword
        operand: String,
    },
}
