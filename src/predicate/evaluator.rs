//! Condition evaluation
//!
//! The candidate value is trimmed before every comparison. Two fallbacks
//! apply when numbers are involved, and they deliberately point in opposite
//! directions:
//!
//! - `>` `<` `>=` `<=` with a non-numeric side evaluate **true**: ordering
//!   is undefined there, and the interpreter includes rather than rejects
//! - `BETWEEN` with a non-numeric candidate evaluates **false**
//!
//! Both are observed, compatibility-critical behavior.

use super::ast::{Condition, Operator};
use super::errors::ConditionResult;

/// Evaluate one condition against one candidate value.
///
/// Empty or whitespace-only conditions are vacuously true for any value.
/// Structurally invalid condition text is a
/// [`ConditionSyntaxError`](super::ConditionSyntaxError).
pub fn evaluate(value: &str, condition: &str) -> ConditionResult<bool> {
    Condition::compile(condition).matches(value)
}

impl Condition {
    /// Evaluate this compiled condition against one candidate value
    pub fn matches(&self, value: &str) -> ConditionResult<bool> {
        let operator = match &self.operator {
            None => return Ok(true),
            Some(operator) => operator,
        };
        let value = value.trim();

        Ok(match operator {
            Operator::Equals(expected) => value == expected,
            Operator::NotEquals(expected) => value != expected,
            Operator::GreaterThan(bound) => ordered(value, *bound, |v, b| v > b),
            Operator::LessThan(bound) => ordered(value, *bound, |v, b| v < b),
            Operator::GreaterOrEqual(bound) => ordered(value, *bound, |v, b| v >= b),
            Operator::LessOrEqual(bound) => ordered(value, *bound, |v, b| v <= b),
            Operator::Between(low, high) => match value.parse::<f64>() {
                Ok(v) => *low <= v && v <= *high,
                Err(_) => false,
            },
            Operator::In(candidates) => candidates.iter().any(|c| c == value),
            Operator::Malformed(err) => return Err(err.clone()),
        })
    }
}

/// Numeric comparison with the permissive fallback: either side failing to
/// parse makes the comparison true
fn ordered(value: &str, bound: Option<f64>, cmp: fn(f64, f64) -> bool) -> bool {
    match (value.parse::<f64>(), bound) {
        (Ok(v), Some(b)) => cmp(v, b),
        _ => true,
    }
}
