//! # Structured Filter Vocabulary
//!
//! Filter clauses external callers send, and their compiled, per-request
//! matchers. Compilation happens once per filter per query: operand shapes
//! are validated, regexes built, dates parsed, and the kinds with a textual
//! counterpart lowered onto the predicate interpreter.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{QueryError, QueryResult};
use crate::predicate::Condition;

/// Filter operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    /// Exact, case-sensitive equality
    Equals,
    /// Exact, case-sensitive inequality
    NotEquals,
    /// Numeric `>`
    GreaterThan,
    /// Numeric `>=`
    GreaterOrEqual,
    /// Numeric `<`
    LessThan,
    /// Numeric `<=`
    LessOrEqual,
    /// Inclusive numeric range, operand `[low, high]`
    Between,
    /// Membership in an operand list
    In,
    /// Case-sensitive substring match
    Contains,
    /// Case-sensitive prefix match
    StartsWith,
    /// Case-sensitive suffix match
    EndsWith,
    /// Regular-expression match
    Regex,
    /// Inclusive calendar-date range, operand `[start, end]`
    DateRange,
    /// Strictly earlier calendar date
    Before,
    /// Strictly later calendar date
    After,
    /// Value is missing-equivalent (trims to empty)
    IsNull,
    /// Value is a true-ish flag
    IsTrue,
}

impl OperatorKind {
    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorKind::Equals => "equals",
            OperatorKind::NotEquals => "not_equals",
            OperatorKind::GreaterThan => "greater_than",
            OperatorKind::GreaterOrEqual => "greater_or_equal",
            OperatorKind::LessThan => "less_than",
            OperatorKind::LessOrEqual => "less_or_equal",
            OperatorKind::Between => "between",
            OperatorKind::In => "in",
            OperatorKind::Contains => "contains",
            OperatorKind::StartsWith => "starts_with",
            OperatorKind::EndsWith => "ends_with",
            OperatorKind::Regex => "regex",
            OperatorKind::DateRange => "date_range",
            OperatorKind::Before => "before",
            OperatorKind::After => "after",
            OperatorKind::IsNull => "is_null",
            OperatorKind::IsTrue => "is_true",
        }
    }
}

/// One structured filter clause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Column to filter on
    pub column: String,

    /// Comparison operator
    #[serde(rename = "operator")]
    pub kind: OperatorKind,

    /// Operand; shape depends on the operator kind
    #[serde(default)]
    pub operand: Value,

    /// Invert the per-record match result
    #[serde(default)]
    pub negated: bool,
}

impl QueryFilter {
    /// Create a filter clause
    pub fn new(column: impl Into<String>, kind: OperatorKind, operand: Value) -> Self {
        Self {
            column: column.into(),
            kind,
            operand,
            negated: false,
        }
    }

    /// Invert this clause
    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }
}

/// A filter compiled for one query execution
#[derive(Debug)]
pub(super) struct CompiledFilter {
    pub column: String,
    negated: bool,
    matcher: Matcher,
}

/// Per-kind matching machinery
#[derive(Debug)]
enum Matcher {
    /// Kinds with a textual counterpart run through the interpreter
    Condition(Condition),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    Regex(Regex),
    DateRange(NaiveDate, NaiveDate),
    Before(NaiveDate),
    After(NaiveDate),
    IsNull,
    IsTrue,
}

impl CompiledFilter {
    /// Validate one clause's operand shape and build its matcher
    pub fn compile(filter: &QueryFilter) -> QueryResult<Self> {
        let column = filter.column.as_str();
        let matcher = match filter.kind {
            OperatorKind::Equals => {
                Matcher::Condition(Condition::equals(text_operand(column, &filter.operand)?))
            }
            OperatorKind::NotEquals => {
                Matcher::Condition(Condition::not_equals(text_operand(column, &filter.operand)?))
            }
            OperatorKind::GreaterThan => {
                Matcher::Condition(Condition::greater_than(bound_operand(column, &filter.operand)?))
            }
            OperatorKind::GreaterOrEqual => Matcher::Condition(Condition::greater_or_equal(
                bound_operand(column, &filter.operand)?,
            )),
            OperatorKind::LessThan => {
                Matcher::Condition(Condition::less_than(bound_operand(column, &filter.operand)?))
            }
            OperatorKind::LessOrEqual => Matcher::Condition(Condition::less_or_equal(
                bound_operand(column, &filter.operand)?,
            )),
            OperatorKind::Between => {
                let (low, high) = pair_operand(column, &filter.operand)?;
                let low = numeric_pair_member(column, &low)?;
                let high = numeric_pair_member(column, &high)?;
                Matcher::Condition(Condition::between(low, high))
            }
            OperatorKind::In => {
                let members = filter.operand.as_array().ok_or_else(|| {
                    QueryError::invalid_operand(column, "in expects an array operand")
                })?;
                let candidates = members
                    .iter()
                    .map(|member| text_operand(column, member))
                    .collect::<QueryResult<Vec<_>>>()?;
                Matcher::Condition(Condition::in_list(candidates))
            }
            OperatorKind::Contains => Matcher::Contains(text_operand(column, &filter.operand)?),
            OperatorKind::StartsWith => Matcher::StartsWith(text_operand(column, &filter.operand)?),
            OperatorKind::EndsWith => Matcher::EndsWith(text_operand(column, &filter.operand)?),
            OperatorKind::Regex => {
                let pattern = text_operand(column, &filter.operand)?;
                let regex = Regex::new(&pattern).map_err(|source| QueryError::InvalidPattern {
                    column: column.to_string(),
                    source,
                })?;
                Matcher::Regex(regex)
            }
            OperatorKind::DateRange => {
                let (start, end) = pair_operand(column, &filter.operand)?;
                Matcher::DateRange(
                    date_pair_member(column, &start)?,
                    date_pair_member(column, &end)?,
                )
            }
            OperatorKind::Before => {
                Matcher::Before(date_operand(column, &filter.operand)?)
            }
            OperatorKind::After => Matcher::After(date_operand(column, &filter.operand)?),
            OperatorKind::IsNull => Matcher::IsNull,
            OperatorKind::IsTrue => Matcher::IsTrue,
        };
        Ok(Self {
            column: filter.column.clone(),
            negated: filter.negated,
            matcher,
        })
    }

    /// Match against a record's value for this filter's column.
    ///
    /// `None` means the record lacks the column, which fails the filter
    /// before negation is applied - the same missing-key rule the engine
    /// uses for textual conditions.
    pub fn matches(&self, value: Option<&str>) -> bool {
        let matched = match value {
            None => false,
            Some(value) => self.matcher.matches_value(value.trim()),
        };
        matched != self.negated
    }
}

impl Matcher {
    fn matches_value(&self, value: &str) -> bool {
        match self {
            // constructor-built conditions are never malformed; the error
            // arm is unreachable but collapses to no-match regardless
            Matcher::Condition(condition) => condition.matches(value).unwrap_or(false),
            Matcher::Contains(needle) => value.contains(needle.as_str()),
            Matcher::StartsWith(prefix) => value.starts_with(prefix.as_str()),
            Matcher::EndsWith(suffix) => value.ends_with(suffix.as_str()),
            Matcher::Regex(regex) => regex.is_match(value),
            // date kinds mirror BETWEEN's strict fallback: a candidate
            // that is not a date matches nothing
            Matcher::DateRange(start, end) => match parse_date(value) {
                Some(date) => *start <= date && date <= *end,
                None => false,
            },
            Matcher::Before(bound) => matches!(parse_date(value), Some(date) if date < *bound),
            Matcher::After(bound) => matches!(parse_date(value), Some(date) if date > *bound),
            Matcher::IsNull => value.is_empty(),
            Matcher::IsTrue => {
                matches!(value.to_ascii_lowercase().as_str(), "true" | "yes" | "1")
            }
        }
    }
}

/// ISO-style date parsing, matching the profiler's detection formats
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .ok()
}

/// Coerce an operand to its canonical text
fn text_operand(column: &str, operand: &Value) -> QueryResult<String> {
    match operand {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(QueryError::invalid_operand(
            column,
            "expected a string, number, or boolean operand",
        )),
    }
}

/// Coerce an ordering operand to a numeric bound.
///
/// A string operand that is not numeric compiles to `None`, keeping the
/// interpreter's permissive ordering fallback; only structurally wrong
/// shapes are rejected.
fn bound_operand(column: &str, operand: &Value) -> QueryResult<Option<f64>> {
    match operand {
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => Ok(s.trim().parse::<f64>().ok()),
        _ => Err(QueryError::invalid_operand(
            column,
            "expected a numeric operand",
        )),
    }
}

/// Split a two-element array operand
fn pair_operand(column: &str, operand: &Value) -> QueryResult<(Value, Value)> {
    match operand.as_array() {
        Some(pair) if pair.len() == 2 => Ok((pair[0].clone(), pair[1].clone())),
        _ => Err(QueryError::invalid_operand(
            column,
            "expected a two-element array operand",
        )),
    }
}

/// A range bound must be numeric; the facade rejects bad bounds eagerly
fn numeric_pair_member(column: &str, member: &Value) -> QueryResult<f64> {
    bound_operand(column, member)?.ok_or_else(|| {
        QueryError::invalid_operand(column, "range bound is not numeric")
    })
}

fn date_operand(column: &str, operand: &Value) -> QueryResult<NaiveDate> {
    let text = text_operand(column, operand)?;
    parse_date(text.trim()).ok_or_else(|| {
        QueryError::invalid_operand(column, format!("{:?} is not a date", text))
    })
}

fn date_pair_member(column: &str, member: &Value) -> QueryResult<NaiveDate> {
    date_operand(column, member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compiled(kind: OperatorKind, operand: Value) -> CompiledFilter {
        CompiledFilter::compile(&QueryFilter::new("col", kind, operand)).unwrap()
    }

    #[test]
    fn test_equals_matches_through_interpreter() {
        let filter = compiled(OperatorKind::Equals, json!("NYC"));
        assert!(filter.matches(Some("NYC")));
        assert!(filter.matches(Some("  NYC  ")));
        assert!(!filter.matches(Some("nyc")));
    }

    #[test]
    fn test_numeric_operand_coerces_to_text() {
        let filter = compiled(OperatorKind::Equals, json!(25));
        assert!(filter.matches(Some("25")));
    }

    #[test]
    fn test_ordering_keeps_permissive_fallback() {
        let filter = compiled(OperatorKind::GreaterThan, json!("Jane"));
        assert!(filter.matches(Some("John")));
        let filter = compiled(OperatorKind::GreaterOrEqual, json!(30));
        assert!(filter.matches(Some("not a number")));
        assert!(!filter.matches(Some("25")));
    }

    #[test]
    fn test_between_rejects_bad_operand_shapes() {
        assert!(CompiledFilter::compile(&QueryFilter::new(
            "col",
            OperatorKind::Between,
            json!([20]),
        ))
        .is_err());
        assert!(CompiledFilter::compile(&QueryFilter::new(
            "col",
            OperatorKind::Between,
            json!([20, "not numeric"]),
        ))
        .is_err());
    }

    #[test]
    fn test_between_matches_inclusively() {
        let filter = compiled(OperatorKind::Between, json!([20, 30]));
        assert!(filter.matches(Some("20")));
        assert!(filter.matches(Some("30")));
        assert!(!filter.matches(Some("31")));
        assert!(!filter.matches(Some("abc")));
    }

    #[test]
    fn test_in_mixed_member_types() {
        let filter = compiled(OperatorKind::In, json!(["John", 25, true]));
        assert!(filter.matches(Some("John")));
        assert!(filter.matches(Some("25")));
        assert!(filter.matches(Some("true")));
        assert!(!filter.matches(Some("john")));
    }

    #[test]
    fn test_in_rejects_non_array_operand() {
        assert!(
            CompiledFilter::compile(&QueryFilter::new("col", OperatorKind::In, json!("John")))
                .is_err()
        );
    }

    #[test]
    fn test_substring_kinds_case_sensitive() {
        assert!(compiled(OperatorKind::Contains, json!("York")).matches(Some("New York")));
        assert!(!compiled(OperatorKind::Contains, json!("york")).matches(Some("New York")));
        assert!(compiled(OperatorKind::StartsWith, json!("New")).matches(Some("New York")));
        assert!(compiled(OperatorKind::EndsWith, json!("York")).matches(Some("New York")));
        assert!(!compiled(OperatorKind::EndsWith, json!("New")).matches(Some("New York")));
    }

    #[test]
    fn test_regex_kind() {
        let filter = compiled(OperatorKind::Regex, json!("^J.*n$"));
        assert!(filter.matches(Some("John")));
        assert!(!filter.matches(Some("Jane")));
    }

    #[test]
    fn test_invalid_regex_rejected_at_compile() {
        let err =
            CompiledFilter::compile(&QueryFilter::new("col", OperatorKind::Regex, json!("(")))
                .unwrap_err();
        assert!(matches!(err, QueryError::InvalidPattern { .. }));
    }

    #[test]
    fn test_date_kinds() {
        let range = compiled(OperatorKind::DateRange, json!(["2024-01-01", "2024-06-30"]));
        assert!(range.matches(Some("2024-03-15")));
        assert!(!range.matches(Some("2024-07-01")));
        assert!(!range.matches(Some("not a date")));

        let before = compiled(OperatorKind::Before, json!("2024-01-01"));
        assert!(before.matches(Some("2023-12-31")));
        assert!(!before.matches(Some("2024-01-01")));

        let after = compiled(OperatorKind::After, json!("2024-01-01"));
        assert!(after.matches(Some("2024-01-02")));
        assert!(!after.matches(Some("2024-01-01")));
    }

    #[test]
    fn test_unparseable_date_operand_rejected() {
        assert!(CompiledFilter::compile(&QueryFilter::new(
            "col",
            OperatorKind::Before,
            json!("soon"),
        ))
        .is_err());
    }

    #[test]
    fn test_is_null_and_is_true() {
        let is_null = compiled(OperatorKind::IsNull, Value::Null);
        assert!(is_null.matches(Some("")));
        assert!(is_null.matches(Some("   ")));
        assert!(!is_null.matches(Some("x")));

        let is_true = compiled(OperatorKind::IsTrue, Value::Null);
        assert!(is_true.matches(Some("true")));
        assert!(is_true.matches(Some("YES")));
        assert!(is_true.matches(Some("1")));
        assert!(!is_true.matches(Some("false")));
    }

    #[test]
    fn test_missing_column_fails_then_negation_flips() {
        let filter = compiled(OperatorKind::Equals, json!("x"));
        assert!(!filter.matches(None));

        let negated = CompiledFilter::compile(
            &QueryFilter::new("col", OperatorKind::Equals, json!("x")).negated(),
        )
        .unwrap();
        assert!(negated.matches(None));
        assert!(!negated.matches(Some("x")));
        assert!(negated.matches(Some("y")));
    }

    #[test]
    fn test_filter_serde_shape() {
        let filter: QueryFilter =
            serde_json::from_str(r#"{"column":"age","operator":"greater_than","operand":21}"#)
                .unwrap();
        assert_eq!(filter.kind, OperatorKind::GreaterThan);
        assert!(!filter.negated);
        assert_eq!(filter.operand, json!(21));
    }
}
