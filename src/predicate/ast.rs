//! Condition grammar and compilation
//!
//! A condition is a leading operator keyword or symbol followed by its
//! operand(s):
//!
//! ```text
//! = NYC        == "New York"       != NYC
//! > 21         >= 21               < 65          <= 65
//! BETWEEN 20 AND 30
//! IN (John, 'Jane', "Bob")
//! ```
//!
//! Whitespace around the condition and each operand is insignificant;
//! whitespace inside quoted operands is significant. Compilation is total:
//! text matching no recognized form compiles to [`Operator::Malformed`],
//! which evaluation reports as a syntax error.

use super::errors::ConditionSyntaxError;

/// Exhaustive operator set for the condition mini-language
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Exact, case-sensitive string equality
    Equals(String),
    /// Exact, case-sensitive string inequality
    NotEquals(String),
    /// Numeric `>`; `None` bound means the operand was not numeric
    GreaterThan(Option<f64>),
    /// Numeric `<`; `None` bound means the operand was not numeric
    LessThan(Option<f64>),
    /// Numeric `>=`; `None` bound means the operand was not numeric
    GreaterOrEqual(Option<f64>),
    /// Numeric `<=`; `None` bound means the operand was not numeric
    LessOrEqual(Option<f64>),
    /// Inclusive numeric range
    Between(f64, f64),
    /// Exact, case-sensitive membership
    In(Vec<String>),
    /// Unrecognized condition text, reported at evaluation time
    Malformed(ConditionSyntaxError),
}

/// A compiled condition: empty text (vacuously true for any value) or one
/// operator.
///
/// Compiling is how callers that evaluate the same condition against many
/// values avoid re-parsing the text per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub(super) operator: Option<Operator>,
}

impl Condition {
    /// Compile condition text. Never fails; malformed text surfaces as a
    /// syntax error when the condition is evaluated.
    pub fn compile(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self { operator: None };
        }
        Self {
            operator: Some(parse_operator(text).unwrap_or_else(Operator::Malformed)),
        }
    }

    /// The compiled operator, or `None` for an empty condition
    pub fn operator(&self) -> Option<&Operator> {
        self.operator.as_ref()
    }

    /// Whether evaluation would report a syntax error
    pub fn is_malformed(&self) -> bool {
        matches!(self.operator, Some(Operator::Malformed(_)))
    }

    /// Exact-equality condition
    pub fn equals(operand: impl Into<String>) -> Self {
        Self {
            operator: Some(Operator::Equals(operand.into())),
        }
    }

    /// Exact-inequality condition
    pub fn not_equals(operand: impl Into<String>) -> Self {
        Self {
            operator: Some(Operator::NotEquals(operand.into())),
        }
    }

    /// Numeric `>` condition
    pub fn greater_than(bound: Option<f64>) -> Self {
        Self {
            operator: Some(Operator::GreaterThan(bound)),
        }
    }

    /// Numeric `<` condition
    pub fn less_than(bound: Option<f64>) -> Self {
        Self {
            operator: Some(Operator::LessThan(bound)),
        }
    }

    /// Numeric `>=` condition
    pub fn greater_or_equal(bound: Option<f64>) -> Self {
        Self {
            operator: Some(Operator::GreaterOrEqual(bound)),
        }
    }

    /// Numeric `<=` condition
    pub fn less_or_equal(bound: Option<f64>) -> Self {
        Self {
            operator: Some(Operator::LessOrEqual(bound)),
        }
    }

    /// Inclusive numeric range condition
    pub fn between(low: f64, high: f64) -> Self {
        Self {
            operator: Some(Operator::Between(low, high)),
        }
    }

    /// Membership condition. Empty candidates are dropped; they can never
    /// match because the candidate value is compared after trimming.
    pub fn in_list(candidates: Vec<String>) -> Self {
        Self {
            operator: Some(Operator::In(
                candidates.into_iter().filter(|c| !c.is_empty()).collect(),
            )),
        }
    }
}

fn parse_operator(text: &str) -> Result<Operator, ConditionSyntaxError> {
    // two-character symbols before their one-character prefixes
    if let Some(rest) = text.strip_prefix("==") {
        return Ok(Operator::Equals(equality_operand(rest)));
    }
    if let Some(rest) = text.strip_prefix("!=") {
        return Ok(Operator::NotEquals(equality_operand(rest)));
    }
    if let Some(rest) = text.strip_prefix(">=") {
        return Ok(Operator::GreaterOrEqual(numeric_operand(rest)));
    }
    if let Some(rest) = text.strip_prefix("<=") {
        return Ok(Operator::LessOrEqual(numeric_operand(rest)));
    }
    if let Some(rest) = text.strip_prefix('=') {
        return Ok(Operator::Equals(equality_operand(rest)));
    }
    if let Some(rest) = text.strip_prefix('>') {
        return Ok(Operator::GreaterThan(numeric_operand(rest)));
    }
    if let Some(rest) = text.strip_prefix('<') {
        return Ok(Operator::LessThan(numeric_operand(rest)));
    }
    if let Some(rest) = strip_keyword(text, "BETWEEN") {
        return parse_between(rest);
    }
    if let Some(rest) = strip_keyword(text, "IN") {
        return parse_in(rest);
    }
    Err(ConditionSyntaxError::UnknownOperator {
        condition: text.to_string(),
    })
}

/// Equality operands shed one layer of surrounding quotes, so `= "NYC"`
/// and `= NYC` compare against the same text
fn equality_operand(rest: &str) -> String {
    strip_quotes(rest.trim()).to_string()
}

/// Ordering operands parse as numbers up front; a non-numeric operand
/// leaves ordering undefined and the operator permissively true
fn numeric_operand(rest: &str) -> Option<f64> {
    rest.trim().parse::<f64>().ok()
}

/// Strip a leading ASCII keyword case-insensitively, requiring it to be
/// followed by whitespace, `(`, or end of text
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    if text.len() < keyword.len() || !text.is_char_boundary(keyword.len()) {
        return None;
    }
    let (head, rest) = text.split_at(keyword.len());
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() || c == '(' => Some(rest),
        _ => None,
    }
}

fn parse_between(rest: &str) -> Result<Operator, ConditionSyntaxError> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    match tokens.as_slice() {
        [low, and, high] if and.eq_ignore_ascii_case("AND") => Ok(Operator::Between(
            numeric_bound(low)?,
            numeric_bound(high)?,
        )),
        _ => Err(ConditionSyntaxError::MalformedBetween {
            operand: rest.trim().to_string(),
        }),
    }
}

fn numeric_bound(token: &str) -> Result<f64, ConditionSyntaxError> {
    token
        .parse::<f64>()
        .map_err(|_| ConditionSyntaxError::NonNumericBound {
            bound: token.to_string(),
        })
}

fn parse_in(rest: &str) -> Result<Operator, ConditionSyntaxError> {
    let rest = rest.trim();
    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| ConditionSyntaxError::MalformedIn {
            operand: rest.to_string(),
        })?;
    Ok(Operator::In(split_candidates(inner)))
}

/// Split an IN list on commas outside quotes. Members may be bare,
/// single-quoted, or double-quoted, with styles mixed freely; bare members
/// are trimmed, quoted members keep their inner whitespace.
fn split_candidates(inner: &str) -> Vec<String> {
    let mut raw_members = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;
    for c in inner.chars() {
        match in_quote {
            Some(q) if c == q => {
                in_quote = None;
                current.push(c);
            }
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    in_quote = Some(c);
                    current.push(c);
                }
                ',' => raw_members.push(std::mem::take(&mut current)),
                _ => current.push(c),
            },
        }
    }
    raw_members.push(current);

    raw_members
        .iter()
        .map(|member| strip_quotes(member.trim()).to_string())
        .filter(|member| !member.is_empty())
        .collect()
}

/// Strip one layer of matching surrounding quotes, if present
fn strip_quotes(operand: &str) -> &str {
    let mut chars = operand.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last))
            if first == last && (first == '\'' || first == '"') =>
        {
            &operand[1..operand.len() - 1]
        }
        _ => operand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_empty_condition() {
        assert_eq!(Condition::compile("").operator(), None);
        assert_eq!(Condition::compile("   ").operator(), None);
    }

    #[test]
    fn test_compile_equality_forms() {
        assert_eq!(
            Condition::compile("= NYC").operator(),
            Some(&Operator::Equals("NYC".to_string()))
        );
        assert_eq!(
            Condition::compile("== NYC").operator(),
            Some(&Operator::Equals("NYC".to_string()))
        );
        assert_eq!(
            Condition::compile("!= NYC").operator(),
            Some(&Operator::NotEquals("NYC".to_string()))
        );
    }

    #[test]
    fn test_compile_equality_strips_one_quote_layer() {
        assert_eq!(
            Condition::compile("= \"New York\"").operator(),
            Some(&Operator::Equals("New York".to_string()))
        );
        assert_eq!(
            Condition::compile("= 'New York'").operator(),
            Some(&Operator::Equals("New York".to_string()))
        );
        // one layer only
        assert_eq!(
            Condition::compile("= \"'NYC'\"").operator(),
            Some(&Operator::Equals("'NYC'".to_string()))
        );
    }

    #[test]
    fn test_compile_ordering_operators() {
        assert_eq!(
            Condition::compile(">= 21").operator(),
            Some(&Operator::GreaterOrEqual(Some(21.0)))
        );
        assert_eq!(
            Condition::compile("< -0.5").operator(),
            Some(&Operator::LessThan(Some(-0.5)))
        );
    }

    #[test]
    fn test_compile_ordering_non_numeric_operand() {
        assert_eq!(
            Condition::compile("> Jane").operator(),
            Some(&Operator::GreaterThan(None))
        );
    }

    #[test]
    fn test_compile_between() {
        assert_eq!(
            Condition::compile("BETWEEN 20 AND 30").operator(),
            Some(&Operator::Between(20.0, 30.0))
        );
        // keywords are case-insensitive
        assert_eq!(
            Condition::compile("between 20 and 30").operator(),
            Some(&Operator::Between(20.0, 30.0))
        );
    }

    #[test]
    fn test_compile_between_missing_and_is_malformed() {
        let condition = Condition::compile("BETWEEN 20 30");
        assert!(condition.is_malformed());
    }

    #[test]
    fn test_compile_between_missing_bound_is_malformed() {
        assert!(Condition::compile("BETWEEN 20 AND").is_malformed());
        assert!(Condition::compile("BETWEEN").is_malformed());
    }

    #[test]
    fn test_compile_between_non_numeric_bound_is_malformed() {
        assert!(Condition::compile("BETWEEN x AND 30").is_malformed());
    }

    #[test]
    fn test_compile_in_mixed_quote_styles() {
        assert_eq!(
            Condition::compile("IN (John, 'Jane', \"Bob\")").operator(),
            Some(&Operator::In(vec![
                "John".to_string(),
                "Jane".to_string(),
                "Bob".to_string(),
            ]))
        );
    }

    #[test]
    fn test_compile_in_quoted_member_keeps_comma_and_whitespace() {
        assert_eq!(
            Condition::compile("IN ('a,b', ' c ')").operator(),
            Some(&Operator::In(vec!["a,b".to_string(), " c ".to_string()]))
        );
    }

    #[test]
    fn test_compile_in_drops_empty_members() {
        assert_eq!(
            Condition::compile("IN (, '', a)").operator(),
            Some(&Operator::In(vec!["a".to_string()]))
        );
        assert_eq!(
            Condition::compile("IN ()").operator(),
            Some(&Operator::In(Vec::new()))
        );
    }

    #[test]
    fn test_compile_in_without_parens_is_malformed() {
        assert!(Condition::compile("IN John, Jane").is_malformed());
    }

    #[test]
    fn test_compile_unknown_operator_is_malformed() {
        assert!(Condition::compile("NYC").is_malformed());
        assert!(Condition::compile("LIKE %son").is_malformed());
        // keyword prefixes of unrelated words stay unrecognized
        assert!(Condition::compile("INCLUDES x").is_malformed());
        assert!(Condition::compile("BETWEENISH 1 AND 2").is_malformed());
    }

    #[test]
    fn test_constructor_in_list_drops_empty_candidates() {
        let condition = Condition::in_list(vec!["".to_string(), "a".to_string()]);
        assert_eq!(
            condition.operator(),
            Some(&Operator::In(vec!["a".to_string()]))
        );
    }
}
