//! Filter application over decoded documents

use std::collections::HashMap;

use crate::codec::{Document, Record};
use crate::predicate::Condition;

/// One filter request: column name to condition text, AND semantics
pub type FilterMap = HashMap<String, String>;

/// Apply a filter map to a document, yielding the order-preserving
/// subsequence of records matching every applicable condition.
///
/// Filters on columns the document does not have at all are inert. A record
/// missing an applicable filter's column is excluded, as is a record whose
/// evaluation hits a malformed condition; `apply` itself never fails.
pub fn apply(document: &Document, filters: &FilterMap) -> Document {
    let plan = compile_plan(document, filters);
    document
        .records()
        .iter()
        .filter(|record| matches_all(record, &plan))
        .cloned()
        .collect()
}

/// Compile each applicable condition once for this call. The plan is
/// call-local: conditions are arbitrary user-supplied text and must not
/// leak across unrelated requests.
fn compile_plan<'a>(document: &Document, filters: &'a FilterMap) -> Vec<(&'a str, Condition)> {
    let schema = document.columns();
    filters
        .iter()
        .filter(|(column, _)| schema.iter().any(|known| known == *column))
        .map(|(column, text)| (column.as_str(), Condition::compile(text)))
        .collect()
}

fn matches_all(record: &Record, plan: &[(&str, Condition)]) -> bool {
    plan.iter().all(|(column, condition)| {
        match record.get(column) {
            // A record without the filtered column is excluded outright.
            // Stricter than the interpreter's permissive non-numeric
            // fallback, and preserved exactly for compatibility.
            None => false,
            // A syntax error means this record fails this filter.
            Some(value) => condition.matches(value).unwrap_or(false),
        }
    })
}
