//! # Query Execution
//!
//! One synchronous pass per request: guard the source size, compile every
//! filter clause, decode, match, page, project, and answer with counts and
//! stage timings. Filter semantics (trimming, case sensitivity, the
//! missing-column rules) are the codec/interpreter/engine conventions; this
//! layer adds the structured vocabulary, the OR combinator, paging, and
//! projection on top.

use std::time::Instant;

use super::errors::{QueryError, QueryResult};
use super::filter::CompiledFilter;
use super::request::{Combinator, QueryRequest};
use super::response::{QueryResponse, QueryTiming};
use crate::codec::{decode, Document, Record};
use crate::observability::Logger;

/// Execute a structured filter request against one source text.
///
/// Operand shape problems reject the whole request before any row is
/// examined; this is the facade's eager counterpart to the engine's
/// per-record degradation of malformed textual conditions.
pub fn execute(source: &str, request: &QueryRequest) -> QueryResult<QueryResponse> {
    let started = Instant::now();

    if let Some(limit) = request.max_source_bytes {
        if source.len() > limit {
            return Err(QueryError::SourceTooLarge {
                actual: source.len(),
                limit,
            });
        }
    }

    let compiled = request
        .filters
        .iter()
        .map(CompiledFilter::compile)
        .collect::<QueryResult<Vec<_>>>()?;

    let parse_started = Instant::now();
    let document = decode(source)?;
    let parse_ms = elapsed_ms(parse_started);

    let schema = document.columns();
    // Clauses on columns the document does not have at all are inert. A
    // request whose clauses are all inert leaves the record set unchanged.
    let applicable: Vec<&CompiledFilter> = compiled
        .iter()
        .filter(|filter| schema.iter().any(|known| *known == filter.column))
        .collect();

    let filter_started = Instant::now();
    let matched: Vec<&Record> = document
        .records()
        .iter()
        .filter(|record| record_matches(record, &applicable, request.combinator))
        .collect();
    let filter_ms = elapsed_ms(filter_started);

    let filtered_rows = matched.len();
    let rows: Vec<Record> = matched
        .into_iter()
        .skip(request.offset)
        .take(request.limit.unwrap_or(usize::MAX))
        .map(|record| project(record, request.columns.as_deref()))
        .collect();

    let columns = match &request.columns {
        Some(projection) => projection.clone(),
        None => schema,
    };

    let timing = QueryTiming {
        parse_ms,
        filter_ms,
        total_ms: elapsed_ms(started),
    };
    log_query(&document, filtered_rows, rows.len(), &timing);

    Ok(QueryResponse {
        rows,
        total_rows: document.len(),
        filtered_rows,
        columns,
        timing,
    })
}

fn record_matches(
    record: &Record,
    filters: &[&CompiledFilter],
    combinator: Combinator,
) -> bool {
    if filters.is_empty() {
        return true;
    }
    match combinator {
        Combinator::And => filters
            .iter()
            .all(|filter| filter.matches(record.get(&filter.column))),
        Combinator::Or => filters
            .iter()
            .any(|filter| filter.matches(record.get(&filter.column))),
    }
}

/// Shape one matching record for the response. Requested columns a record
/// lacks project as empty strings, mirroring how the export path encodes
/// missing fields.
fn project(record: &Record, columns: Option<&[String]>) -> Record {
    match columns {
        None => record.clone(),
        Some(columns) => columns
            .iter()
            .map(|column| {
                (
                    column.clone(),
                    record.get(column).unwrap_or("").to_string(),
                )
            })
            .collect(),
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

fn log_query(document: &Document, filtered_rows: usize, returned: usize, timing: &QueryTiming) {
    let filter_ms = format!("{:.3}", timing.filter_ms);
    let filtered = filtered_rows.to_string();
    let parse_ms = format!("{:.3}", timing.parse_ms);
    let returned = returned.to_string();
    let total_ms = format!("{:.3}", timing.total_ms);
    let total = document.len().to_string();
    Logger::info(
        "query_executed",
        &[
            ("filter_ms", filter_ms.as_str()),
            ("filtered_rows", filtered.as_str()),
            ("parse_ms", parse_ms.as_str()),
            ("returned_rows", returned.as_str()),
            ("total_ms", total_ms.as_str()),
            ("total_rows", total.as_str()),
        ],
    );
}
