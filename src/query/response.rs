//! # Query Response Contract

use serde::Serialize;

use crate::codec::Record;

/// Stage timings for one query, in milliseconds
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct QueryTiming {
    /// Time spent decoding the source text
    pub parse_ms: f64,
    /// Time spent matching records against the compiled filters
    pub filter_ms: f64,
    /// Wall time for the whole call
    pub total_ms: f64,
}

/// The answer to one query
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    /// Matching records after offset/limit paging and column projection
    pub rows: Vec<Record>,
    /// Record count before filtering
    pub total_rows: usize,
    /// Matching record count before paging
    pub filtered_rows: usize,
    /// The known column set: the projection if one was requested, else the
    /// document's own columns
    pub columns: Vec<String>,
    /// Stage timings
    pub timing: QueryTiming,
}
