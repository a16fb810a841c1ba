//! # Query Request Contract

use serde::{Deserialize, Serialize};

use super::filter::QueryFilter;

/// How multiple filter clauses combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    /// Every applicable clause must match (the engine's semantics)
    #[default]
    And,
    /// Any applicable clause may match
    Or,
}

/// A structured filter request against one source document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Filter clauses; an empty list matches every record
    #[serde(default)]
    pub filters: Vec<QueryFilter>,

    /// Clause combinator, AND unless stated
    #[serde(default)]
    pub combinator: Combinator,

    /// Columns to project into the response rows (None = all)
    #[serde(default)]
    pub columns: Option<Vec<String>>,

    /// Maximum number of rows to return (None = unbounded)
    #[serde(default)]
    pub limit: Option<usize>,

    /// Number of matching rows to skip before returning any
    #[serde(default)]
    pub offset: usize,

    /// Upper bound on accepted source size in bytes, enforced before decode
    #[serde(default)]
    pub max_source_bytes: Option<usize>,
}

impl QueryRequest {
    /// Request matching every record with no projection or paging
    pub fn all() -> Self {
        Self::default()
    }

    /// Request with the given filter clauses and default everything else
    pub fn with_filters(filters: Vec<QueryFilter>) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }
}
