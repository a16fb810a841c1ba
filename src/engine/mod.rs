//! Filter application engine for rowsieve
//!
//! Combines a per-column map of textual conditions with a decoded document,
//! producing the order-preserving subsequence of matching records.
//!
//! # Design Principles
//!
//! - AND semantics across filters; no OR combinator at this layer
//! - Per-record fault isolation: a malformed condition fails the records it
//!   is applied to, it never aborts the batch
//! - Conditions compile once per call into a call-local plan, never a
//!   process-wide cache
//!
//! # Invariants Enforced
//!
//! - A filter on a column absent from the whole document excludes nothing
//! - A filter on a column a specific record lacks excludes that record
//! - O(records x filters) with no per-row re-parsing

mod filters;

pub use filters::{apply, FilterMap};
