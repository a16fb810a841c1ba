//! Column profiling for rowsieve
//!
//! Derives per-column type and confidence metadata from decoded rows. The
//! output drives filter-suggestion UI only: it is best effort, never errors,
//! and enforces nothing.

mod profiler;
mod types;

pub use profiler::{profile, ColumnProfile};
pub use types::ColumnType;
