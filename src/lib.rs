//! rowsieve - deterministic tabular-data filtering
//!
//! The filtering core of a file-management service: a delimited-text codec,
//! a textual where-clause interpreter, an AND-semantics filter engine, a
//! best-effort column profiler, and a structured query facade. Everything is
//! synchronous and operates on immutable in-memory documents; fetching source
//! bytes and persisting results belong to the surrounding application.

pub mod codec;
pub mod engine;
pub mod observability;
pub mod predicate;
pub mod profile;
pub mod query;
