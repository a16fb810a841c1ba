//! Observability for rowsieve
//!
//! Structured JSON logging for the query facade.
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on filtering
//! 2. Synchronous, unbuffered, one line per event
//! 3. Deterministic output (alphabetical field ordering)
//! 4. Nothing in the codec/interpreter/engine hot paths logs

mod logger;

pub use logger::{Logger, Severity};
