//! Delimited-text codec for rowsieve
//!
//! Decodes comma-separated text into an ordered sequence of records and
//! encodes the inverse.
//!
//! # Design Principles
//!
//! - All values are strings after decode; typing is transient
//! - Decode is all-or-nothing (no partial documents)
//! - Records are shaped to the header: short rows pad, long rows truncate
//! - Unicode text semantics throughout (never byte indexing)
//!
//! # Invariants Enforced
//!
//! - `decode(encode(decode(x)))` value-equals `decode(x)` for valid `x`
//! - Blank lines never produce empty records
//! - Duplicate header names collapse to one key, last value wins

mod errors;
mod reader;
mod record;
mod writer;

pub use errors::{DecodeError, DecodeResult};
pub use reader::decode;
pub use record::{Document, Record};
pub use writer::encode;
