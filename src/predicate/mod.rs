//! Where-clause interpreter for rowsieve
//!
//! Evaluates one textual condition ("= NYC", "BETWEEN 20 AND 30") against
//! one candidate value.
//!
//! # Design Principles
//!
//! - Exhaustive operator sum type; no string dispatch at evaluation time
//! - Compile once, evaluate many: [`Condition::compile`] is total and cheap
//!   to reuse across rows
//! - Deliberate fallback asymmetry, preserved for compatibility: a
//!   non-numeric candidate under `>` `<` `>=` `<=` evaluates true, while a
//!   non-numeric candidate under `BETWEEN` evaluates false
//! - Structural problems are syntax errors, never silent false results

mod ast;
mod errors;
mod evaluator;

pub use ast::{Condition, Operator};
pub use errors::{ConditionResult, ConditionSyntaxError};
pub use evaluator::evaluate;
