//! Sagaflow Expression
//!
//! Static analysis of the expression text attached to diagram nodes.
//!
//! Expressions are Rust fragments. Each node kind wraps its text in a small
//! syntactic harness before parsing, so a gateway condition is checked as a
//! condition and a task body as a sequence of statements. The same harnesses
//! are used for validation and for dependency discovery during emission.

mod analyze;
mod error;
mod harness;
mod invocation;

pub use analyze::{INVOKE_EFFECT, referenced_modules};
pub use error::ExpressionError;
pub use harness::{Harness, check, parse};
pub use invocation::Invocation;
