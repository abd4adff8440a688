//! Sagaflow Validator
//!
//! Checks a diagram before it is compiled. Validation re-runs normalization
//! and then enforces, in a fixed order with the first failure winning:
//!
//! 1. every node that needs an expression has one
//! 2. every expression parses inside its kind's harness
//! 3. there is exactly one start event
//! 4. a message start event carries a well-formed action tag
//!
//! A successful validation yields a [`ValidatedGraph`], the only input the
//! checked emission path accepts.

mod error;
mod tag;
mod validator;
mod verdict;

pub use error::Rejection;
pub use tag::is_action_tag;
pub use validator::{ValidatedGraph, Validator};
pub use verdict::Verdict;
