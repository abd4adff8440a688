//! Sagaflow Codegen
//!
//! Compiles a resolved process graph into the source of an orchestration
//! program for a cooperative-task runtime.
//!
//! ## Pipeline
//!
//! 1. **Lowering**: each node becomes a [`Procedure`] whose [`Action`] is
//!    chosen by node kind and whose [`Continuation`] is derived from its
//!    ordinary outgoing targets.
//! 2. **Rendering**: the [`Program`] is printed as Rust source against the
//!    runtime's effect vocabulary (`call`, `put`, `take_every`, `spawn`).
//!
//! The checked path ([`Emitter::emit`]) only accepts a
//! [`ValidatedGraph`](sagaflow_validator::ValidatedGraph). The unchecked path
//! ([`Emitter::emit_diagram`]) returns an empty string when the diagram does
//! not have exactly one start event.

mod config;
mod emitter;
mod lower;
mod program;
mod render;

pub use config::{ContextSharing, EmitConfig};
pub use emitter::Emitter;
pub use program::{Action, Continuation, Procedure, Program, fork_handler_name, procedure_name};
