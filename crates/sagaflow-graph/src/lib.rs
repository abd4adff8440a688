//! Sagaflow Graph
//!
//! This crate provides the resolved representation of a process diagram.
//! A resolved graph is what the resolver builds from a raw diagram:
//!
//! - Every node is tagged with its kind
//! - Expression text is resolved (inline source first, then annotation)
//! - Outgoing sequence flows are resolved to target node ids
//! - Default flows are split out as the gateway "otherwise" branch or the
//!   task error route
//!
//! The graph is transient: it is rebuilt for every validation or emission pass.

mod graph;
mod node;

pub use graph::ProcessGraph;
pub use node::{ElementKind, Node, NodeKind};
