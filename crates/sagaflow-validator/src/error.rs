use sagaflow_resolver::ResolveError;
use thiserror::Error;

/// Reasons a diagram fails validation.
///
/// The `Display` form of each variant is the reason reported to callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
  /// Strict normalization found a structural problem.
  #[error("{0}")]
  Structure(#[from] ResolveError),

  /// A node that needs an expression has none.
  #[error("{node_id} has no text annotation")]
  MissingExpression { node_id: String },

  /// A node's expression does not parse inside its harness.
  #[error("{node_id} : {message}")]
  InvalidExpression { node_id: String, message: String },

  #[error("no start event")]
  NoStartEvent,

  #[error("multiple start events")]
  MultipleStartEvents,

  #[error("message start event has no action type definition")]
  MissingActionType,

  #[error("message start event has incorrect action type definition")]
  MalformedActionType { tag: String },
}
