use thiserror::Error;

/// Structural problems found while normalizing a diagram.
///
/// In lenient mode these are logged and the offending reference is dropped.
/// In strict mode the first one aborts normalization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
  /// An outgoing flow id has no matching sequence flow.
  #[error("no sequence flow '{flow_id}' for outgoing edge of node '{node_id}'")]
  DanglingFlow { node_id: String, flow_id: String },

  /// A node's association points at an unknown text annotation.
  #[error("node '{node_id}' is associated with unknown text annotation '{annotation_id}'")]
  MissingAnnotation {
    node_id: String,
    annotation_id: String,
  },

  /// A start or end event declares a default flow.
  #[error("event '{node_id}' cannot have a default flow")]
  DefaultOnEvent { node_id: String },

  /// Two node records share an id.
  #[error("duplicate node id: {node_id}")]
  DuplicateNodeId { node_id: String },
}
