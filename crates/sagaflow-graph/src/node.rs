use std::fmt;

use serde::{Deserialize, Serialize};

/// The element kind a node was tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
  StartEvent,
  EndEvent,
  Task,
  ServiceTask,
  ExclusiveGateway,
}

impl ElementKind {
  /// All node kinds, in registry order.
  pub const ALL: [ElementKind; 5] = [
    ElementKind::StartEvent,
    ElementKind::EndEvent,
    ElementKind::Task,
    ElementKind::ServiceTask,
    ElementKind::ExclusiveGateway,
  ];

  /// The BPMN element name for this kind.
  pub fn as_str(&self) -> &'static str {
    match self {
      ElementKind::StartEvent => "startEvent",
      ElementKind::EndEvent => "endEvent",
      ElementKind::Task => "task",
      ElementKind::ServiceTask => "serviceTask",
      ElementKind::ExclusiveGateway => "exclusiveGateway",
    }
  }
}

impl fmt::Display for ElementKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Kind-specific data of a resolved node.
///
/// Only events carry a message-trigger flag, and only gateways and tasks
/// carry a default target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
  StartEvent {
    message: bool,
  },
  EndEvent {
    message: bool,
  },
  Task {
    /// Target taken when the invocation fails.
    error_route: Option<String>,
  },
  ServiceTask {
    /// Target taken when the script fails.
    error_route: Option<String>,
  },
  ExclusiveGateway {
    /// Target taken when the condition is false.
    otherwise: Option<String>,
  },
}

impl NodeKind {
  pub fn element_kind(&self) -> ElementKind {
    match self {
      NodeKind::StartEvent { .. } => ElementKind::StartEvent,
      NodeKind::EndEvent { .. } => ElementKind::EndEvent,
      NodeKind::Task { .. } => ElementKind::Task,
      NodeKind::ServiceTask { .. } => ElementKind::ServiceTask,
      NodeKind::ExclusiveGateway { .. } => ElementKind::ExclusiveGateway,
    }
  }
}

/// A resolved node in a process graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
  pub id: String,
  pub name: Option<String>,
  pub kind: NodeKind,
  /// Resolved expression text, if any source provided one.
  pub expression: Option<String>,
  /// Ordinary targets in recorded order. Never contains the default target.
  pub outgoing: Vec<String>,
}

impl Node {
  pub fn element_kind(&self) -> ElementKind {
    self.kind.element_kind()
  }

  /// The default target: the gateway's otherwise branch or the task's error route.
  pub fn default_target(&self) -> Option<&str> {
    match &self.kind {
      NodeKind::Task { error_route } | NodeKind::ServiceTask { error_route } => {
        error_route.as_deref()
      }
      NodeKind::ExclusiveGateway { otherwise } => otherwise.as_deref(),
      NodeKind::StartEvent { .. } | NodeKind::EndEvent { .. } => None,
    }
  }

  /// Whether this is a message-triggered start or end event.
  pub fn is_message_event(&self) -> bool {
    matches!(
      self.kind,
      NodeKind::StartEvent { message: true } | NodeKind::EndEvent { message: true }
    )
  }

  /// Whether this is a start or end event without a message trigger.
  ///
  /// These are the only nodes that need no expression.
  pub fn is_plain_event(&self) -> bool {
    matches!(
      self.kind,
      NodeKind::StartEvent { message: false } | NodeKind::EndEvent { message: false }
    )
  }

  /// Resolved expression text, treating blank text as absent.
  pub fn expression(&self) -> Option<&str> {
    self
      .expression
      .as_deref()
      .map(str::trim)
      .filter(|text| !text.is_empty())
  }

  /// Key under which this node's result or error is stored in the context.
  pub fn context_key(&self) -> &str {
    self.name.as_deref().unwrap_or(&self.id)
  }
}
