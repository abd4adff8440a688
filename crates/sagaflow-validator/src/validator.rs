use sagaflow_diagram::Diagram;
use sagaflow_expression::{Harness, Invocation};
use sagaflow_graph::{Node, NodeKind, ProcessGraph};
use sagaflow_resolver::{Normalizer, ResolveOptions};
use tracing::debug;

use crate::error::Rejection;
use crate::tag::is_action_tag;
use crate::verdict::Verdict;

/// A resolved graph that passed validation.
///
/// Only [`Validator::validate`] constructs one, so holding a
/// `ValidatedGraph` means the checks ran and passed.
#[derive(Debug, Clone)]
pub struct ValidatedGraph {
  graph: ProcessGraph,
  start: Node,
}

impl ValidatedGraph {
  pub fn graph(&self) -> &ProcessGraph {
    &self.graph
  }

  /// The single start event.
  pub fn start(&self) -> &Node {
    &self.start
  }
}

/// Validates diagrams against the structural and expression rules.
#[derive(Debug, Clone, Default)]
pub struct Validator {
  normalizer: Normalizer,
}

impl Validator {
  pub fn new(options: ResolveOptions) -> Self {
    Self {
      normalizer: Normalizer::new(options),
    }
  }

  /// Validate a diagram, returning the checked graph or the first violation.
  pub fn validate(&self, diagram: &Diagram) -> Result<ValidatedGraph, Rejection> {
    let graph = self.normalizer.normalize(diagram)?;

    for node in graph.iter() {
      check_expression(node)?;
    }

    let start = match graph.start_events().as_slice() {
      [] => return Err(Rejection::NoStartEvent),
      [start] => (*start).clone(),
      _ => return Err(Rejection::MultipleStartEvents),
    };

    if let NodeKind::StartEvent { message: true } = start.kind {
      let tag = start.expression().ok_or(Rejection::MissingActionType)?;
      if !is_action_tag(tag) {
        return Err(Rejection::MalformedActionType {
          tag: tag.to_string(),
        });
      }
    }

    debug!(nodes = graph.len(), start = %start.id, "diagram validated");

    Ok(ValidatedGraph { graph, start })
  }

  /// Validate a diagram and report the outcome as a [`Verdict`].
  pub fn check(&self, diagram: &Diagram) -> Verdict {
    let verdict = Verdict::from(self.validate(diagram));
    if let Some(reason) = &verdict.reason {
      debug!(%reason, "diagram rejected");
    }
    verdict
  }
}

/// Presence, then syntax, of a node's expression.
fn check_expression(node: &Node) -> Result<(), Rejection> {
  let Some(text) = node.expression() else {
    if node.is_plain_event() {
      return Ok(());
    }
    return Err(Rejection::MissingExpression {
      node_id: node.id.clone(),
    });
  };

  let Some(harness) = Harness::for_node(node) else {
    return Ok(());
  };

  sagaflow_expression::check(text, harness).map_err(|err| Rejection::InvalidExpression {
    node_id: node.id.clone(),
    message: err.to_string(),
  })?;

  // A task awaits its last statement, so that statement must be an expression.
  if matches!(node.kind, NodeKind::Task { .. }) && Invocation::split(text).is_none() {
    return Err(Rejection::InvalidExpression {
      node_id: node.id.clone(),
      message: "task must end with an expression to await".to_string(),
    });
  }

  Ok(())
}
