use sagaflow_graph::{Node, NodeKind};
use syn::{Block, Expr};

use crate::error::ExpressionError;

/// Minimal syntactic context an expression is parsed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Harness {
  /// A boolean condition: `if (<text>) { x = 1; }`.
  Condition,
  /// Bare statements: `<text>`.
  Statements,
  /// The right-hand side of an assignment: `x = (<text>);`.
  Assignment,
}

impl Harness {
  /// The harness for a node's expression, or `None` when the kind carries
  /// no parseable expression (plain events, message start tags).
  pub fn for_node(node: &Node) -> Option<Harness> {
    match node.kind {
      NodeKind::ExclusiveGateway { .. } => Some(Harness::Condition),
      NodeKind::Task { .. } | NodeKind::ServiceTask { .. } => Some(Harness::Statements),
      NodeKind::EndEvent { message: true } => Some(Harness::Assignment),
      NodeKind::StartEvent { .. } | NodeKind::EndEvent { message: false } => None,
    }
  }

  /// Wrap `text` into a parseable block.
  fn wrap(&self, text: &str) -> String {
    match self {
      Harness::Condition => format!("{{ if ({text}) {{ x = 1; }} }}"),
      Harness::Statements => format!("{{ {text} }}"),
      Harness::Assignment => format!("{{ x = ({text}); }}"),
    }
  }
}

/// Parse expression text inside its harness.
///
/// Condition and assignment text must be a single expression on its own, so
/// it cannot close the harness early and reopen it.
pub fn parse(text: &str, harness: Harness) -> Result<Block, ExpressionError> {
  if matches!(harness, Harness::Condition | Harness::Assignment) {
    syn::parse_str::<Expr>(text)?;
  }
  Ok(syn::parse_str::<Block>(&harness.wrap(text))?)
}

/// Check that expression text is syntactically valid inside its harness.
pub fn check(text: &str, harness: Harness) -> Result<(), ExpressionError> {
  parse(text, harness).map(|_| ())
}
