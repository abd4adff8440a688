use std::collections::HashMap;

use crate::node::{ElementKind, Node};

/// Resolved node registry: an arena of nodes in registry order plus an
/// index from node id to arena slot.
#[derive(Debug, Clone, Default)]
pub struct ProcessGraph {
  nodes: Vec<Node>,
  index: HashMap<String, usize>,
}

impl ProcessGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a node. Returns `false` and leaves the graph untouched if a node
  /// with the same id is already registered.
  pub fn insert(&mut self, node: Node) -> bool {
    if self.index.contains_key(&node.id) {
      return false;
    }
    self.index.insert(node.id.clone(), self.nodes.len());
    self.nodes.push(node);
    true
  }

  /// Get a node by ID.
  pub fn get(&self, node_id: &str) -> Option<&Node> {
    self.index.get(node_id).map(|&slot| &self.nodes[slot])
  }

  pub fn contains(&self, node_id: &str) -> bool {
    self.index.contains_key(node_id)
  }

  /// Iterate nodes in registry order.
  pub fn iter(&self) -> impl Iterator<Item = &Node> {
    self.nodes.iter()
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// All start events, in registry order.
  pub fn start_events(&self) -> Vec<&Node> {
    self
      .nodes
      .iter()
      .filter(|node| node.element_kind() == ElementKind::StartEvent)
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::NodeKind;

  fn node(id: &str, kind: NodeKind, outgoing: &[&str]) -> Node {
    Node {
      id: id.to_string(),
      name: None,
      kind,
      expression: None,
      outgoing: outgoing.iter().map(|s| s.to_string()).collect(),
    }
  }

  #[test]
  fn test_insert_keeps_registry_order() {
    let mut graph = ProcessGraph::new();
    graph.insert(node("start", NodeKind::StartEvent { message: false }, &["a"]));
    graph.insert(node("a", NodeKind::Task { error_route: None }, &[]));

    let ids: Vec<&str> = graph.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["start", "a"]);
    assert_eq!(graph.len(), 2);
    assert!(graph.contains("a"));
  }

  #[test]
  fn test_insert_rejects_duplicate_id() {
    let mut graph = ProcessGraph::new();
    assert!(graph.insert(node("a", NodeKind::Task { error_route: None }, &[])));
    assert!(!graph.insert(node("a", NodeKind::ServiceTask { error_route: None }, &[])));

    assert_eq!(graph.len(), 1);
    assert!(matches!(graph.get("a").unwrap().kind, NodeKind::Task { .. }));
  }

  #[test]
  fn test_start_events() {
    let mut graph = ProcessGraph::new();
    graph.insert(node("s1", NodeKind::StartEvent { message: false }, &[]));
    graph.insert(node("t", NodeKind::Task { error_route: None }, &[]));
    graph.insert(node("s2", NodeKind::StartEvent { message: true }, &[]));

    let starts: Vec<&str> = graph.start_events().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(starts, vec!["s1", "s2"]);
  }
}
