use std::collections::HashMap;

use sagaflow_diagram::{Association, SequenceFlow, TextAnnotation};

/// Sequence flows by id. The first flow wins when ids repeat.
pub(crate) struct FlowIndex<'a> {
  flows: HashMap<&'a str, &'a SequenceFlow>,
}

impl<'a> FlowIndex<'a> {
  pub(crate) fn new(flows: &'a [SequenceFlow]) -> Self {
    let mut index = HashMap::with_capacity(flows.len());
    for flow in flows {
      index.entry(flow.id.as_str()).or_insert(flow);
    }
    Self { flows: index }
  }

  /// Target node id of a flow.
  pub(crate) fn target(&self, flow_id: &str) -> Option<&'a str> {
    self.flows.get(flow_id).map(|flow| flow.target_ref.as_str())
  }
}

/// Outcome of looking up a node's annotation.
#[derive(Debug, PartialEq)]
pub(crate) enum AnnotationLookup<'a> {
  /// No association starts at this node, or the annotation has no text.
  Absent,
  Text(&'a str),
  /// The node's association targets an annotation that does not exist.
  Missing { annotation_id: &'a str },
}

/// Annotation text by associated node id.
///
/// Only the first association of a node is followed.
pub(crate) struct AnnotationIndex<'a> {
  texts: HashMap<&'a str, Option<&'a str>>,
  by_source: HashMap<&'a str, &'a str>,
}

impl<'a> AnnotationIndex<'a> {
  pub(crate) fn new(associations: &'a [Association], annotations: &'a [TextAnnotation]) -> Self {
    let mut texts = HashMap::with_capacity(annotations.len());
    for annotation in annotations {
      texts
        .entry(annotation.id.as_str())
        .or_insert(annotation.text.as_deref());
    }

    let mut by_source = HashMap::with_capacity(associations.len());
    for association in associations {
      by_source
        .entry(association.source_ref.as_str())
        .or_insert(association.target_ref.as_str());
    }

    Self { texts, by_source }
  }

  pub(crate) fn lookup(&self, node_id: &str) -> AnnotationLookup<'a> {
    let Some(&annotation_id) = self.by_source.get(node_id) else {
      return AnnotationLookup::Absent;
    };
    match self.texts.get(annotation_id) {
      None => AnnotationLookup::Missing { annotation_id },
      Some(text) => text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map_or(AnnotationLookup::Absent, AnnotationLookup::Text),
    }
  }
}
