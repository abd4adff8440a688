use serde::Deserialize;

/// A directed edge between two nodes, identified independently of them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SequenceFlow {
  #[serde(rename = "@id")]
  pub id: String,
  #[serde(rename = "@sourceRef")]
  pub source_ref: String,
  #[serde(rename = "@targetRef")]
  pub target_ref: String,
}

/// A free-text note. Its text is a fallback expression source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextAnnotation {
  #[serde(rename = "@id")]
  pub id: String,
  #[serde(rename = "bpmn:text", alias = "text", default)]
  pub text: Option<String>,
}

/// Links a node (source) to a text annotation (target).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Association {
  #[serde(rename = "@id", default)]
  pub id: Option<String>,
  #[serde(rename = "@sourceRef")]
  pub source_ref: String,
  #[serde(rename = "@targetRef")]
  pub target_ref: String,
}
