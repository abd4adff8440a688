use serde::Deserialize;

use crate::element::{EventElement, GatewayElement, ServiceTaskElement, TaskElement};
use crate::error::DiagramError;
use crate::flow::{Association, SequenceFlow, TextAnnotation};

/// A process definition: node buckets keyed by element kind plus the
/// structural buckets that connect and annotate them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Process {
  #[serde(rename = "@id", default)]
  pub id: Option<String>,
  #[serde(rename = "bpmn:startEvent", alias = "startEvent", default)]
  pub start_events: Vec<EventElement>,
  #[serde(rename = "bpmn:endEvent", alias = "endEvent", default)]
  pub end_events: Vec<EventElement>,
  #[serde(rename = "bpmn:task", alias = "task", default)]
  pub tasks: Vec<TaskElement>,
  #[serde(rename = "bpmn:serviceTask", alias = "serviceTask", default)]
  pub service_tasks: Vec<ServiceTaskElement>,
  #[serde(rename = "bpmn:exclusiveGateway", alias = "exclusiveGateway", default)]
  pub exclusive_gateways: Vec<GatewayElement>,
  #[serde(rename = "bpmn:sequenceFlow", alias = "sequenceFlow", default)]
  pub sequence_flows: Vec<SequenceFlow>,
  #[serde(rename = "bpmn:textAnnotation", alias = "textAnnotation", default)]
  pub text_annotations: Vec<TextAnnotation>,
  #[serde(rename = "bpmn:association", alias = "association", default)]
  pub associations: Vec<Association>,
}

impl Process {
  /// Number of records across all node buckets.
  pub fn node_count(&self) -> usize {
    self.start_events.len()
      + self.end_events.len()
      + self.tasks.len()
      + self.service_tasks.len()
      + self.exclusive_gateways.len()
  }
}

/// Root container holding one process definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Diagram {
  #[serde(rename = "bpmn:process", alias = "process")]
  pub process: Process,
}

impl Diagram {
  /// Parse a diagram from BPMN 2.0 XML.
  ///
  /// Element and attribute names are matched with or without their
  /// namespace prefix. Unknown elements (diagram interchange, incoming
  /// references, extension elements) are ignored.
  pub fn from_xml(xml: &str) -> Result<Self, DiagramError> {
    Ok(quick_xml::de::from_str(xml)?)
  }
}
