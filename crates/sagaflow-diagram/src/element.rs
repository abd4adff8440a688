use serde::Deserialize;

/// Marker child element that makes a start or end event message-triggered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageEventDefinition {
  #[serde(rename = "@id", default)]
  pub id: Option<String>,
}

/// A start or end event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventElement {
  #[serde(rename = "@id")]
  pub id: String,
  #[serde(rename = "@name", default)]
  pub name: Option<String>,
  /// Default sequence flow id.
  #[serde(rename = "@default", default)]
  pub default: Option<String>,
  /// Action tag of a message event, e.g. "@orders/created".
  #[serde(rename = "@custom:actionType", alias = "@actionType", default)]
  pub action_type: Option<String>,
  #[serde(
    rename = "bpmn:messageEventDefinition",
    alias = "messageEventDefinition",
    default
  )]
  pub message_event_definition: Option<MessageEventDefinition>,
  /// Ids of the outgoing sequence flows, in document order.
  #[serde(rename = "bpmn:outgoing", alias = "outgoing", default)]
  pub outgoing: Vec<String>,
}

impl EventElement {
  /// Whether the event carries a message event definition.
  pub fn is_message(&self) -> bool {
    self.message_event_definition.is_some()
  }
}

/// A task whose inline expression invokes an asynchronous effect.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskElement {
  #[serde(rename = "@id")]
  pub id: String,
  #[serde(rename = "@name", default)]
  pub name: Option<String>,
  #[serde(rename = "@default", default)]
  pub default: Option<String>,
  #[serde(rename = "custom:call", alias = "call", default)]
  pub call: Option<String>,
  #[serde(rename = "bpmn:outgoing", alias = "outgoing", default)]
  pub outgoing: Vec<String>,
}

/// A service task whose inline expression is a synchronous script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceTaskElement {
  #[serde(rename = "@id")]
  pub id: String,
  #[serde(rename = "@name", default)]
  pub name: Option<String>,
  #[serde(rename = "@default", default)]
  pub default: Option<String>,
  #[serde(rename = "custom:script", alias = "script", default)]
  pub script: Option<String>,
  #[serde(rename = "bpmn:outgoing", alias = "outgoing", default)]
  pub outgoing: Vec<String>,
}

/// An exclusive gateway guarded by a boolean condition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GatewayElement {
  #[serde(rename = "@id")]
  pub id: String,
  #[serde(rename = "@name", default)]
  pub name: Option<String>,
  #[serde(rename = "@default", default)]
  pub default: Option<String>,
  #[serde(rename = "@custom:condition", alias = "@condition", default)]
  pub condition: Option<String>,
  #[serde(rename = "bpmn:outgoing", alias = "outgoing", default)]
  pub outgoing: Vec<String>,
}
