use sagaflow_diagram::{Diagram, EventElement, GatewayElement, ServiceTaskElement, TaskElement};
use sagaflow_graph::{ElementKind, Node, NodeKind, ProcessGraph};
use tracing::{debug, warn};

use crate::error::ResolveError;
use crate::index::{AnnotationIndex, AnnotationLookup, FlowIndex};
use crate::options::{ResolveOptions, Strictness};

/// A node record viewed independently of its bucket.
struct RawNode<'a> {
  kind: ElementKind,
  id: &'a str,
  name: Option<&'a str>,
  default: Option<&'a str>,
  outgoing: &'a [String],
  message: bool,
  /// Kind-specific inline expression source.
  inline: Option<&'a str>,
}

impl<'a> RawNode<'a> {
  fn event(kind: ElementKind, event: &'a EventElement) -> Self {
    let message = event.is_message();
    Self {
      kind,
      id: &event.id,
      name: event.name.as_deref(),
      default: event.default.as_deref(),
      outgoing: &event.outgoing,
      message,
      // The action tag only counts on message events.
      inline: event.action_type.as_deref().filter(|_| message),
    }
  }

  fn task(task: &'a TaskElement) -> Self {
    Self {
      kind: ElementKind::Task,
      id: &task.id,
      name: task.name.as_deref(),
      default: task.default.as_deref(),
      outgoing: &task.outgoing,
      message: false,
      inline: task.call.as_deref(),
    }
  }

  fn service_task(task: &'a ServiceTaskElement) -> Self {
    Self {
      kind: ElementKind::ServiceTask,
      id: &task.id,
      name: task.name.as_deref(),
      default: task.default.as_deref(),
      outgoing: &task.outgoing,
      message: false,
      inline: task.script.as_deref(),
    }
  }

  fn gateway(gateway: &'a GatewayElement) -> Self {
    Self {
      kind: ElementKind::ExclusiveGateway,
      id: &gateway.id,
      name: gateway.name.as_deref(),
      default: gateway.default.as_deref(),
      outgoing: &gateway.outgoing,
      message: false,
      inline: gateway.condition.as_deref(),
    }
  }
}

/// Builds a resolved [`ProcessGraph`] from a raw [`Diagram`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
  options: ResolveOptions,
}

impl Normalizer {
  pub fn new(options: ResolveOptions) -> Self {
    Self { options }
  }

  pub fn options(&self) -> &ResolveOptions {
    &self.options
  }

  /// Normalize a diagram into a node registry keyed by id.
  ///
  /// Nodes are registered bucket by bucket (start events, end events, tasks,
  /// service tasks, exclusive gateways), in document order within a bucket.
  pub fn normalize(&self, diagram: &Diagram) -> Result<ProcessGraph, ResolveError> {
    let process = &diagram.process;
    let flows = FlowIndex::new(&process.sequence_flows);
    let annotations = AnnotationIndex::new(&process.associations, &process.text_annotations);

    let raw_nodes = process
      .start_events
      .iter()
      .map(|event| RawNode::event(ElementKind::StartEvent, event))
      .chain(
        process
          .end_events
          .iter()
          .map(|event| RawNode::event(ElementKind::EndEvent, event)),
      )
      .chain(process.tasks.iter().map(RawNode::task))
      .chain(process.service_tasks.iter().map(RawNode::service_task))
      .chain(process.exclusive_gateways.iter().map(RawNode::gateway));

    let mut graph = ProcessGraph::new();
    for raw in raw_nodes {
      let node = self.resolve_node(&raw, &flows, &annotations)?;
      if !graph.insert(node) {
        self.degrade(ResolveError::DuplicateNodeId {
          node_id: raw.id.to_string(),
        })?;
      }
    }

    debug!(
      process_id = process.id.as_deref().unwrap_or_default(),
      nodes = graph.len(),
      "normalized diagram"
    );

    Ok(graph)
  }

  fn resolve_node(
    &self,
    raw: &RawNode<'_>,
    flows: &FlowIndex<'_>,
    annotations: &AnnotationIndex<'_>,
  ) -> Result<Node, ResolveError> {
    let expression = self.resolve_text(raw, annotations)?;
    let (outgoing, default_target) = self.resolve_outgoing(raw, flows)?;

    let kind = match raw.kind {
      ElementKind::StartEvent | ElementKind::EndEvent => {
        if default_target.is_some() {
          self.degrade(ResolveError::DefaultOnEvent {
            node_id: raw.id.to_string(),
          })?;
        }
        if raw.kind == ElementKind::StartEvent {
          NodeKind::StartEvent {
            message: raw.message,
          }
        } else {
          NodeKind::EndEvent {
            message: raw.message,
          }
        }
      }
      ElementKind::Task => NodeKind::Task {
        error_route: default_target,
      },
      ElementKind::ServiceTask => NodeKind::ServiceTask {
        error_route: default_target,
      },
      ElementKind::ExclusiveGateway => NodeKind::ExclusiveGateway {
        otherwise: default_target,
      },
    };

    Ok(Node {
      id: raw.id.to_string(),
      name: raw.name.map(str::to_string),
      kind,
      expression,
      outgoing,
    })
  }

  /// Inline expression source first, then the associated annotation.
  fn resolve_text(
    &self,
    raw: &RawNode<'_>,
    annotations: &AnnotationIndex<'_>,
  ) -> Result<Option<String>, ResolveError> {
    let inline = raw.inline.map(str::trim).filter(|text| !text.is_empty());
    if let Some(text) = inline {
      return Ok(Some(text.to_string()));
    }

    match annotations.lookup(raw.id) {
      AnnotationLookup::Text(text) => Ok(Some(text.to_string())),
      AnnotationLookup::Absent => Ok(None),
      AnnotationLookup::Missing { annotation_id } => {
        self.degrade(ResolveError::MissingAnnotation {
          node_id: raw.id.to_string(),
          annotation_id: annotation_id.to_string(),
        })?;
        Ok(None)
      }
    }
  }

  /// Map outgoing flow ids to target node ids, splitting out the default flow.
  fn resolve_outgoing(
    &self,
    raw: &RawNode<'_>,
    flows: &FlowIndex<'_>,
  ) -> Result<(Vec<String>, Option<String>), ResolveError> {
    let mut outgoing = Vec::with_capacity(raw.outgoing.len());
    let mut default_target = None;

    for flow_id in raw.outgoing {
      let flow_id = flow_id.trim();
      let Some(target) = flows.target(flow_id) else {
        self.degrade(ResolveError::DanglingFlow {
          node_id: raw.id.to_string(),
          flow_id: flow_id.to_string(),
        })?;
        continue;
      };

      if raw.default == Some(flow_id) {
        default_target = Some(target.to_string());
      } else {
        outgoing.push(target.to_string());
      }
    }

    Ok((outgoing, default_target))
  }

  /// Apply the strictness policy to a structural problem.
  fn degrade(&self, err: ResolveError) -> Result<(), ResolveError> {
    match self.options.strictness {
      Strictness::Strict => Err(err),
      Strictness::Lenient => {
        warn!(error = %err, "dropping unresolved diagram reference");
        Ok(())
      }
    }
  }
}
