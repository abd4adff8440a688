use sagaflow_diagram::Diagram;
use sagaflow_resolver::{Normalizer, ResolveOptions};
use sagaflow_validator::ValidatedGraph;
use tracing::{debug, warn};

use crate::config::EmitConfig;
use crate::lower::lower;
use crate::program::Program;
use crate::render::render;

/// Emits orchestration programs from process graphs.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
  config: EmitConfig,
  normalizer: Normalizer,
}

impl Emitter {
  pub fn new(config: EmitConfig) -> Self {
    Self {
      config,
      normalizer: Normalizer::default(),
    }
  }

  /// Emitter whose unchecked path normalizes with the given options.
  pub fn with_resolve_options(config: EmitConfig, options: ResolveOptions) -> Self {
    Self {
      config,
      normalizer: Normalizer::new(options),
    }
  }

  pub fn config(&self) -> &EmitConfig {
    &self.config
  }

  /// Lower a validated graph without rendering it.
  pub fn lower(&self, validated: &ValidatedGraph) -> Program {
    lower(validated.graph(), validated.start(), &self.config)
  }

  /// Emit the program for a validated graph.
  pub fn emit(&self, validated: &ValidatedGraph) -> String {
    let program = self.lower(validated);
    debug!(
      entry = %program.entry,
      procedures = program.procedures.len(),
      imports = program.imports.len(),
      "emitting program"
    );
    render(&program, &self.config)
  }

  /// Emit directly from a diagram, skipping expression validation.
  ///
  /// Returns an empty string if the diagram cannot be normalized or does not
  /// have exactly one start event.
  pub fn emit_diagram(&self, diagram: &Diagram) -> String {
    let graph = match self.normalizer.normalize(diagram) {
      Ok(graph) => graph,
      Err(err) => {
        warn!(error = %err, "diagram could not be normalized, nothing emitted");
        return String::new();
      }
    };

    let start = match graph.start_events().as_slice() {
      [start] => (*start).clone(),
      starts => {
        warn!(count = starts.len(), "expected exactly one start event, nothing emitted");
        return String::new();
      }
    };

    let program = lower(&graph, &start, &self.config);
    render(&program, &self.config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sagaflow_diagram::{EventElement, Process, SequenceFlow, TaskElement};
  use sagaflow_resolver::Strictness;
  use sagaflow_validator::Validator;

  fn flow(id: &str, source: &str, target: &str) -> SequenceFlow {
    SequenceFlow {
      id: id.to_string(),
      source_ref: source.to_string(),
      target_ref: target.to_string(),
    }
  }

  fn start(id: &str, outgoing: &str) -> EventElement {
    EventElement {
      id: id.to_string(),
      outgoing: vec![outgoing.to_string()],
      ..Default::default()
    }
  }

  fn diagram() -> Diagram {
    Diagram {
      process: Process {
        start_events: vec![start("Start", "Flow_1")],
        tasks: vec![TaskElement {
          id: "Fetch".to_string(),
          name: Some("fetched".to_string()),
          call: Some("call(api.get_x())".to_string()),
          ..Default::default()
        }],
        sequence_flows: vec![flow("Flow_1", "Start", "Fetch")],
        ..Default::default()
      },
    }
  }

  #[test]
  fn test_emit_validated_graph() {
    let validated = Validator::default().validate(&diagram()).unwrap();
    let code = Emitter::default().emit(&validated);

    assert!(syn::parse_file(&code).is_ok(), "not valid Rust:\n{code}");
    assert!(code.contains("pub fn saga() -> BoxStep {\n    Start(Context::default())\n}"));
    assert!(code.contains("fn Start(context: Context) -> BoxStep {"));
    assert!(code.contains("// unimplemented: startEvent Start\n        Fetch(context).await\n"));
    assert!(code.contains("context.set(\"fetched\", (call(api.get_x())).await?);"));
  }

  #[test]
  fn test_emission_is_deterministic() {
    let validated = Validator::default().validate(&diagram()).unwrap();
    let emitter = Emitter::default();

    assert_eq!(emitter.emit(&validated), emitter.emit(&validated));
    assert_eq!(emitter.emit(&validated), emitter.emit_diagram(&diagram()));
  }

  #[test]
  fn test_unchecked_multiple_starts_emit_nothing() {
    let mut diagram = diagram();
    diagram.process.start_events.push(start("Other", "Flow_1"));

    assert_eq!(Emitter::default().emit_diagram(&diagram), "");
  }

  #[test]
  fn test_unchecked_no_start_emits_nothing() {
    let mut diagram = diagram();
    diagram.process.start_events.clear();

    assert_eq!(Emitter::default().emit_diagram(&diagram), "");
  }

  #[test]
  fn test_unchecked_skips_expression_checks() {
    let mut diagram = diagram();
    diagram.process.tasks[0].call = Some("call(api.get_x(".to_string());

    assert!(Validator::default().validate(&diagram).is_err());
    let code = Emitter::default().emit_diagram(&diagram);
    assert!(code.contains("(call(api.get_x().await?"));
  }

  #[test]
  fn test_strict_normalization_failure_emits_nothing() {
    let mut diagram = diagram();
    diagram.process.tasks[0].outgoing = vec!["Flow_missing".to_string()];

    let lenient = Emitter::default();
    assert!(!lenient.emit_diagram(&diagram).is_empty());

    let strict = Emitter::with_resolve_options(
      EmitConfig::default(),
      ResolveOptions {
        strictness: Strictness::Strict,
      },
    );
    assert_eq!(strict.emit_diagram(&diagram), "");
  }

  #[test]
  fn test_custom_entry_name() {
    let emitter = Emitter::new(EmitConfig {
      entry_name: "order_saga".to_string(),
      ..Default::default()
    });

    assert!(emitter.emit_diagram(&diagram()).contains("pub fn order_saga() -> BoxStep {"));
  }
}
