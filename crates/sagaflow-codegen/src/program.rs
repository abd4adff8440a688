use sagaflow_graph::ElementKind;

/// What a procedure does before continuing.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
  /// Exclusive gateway: continue only if `condition` holds, otherwise tail
  /// into `otherwise` or stop.
  Guard {
    condition: String,
    otherwise: Option<String>,
  },
  /// Task: run the prelude statements, then await the invocation and store
  /// its result under `key`. On failure with an error route, store the error
  /// under `key` and tail into the route.
  Invoke {
    prelude: Option<String>,
    expression: String,
    key: String,
    error_route: Option<String>,
  },
  /// Service task: run the script, discarding its value. Failure handling
  /// as for [`Action::Invoke`].
  Run {
    script: String,
    key: String,
    error_route: Option<String>,
  },
  /// Message start event: fork a handler per `tag` occurrence, which seeds
  /// `key` with the event payload and runs the continuation.
  Subscribe { tag: String, key: String },
  /// Message end event: emit the expression's value.
  Emit { expression: String },
  /// No behavior for this node shape; left for manual completion.
  Unimplemented,
}

/// Where control goes after a procedure's action.
#[derive(Debug, Clone, PartialEq)]
pub enum Continuation {
  /// No ordinary targets: the procedure ends.
  Halt,
  /// One target: continue sequentially.
  Next(String),
  /// Several targets: fork each concurrently, in recorded order.
  Fork(Vec<String>),
}

impl Continuation {
  /// Continuation over procedure names, in recorded order.
  pub fn from_targets(mut targets: Vec<String>) -> Self {
    match targets.len() {
      0 => Continuation::Halt,
      1 => Continuation::Next(targets.remove(0)),
      _ => Continuation::Fork(targets),
    }
  }
}

/// One control-flow procedure, emitted for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
  pub name: String,
  pub node_id: String,
  pub kind: ElementKind,
  pub action: Action,
  pub then: Continuation,
}

/// A lowered process: imports, entry point and per-node procedures.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
  /// Referenced API module names, in discovery order.
  pub imports: Vec<String>,
  /// Procedure the entry procedure starts.
  pub entry: String,
  pub procedures: Vec<Procedure>,
}

impl Program {
  pub fn procedure(&self, name: &str) -> Option<&Procedure> {
    self.procedures.iter().find(|p| p.name == name)
  }
}

/// Procedure identifier for a node id.
///
/// Characters that cannot appear in an identifier become `_`. Anything that
/// is still not an identifier (a leading digit, a keyword, a lone `_`) is
/// prefixed with `_` until it is one. Distinct ids can share a name;
/// lowering disambiguates them.
pub fn procedure_name(node_id: &str) -> String {
  let mut name: String = node_id
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
    .collect();
  while syn::parse_str::<syn::Ident>(&name).is_err() {
    name.insert(0, '_');
  }
  name
}

/// Name of the handler a message start forks per event.
pub fn fork_handler_name(procedure: &str) -> String {
  format!("{procedure}_fork")
}
