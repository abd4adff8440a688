use std::collections::{HashMap, HashSet};

use sagaflow_expression::{Harness, Invocation, referenced_modules};
use sagaflow_graph::{Node, NodeKind, ProcessGraph};
use tracing::warn;

use crate::config::EmitConfig;
use crate::program::{
  Action, Continuation, Procedure, Program, fork_handler_name, procedure_name,
};

/// Lower a resolved graph into a program starting at `start`.
pub(crate) fn lower(graph: &ProcessGraph, start: &Node, config: &EmitConfig) -> Program {
  let names = ProcedureNames::assign(graph, &config.entry_name);

  Program {
    imports: discover_imports(graph, config.dedupe_imports),
    entry: names.of(&start.id),
    procedures: graph.iter().map(|node| lower_node(node, &names)).collect(),
  }
}

/// API modules invoked by task expressions, in registry order.
fn discover_imports(graph: &ProcessGraph, dedupe: bool) -> Vec<String> {
  let modules = graph
    .iter()
    .filter(|node| matches!(node.kind, NodeKind::Task { .. }))
    .filter_map(Node::expression)
    .flat_map(|text| referenced_modules(text, Harness::Statements));

  if !dedupe {
    return modules.collect();
  }

  let mut seen = HashSet::new();
  modules.filter(|module| seen.insert(module.clone())).collect()
}

/// Procedure names by node id, unique across the emitted program.
struct ProcedureNames {
  by_id: HashMap<String, String>,
}

impl ProcedureNames {
  /// Name every node in registry order. A name already taken, by an earlier
  /// node, a fork handler or the entry procedure, gets a numeric suffix.
  fn assign(graph: &ProcessGraph, entry_name: &str) -> Self {
    let mut taken = HashSet::from([entry_name.to_string()]);
    let mut by_id = HashMap::with_capacity(graph.len());

    for node in graph.iter() {
      let forks = matches!(node.kind, NodeKind::StartEvent { message: true });
      let is_free = |name: &str, taken: &HashSet<String>| {
        !taken.contains(name) && !(forks && taken.contains(&fork_handler_name(name)))
      };

      let base = procedure_name(&node.id);
      let mut name = base.clone();
      let mut suffix = 2;
      while !is_free(&name, &taken) {
        name = format!("{base}_{suffix}");
        suffix += 1;
      }
      if name != base {
        warn!(node_id = %node.id, procedure = %name, "procedure name already taken, renamed");
      }

      if forks {
        taken.insert(fork_handler_name(&name));
      }
      taken.insert(name.clone());
      by_id.insert(node.id.clone(), name);
    }

    Self { by_id }
  }

  /// The procedure for `node_id`. Ids outside the graph fall back to their
  /// plain procedure name.
  fn of(&self, node_id: &str) -> String {
    self
      .by_id
      .get(node_id)
      .cloned()
      .unwrap_or_else(|| procedure_name(node_id))
  }
}

fn lower_node(node: &Node, names: &ProcedureNames) -> Procedure {
  let key = node.context_key().to_string();
  let route = |target: &Option<String>| target.as_deref().map(|id| names.of(id));

  let action = match (&node.kind, node.expression()) {
    (NodeKind::ExclusiveGateway { otherwise }, Some(condition)) => Action::Guard {
      condition: condition.to_string(),
      otherwise: route(otherwise),
    },
    (NodeKind::Task { error_route }, Some(text)) => {
      let (prelude, expression) = match Invocation::split(text) {
        Some(invocation) => (invocation.prelude, invocation.tail),
        // Unchecked input: await the text as written.
        None => (None, text.trim_end_matches(';').trim_end()),
      };
      Action::Invoke {
        prelude: prelude.map(str::to_string),
        expression: expression.to_string(),
        key,
        error_route: route(error_route),
      }
    }
    (NodeKind::ServiceTask { error_route }, Some(script)) => Action::Run {
      script: script.to_string(),
      key,
      error_route: route(error_route),
    },
    (NodeKind::StartEvent { message: true }, Some(tag)) => Action::Subscribe {
      tag: tag.to_string(),
      key,
    },
    (NodeKind::EndEvent { message: true }, Some(expression)) => Action::Emit {
      expression: expression.to_string(),
    },
    _ => Action::Unimplemented,
  };

  Procedure {
    name: names.of(&node.id),
    node_id: node.id.clone(),
    kind: node.element_kind(),
    action,
    then: Continuation::from_targets(node.outgoing.iter().map(|id| names.of(id)).collect()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn node(id: &str, kind: NodeKind, expression: Option<&str>, outgoing: &[&str]) -> Node {
    Node {
      id: id.to_string(),
      name: Some(format!("{}_result", id.to_lowercase())),
      kind,
      expression: expression.map(str::to_string),
      outgoing: outgoing.iter().map(|s| s.to_string()).collect(),
    }
  }

  fn graph(nodes: Vec<Node>) -> ProcessGraph {
    let mut graph = ProcessGraph::new();
    for node in nodes {
      graph.insert(node);
    }
    graph
  }

  fn lower_graph(graph: &ProcessGraph) -> Program {
    let start = graph.start_events()[0].clone();
    lower(graph, &start, &EmitConfig::default())
  }

  /// Follow the program from `from`, recording every procedure entered.
  ///
  /// `succeeds` decides each guard condition and each invocation outcome.
  fn walk(program: &Program, from: &str, succeeds: &dyn Fn(&str) -> bool, trace: &mut Vec<String>) {
    let procedure = program.procedure(from).expect("target procedure exists");
    trace.push(procedure.name.clone());

    match &procedure.action {
      Action::Guard { otherwise, .. } if !succeeds(&procedure.name) => {
        if let Some(target) = otherwise {
          walk(program, target, succeeds, trace);
        }
        return;
      }
      Action::Invoke { error_route, .. } | Action::Run { error_route, .. }
        if !succeeds(&procedure.name) =>
      {
        if let Some(target) = error_route {
          walk(program, target, succeeds, trace);
        }
        return;
      }
      _ => {}
    }

    match &procedure.then {
      Continuation::Halt => {}
      Continuation::Next(target) => walk(program, target, succeeds, trace),
      Continuation::Fork(targets) => {
        for target in targets {
          walk(program, target, succeeds, trace);
        }
      }
    }
  }

  fn run(program: &Program, succeeds: &dyn Fn(&str) -> bool) -> Vec<String> {
    let mut trace = Vec::new();
    walk(program, &program.entry, succeeds, &mut trace);
    trace
  }

  /// Start -> Gw; Gw --true--> A, B (forked); Gw --otherwise--> D.
  fn gateway_graph(otherwise: Option<&str>) -> ProcessGraph {
    graph(vec![
      node("Start", NodeKind::StartEvent { message: false }, None, &["Gw"]),
      node("A", NodeKind::EndEvent { message: false }, None, &[]),
      node("B", NodeKind::EndEvent { message: false }, None, &[]),
      node("D", NodeKind::EndEvent { message: false }, None, &[]),
      node(
        "Gw",
        NodeKind::ExclusiveGateway {
          otherwise: otherwise.map(str::to_string),
        },
        Some("order.total > 100"),
        &["A", "B"],
      ),
    ])
  }

  #[test]
  fn test_gateway_true_takes_ordinary_targets() {
    let program = lower_graph(&gateway_graph(Some("D")));
    assert_eq!(run(&program, &|_| true), vec!["Start", "Gw", "A", "B"]);
  }

  #[test]
  fn test_gateway_false_takes_default_only() {
    let program = lower_graph(&gateway_graph(Some("D")));
    assert_eq!(run(&program, &|name| name != "Gw"), vec!["Start", "Gw", "D"]);
  }

  #[test]
  fn test_gateway_false_without_default_halts() {
    let program = lower_graph(&gateway_graph(None));
    assert_eq!(run(&program, &|name| name != "Gw"), vec!["Start", "Gw"]);
  }

  #[test]
  fn test_fork_preserves_recorded_order_and_excludes_default() {
    let program = lower_graph(&gateway_graph(Some("D")));
    let gateway = program.procedure("Gw").unwrap();
    assert_eq!(
      gateway.then,
      Continuation::Fork(vec!["A".to_string(), "B".to_string()])
    );
  }

  /// Start -> Task -> Next, with Task's error route to Recover.
  fn task_graph(kind: NodeKind) -> ProcessGraph {
    graph(vec![
      node("Start", NodeKind::StartEvent { message: false }, None, &["Work"]),
      node("Next", NodeKind::EndEvent { message: false }, None, &[]),
      node("Recover", NodeKind::EndEvent { message: false }, None, &[]),
      node("Work", kind, Some("call(api.get_x())"), &["Next"]),
    ])
  }

  #[test]
  fn test_task_failure_routes_to_default() {
    for kind in [
      NodeKind::Task {
        error_route: Some("Recover".to_string()),
      },
      NodeKind::ServiceTask {
        error_route: Some("Recover".to_string()),
      },
    ] {
      let program = lower_graph(&task_graph(kind));
      assert_eq!(
        run(&program, &|name| name != "Work"),
        vec!["Start", "Work", "Recover"]
      );
      assert_eq!(run(&program, &|_| true), vec!["Start", "Work", "Next"]);
    }
  }

  #[test]
  fn test_task_error_is_keyed_by_node_name() {
    let program = lower_graph(&task_graph(NodeKind::Task {
      error_route: Some("Recover".to_string()),
    }));

    assert_eq!(
      program.procedure("Work").unwrap().action,
      Action::Invoke {
        prelude: None,
        expression: "call(api.get_x())".to_string(),
        key: "work_result".to_string(),
        error_route: Some("Recover".to_string()),
      }
    );
  }

  #[test]
  fn test_message_start_subscribes() {
    let graph = graph(vec![node(
      "Start",
      NodeKind::StartEvent { message: true },
      Some("@wf/begin"),
      &[],
    )]);
    let program = lower_graph(&graph);

    assert_eq!(
      program.procedures[0].action,
      Action::Subscribe {
        tag: "@wf/begin".to_string(),
        key: "start_result".to_string(),
      }
    );
  }

  #[test]
  fn test_uncovered_shapes_are_unimplemented() {
    let graph = graph(vec![
      node("Start", NodeKind::StartEvent { message: false }, None, &["Task"]),
      node("End", NodeKind::EndEvent { message: false }, Some("ignored"), &[]),
      node("Task", NodeKind::Task { error_route: None }, None, &["End"]),
    ]);
    let program = lower_graph(&graph);

    for procedure in &program.procedures {
      assert_eq!(procedure.action, Action::Unimplemented, "{}", procedure.name);
    }
    assert_eq!(run(&program, &|_| true), vec!["Start", "Task", "End"]);
  }

  #[test]
  fn test_imports_follow_dedupe_setting() {
    let graph = graph(vec![
      node("Start", NodeKind::StartEvent { message: false }, None, &[]),
      node("A", NodeKind::Task { error_route: None }, Some("call(api.get_x())"), &[]),
      node("B", NodeKind::Task { error_route: None }, Some("call(users.load()); call(api.get_y())"), &[]),
      node("C", NodeKind::ServiceTask { error_route: None }, Some("call(audit.log())"), &[]),
      node("Broken", NodeKind::Task { error_route: None }, Some("call(api.("), &[]),
    ]);
    let start = graph.start_events()[0].clone();

    let deduped = lower(&graph, &start, &EmitConfig::default());
    assert_eq!(deduped.imports, vec!["api", "users"]);

    let config = EmitConfig {
      dedupe_imports: false,
      ..Default::default()
    };
    let repeated = lower(&graph, &start, &config);
    assert_eq!(repeated.imports, vec!["api", "users", "api"]);
  }

  #[test]
  fn test_task_statements_split_before_the_awaited_tail() {
    let graph = graph(vec![
      node("Start", NodeKind::StartEvent { message: false }, None, &["A"]),
      node("A", NodeKind::Task { error_route: None }, Some("call(users.load()); call(api.get_y());"), &[]),
    ]);
    let program = lower_graph(&graph);

    assert_eq!(
      program.procedure("A").unwrap().action,
      Action::Invoke {
        prelude: Some("call(users.load());".to_string()),
        expression: "call(api.get_y())".to_string(),
        key: "a_result".to_string(),
        error_route: None,
      }
    );
  }

  #[test]
  fn test_colliding_names_are_disambiguated() {
    let graph = graph(vec![
      node("Start", NodeKind::StartEvent { message: true }, Some("@wf/begin"), &["a-b"]),
      node("a_b", NodeKind::EndEvent { message: false }, None, &[]),
      node("Start_fork", NodeKind::EndEvent { message: false }, None, &[]),
      node("saga", NodeKind::EndEvent { message: false }, None, &[]),
      node("a-b", NodeKind::Task { error_route: Some("a_b".to_string()) }, Some("call(api.get_x())"), &["Start_fork"]),
    ]);
    let program = lower_graph(&graph);

    let names: Vec<&str> = program.procedures.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Start", "a_b", "Start_fork_2", "saga_2", "a_b_2"]);
    assert_eq!(program.procedure("Start").unwrap().then, Continuation::Next("a_b_2".to_string()));

    let task = program.procedure("a_b_2").unwrap();
    assert!(matches!(&task.action, Action::Invoke { error_route: Some(route), .. } if route == "a_b"));
    assert_eq!(task.then, Continuation::Next("Start_fork_2".to_string()));
  }
}
