use crate::config::{ContextSharing, EmitConfig};
use crate::program::{Action, Continuation, Procedure, Program, fork_handler_name};

const INDENT: &str = "    ";

/// Render a lowered program as Rust source for the orchestration runtime.
pub(crate) fn render(program: &Program, config: &EmitConfig) -> String {
  let mut code = String::new();

  code.push_str("// Generated by sagaflow. Do not edit.\n");
  code.push_str("#![allow(non_snake_case, unused_imports, unused_mut, unreachable_code)]\n\n");
  code.push_str(&format!(
    "use {}::effects::{{call, put, spawn, take_every}};\n",
    config.runtime_crate
  ));
  code.push_str(&format!(
    "use {}::{{Action, BoxStep, Context, Error}};\n",
    config.runtime_crate
  ));
  code.push_str("use reqwest as http;\n");
  for module in &program.imports {
    code.push_str(&format!("use {}::{};\n", config.api_root, module));
  }

  code.push_str(&format!(
    "\npub fn {}() -> BoxStep {{\n{INDENT}{}(Context::default())\n}}\n",
    config.entry_name, program.entry
  ));

  for procedure in &program.procedures {
    code.push('\n');
    render_procedure(&mut code, procedure, config.context);
  }

  code
}

fn render_procedure(code: &mut String, procedure: &Procedure, sharing: ContextSharing) {
  let mut body = String::new();

  match &procedure.action {
    Action::Subscribe { tag, key } => {
      let handler = fork_handler_name(&procedure.name);
      body.push_str(&format!("take_every({tag:?}, context, {handler}).await\n"));
      push_fn(code, &procedure.name, "context: Context", &body);

      let mut handler_body = format!("context.set({key:?}, action);\n");
      push_continuation(&mut handler_body, &procedure.then, sharing);
      code.push('\n');
      push_fn(code, &handler, "context: Context, action: Action", &handler_body);
      return;
    }
    Action::Guard {
      condition,
      otherwise,
    } => {
      body.push_str(&format!("if !({condition}) {{\n"));
      body.push_str(&format!("{INDENT}{}\n", exit_to(otherwise.as_deref())));
      body.push_str("}\n");
    }
    Action::Invoke {
      prelude,
      expression,
      key,
      error_route: None,
    } => {
      if let Some(prelude) = prelude {
        body.push_str(&as_statement(prelude));
      }
      body.push_str(&format!("context.set({key:?}, ({expression}).await?);\n"));
    }
    Action::Invoke {
      prelude,
      expression,
      key,
      error_route: Some(route),
    } => {
      if let Some(prelude) = prelude {
        body.push_str(&as_statement(prelude));
      }
      body.push_str(&format!("match ({expression}).await {{\n"));
      body.push_str(&format!("{INDENT}Ok(value) => context.set({key:?}, value),\n"));
      body.push_str(&format!("{INDENT}Err(error) => {{\n"));
      body.push_str(&format!("{INDENT}{INDENT}context.set({key:?}, error);\n"));
      body.push_str(&format!("{INDENT}{INDENT}{}\n", exit_to(Some(route))));
      body.push_str(&format!("{INDENT}}}\n"));
      body.push_str("}\n");
    }
    Action::Run {
      script,
      error_route: None,
      ..
    } => {
      body.push_str(&as_statement(script));
    }
    Action::Run {
      script,
      key,
      error_route: Some(route),
    } => {
      body.push_str("let outcome: Result<_, Error> = (|| Ok({\n");
      body.push_str(&indent(&as_statement(script)));
      body.push_str("}))();\n");
      body.push_str("if let Err(error) = outcome {\n");
      body.push_str(&format!("{INDENT}context.set({key:?}, error);\n"));
      body.push_str(&format!("{INDENT}{}\n", exit_to(Some(route))));
      body.push_str("}\n");
    }
    Action::Emit { expression } => {
      body.push_str(&format!("put({expression}).await?;\n"));
    }
    Action::Unimplemented => {
      body.push_str(&format!(
        "// unimplemented: {} {}\n",
        procedure.kind, procedure.node_id
      ));
    }
  }

  push_continuation(&mut body, &procedure.then, sharing);
  push_fn(code, &procedure.name, "context: Context", &body);
}

/// Early exit of a procedure: tail into `target`, or end the branch.
fn exit_to(target: Option<&str>) -> String {
  match target {
    Some(target) => format!("return {target}(context).await;"),
    None => "return Ok(());".to_string(),
  }
}

fn push_continuation(body: &mut String, then: &Continuation, sharing: ContextSharing) {
  match then {
    Continuation::Halt => body.push_str("Ok(())\n"),
    Continuation::Next(target) => body.push_str(&format!("{target}(context).await\n")),
    Continuation::Fork(targets) => {
      let branch_context = match sharing {
        ContextSharing::Shared => "context.clone()",
        ContextSharing::Isolated => "context.fork()",
      };
      for target in targets {
        body.push_str(&format!("spawn({target}({branch_context}));\n"));
      }
      body.push_str("Ok(())\n");
    }
  }
}

fn push_fn(code: &mut String, name: &str, params: &str, body: &str) {
  code.push_str(&format!("fn {name}({params}) -> BoxStep {{\n"));
  code.push_str(&format!("{INDENT}Box::pin(async move {{\n"));
  code.push_str(&indent(&indent(body)));
  code.push_str(&format!("{INDENT}}})\n"));
  code.push_str("}\n");
}

/// Terminate script text so it can be followed by more statements.
fn as_statement(script: &str) -> String {
  let script = script.trim_end();
  if script.ends_with(';') || script.ends_with('}') {
    format!("{script}\n")
  } else {
    format!("{script};\n")
  }
}

fn indent(text: &str) -> String {
  text
    .lines()
    .map(|line| {
      if line.trim().is_empty() {
        "\n".to_string()
      } else {
        format!("{INDENT}{line}\n")
      }
    })
    .collect()
}
