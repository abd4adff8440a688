use syn::{Expr, Stmt};
use tracing::debug;

use crate::harness::{Harness, parse};

/// Name of the runtime's invoke-async effect.
pub const INVOKE_EFFECT: &str = "call";

/// Module names referenced by invoke effects in an expression.
///
/// Only top-level statements are inspected, and only the shape
/// `call(<module>.<member>(..))`, `call(<module>.<member>)` or
/// `call(<module>::<member>(..))` is recognized. Text that fails to parse
/// yields no modules.
pub fn referenced_modules(text: &str, harness: Harness) -> Vec<String> {
  let block = match parse(text, harness) {
    Ok(block) => block,
    Err(err) => {
      debug!(error = %err, "skipping dependency discovery for unparseable expression");
      return Vec::new();
    }
  };

  block.stmts.iter().filter_map(invoked_module).collect()
}

fn invoked_module(stmt: &Stmt) -> Option<String> {
  let Stmt::Expr(Expr::Call(call), _) = stmt else {
    return None;
  };
  let Expr::Path(callee) = call.func.as_ref() else {
    return None;
  };
  if !callee.path.is_ident(INVOKE_EFFECT) {
    return None;
  }

  match call.args.first()? {
    Expr::MethodCall(method) => bare_ident(&method.receiver),
    Expr::Field(field) => bare_ident(&field.base),
    Expr::Call(inner) => match inner.func.as_ref() {
      Expr::Path(path) if path.qself.is_none() && path.path.segments.len() == 2 => path
        .path
        .segments
        .first()
        .map(|segment| segment.ident.to_string()),
      _ => None,
    },
    _ => None,
  }
}

fn bare_ident(expr: &Expr) -> Option<String> {
  match expr {
    Expr::Path(path) if path.qself.is_none() => path.path.get_ident().map(|ident| ident.to_string()),
    _ => None,
  }
}
