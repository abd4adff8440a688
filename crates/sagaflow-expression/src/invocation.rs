use syn::Expr;

use crate::harness::{Harness, check};

/// Task text split into leading statements and the expression whose value
/// the task awaits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
  /// Statements run before the awaited expression, each `;`-terminated.
  pub prelude: Option<&'a str>,
  /// The final expression, without a trailing `;`.
  pub tail: &'a str,
}

impl<'a> Invocation<'a> {
  /// Split task text at the last statement boundary that leaves a
  /// well-formed statement list followed by a single expression.
  ///
  /// Returns `None` when the text does not end in an expression, for
  /// example when the last statement is a `let` binding or an item.
  pub fn split(text: &'a str) -> Option<Self> {
    let body = text.trim().trim_end_matches(';').trim_end();
    if body.is_empty() {
      return None;
    }

    if is_tail_expression(body) {
      return Some(Self {
        prelude: None,
        tail: body,
      });
    }

    body
      .char_indices()
      .rev()
      .filter(|&(_, c)| c == ';')
      .find_map(|(at, _)| {
        let (prelude, tail) = (body[..=at].trim(), body[at + 1..].trim());
        let splits = !tail.is_empty()
          && is_tail_expression(tail)
          && check(prelude, Harness::Statements).is_ok();
        splits.then_some(Self {
          prelude: Some(prelude),
          tail,
        })
      })
  }
}

fn is_tail_expression(text: &str) -> bool {
  matches!(syn::parse_str::<Expr>(text), Ok(expr) if !matches!(expr, Expr::Let(_)))
}
