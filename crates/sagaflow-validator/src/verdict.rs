use serde::{Deserialize, Serialize};

use crate::error::Rejection;

/// Pass/fail outcome of a validation with its diagnostic reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
  pub outcome: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reason: Option<String>,
}

impl Verdict {
  pub fn pass() -> Self {
    Self {
      outcome: true,
      reason: None,
    }
  }

  pub fn fail(reason: impl Into<String>) -> Self {
    Self {
      outcome: false,
      reason: Some(reason.into()),
    }
  }
}

impl<T> From<Result<T, Rejection>> for Verdict {
  fn from(result: Result<T, Rejection>) -> Self {
    match result {
      Ok(_) => Verdict::pass(),
      Err(rejection) => Verdict::fail(rejection.to_string()),
    }
  }
}
