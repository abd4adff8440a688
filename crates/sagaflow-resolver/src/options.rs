use serde::{Deserialize, Serialize};

/// How structural degradation (dangling flows, missing annotations) is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
  /// Log a warning and drop the offending reference.
  #[default]
  Lenient,
  /// Fail normalization.
  Strict,
}

/// Options for diagram normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
  pub strictness: Strictness,
}

impl ResolveOptions {
  pub fn strict() -> Self {
    Self {
      strictness: Strictness::Strict,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_to_lenient() {
    let options: ResolveOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options.strictness, Strictness::Lenient);
  }

  #[test]
  fn test_deserialize_strict() {
    let options: ResolveOptions = serde_json::from_str(r#"{"strictness": "strict"}"#).unwrap();
    assert_eq!(options, ResolveOptions::strict());
  }
}
