use serde::{Deserialize, Serialize};

/// How forked branches see the process context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSharing {
  /// Every branch gets a handle to the same context. Writes are last-write-wins.
  #[default]
  Shared,
  /// Every branch gets its own copy of the context at the fork point.
  Isolated,
}

/// Options controlling the emitted program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
  /// Crate path of the orchestration runtime.
  pub runtime_crate: String,
  /// Module path API modules are imported from.
  pub api_root: String,
  /// Name of the public entry procedure.
  pub entry_name: String,
  /// Import each referenced API module once instead of once per reference.
  pub dedupe_imports: bool,
  pub context: ContextSharing,
}

impl Default for EmitConfig {
  fn default() -> Self {
    Self {
      runtime_crate: "sagaflow_runtime".to_string(),
      api_root: "crate::apis".to_string(),
      entry_name: "saga".to_string(),
      dedupe_imports: true,
      context: ContextSharing::Shared,
    }
  }
}
