use std::path::Path;

use anyhow::{Context, Result};
use sagaflow_codegen::EmitConfig;
use sagaflow_resolver::ResolveOptions;
use serde::{Deserialize, Serialize};

/// Compiler settings loaded from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
  pub resolve: ResolveOptions,
  pub emit: EmitConfig,
}

impl CompilerConfig {
  /// Load from a JSON file, or defaults when no path is given.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let Some(path) = path else {
      return Ok(Self::default());
    };

    let content = std::fs::read_to_string(path)
      .with_context(|| format!("failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
      .with_context(|| format!("failed to parse config file: {}", path.display()))
  }
}
