use thiserror::Error;

/// Errors that can occur while reading a diagram.
#[derive(Debug, Error)]
pub enum DiagramError {
  /// The markup could not be deserialized into a diagram.
  #[error("failed to parse diagram markup: {0}")]
  Markup(#[from] quick_xml::de::DeError),
}
