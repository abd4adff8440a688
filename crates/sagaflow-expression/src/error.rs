use thiserror::Error;

/// Errors that can occur while parsing an expression.
#[derive(Debug, Error)]
pub enum ExpressionError {
  /// The wrapped expression text is not syntactically valid.
  #[error("{message}")]
  Syntax { message: String },
}

impl From<syn::Error> for ExpressionError {
  fn from(err: syn::Error) -> Self {
    ExpressionError::Syntax {
      message: err.to_string(),
    }
  }
}
