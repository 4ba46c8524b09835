//! Structured error types for the match engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
  /// Input violates the shape contract (bad timestamp, negative count, unknown enum value).
  #[error("configuration: {field}: {reason}")]
  Configuration { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl MatchError {
  pub fn configuration(field: &str, reason: &str) -> Self {
    Self::Configuration {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  /// Field name for configuration errors, if any.
  pub fn field(&self) -> Option<&str> {
    match self {
      Self::Configuration { field, .. } => Some(field),
      Self::Json(_) | Self::Io(_) => None,
    }
  }
}
