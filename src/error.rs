//! Personality core errors.

use thiserror::Error;

/// Errors raised while loading configuration or persisting learning history.
///
/// Interaction processing itself never fails; these only surface from the
/// explicit load/save and configuration entry points.
#[derive(Debug, Error)]
pub enum PersonaError {
    /// YAML parsing or serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration validation failed.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PersonaError>;
