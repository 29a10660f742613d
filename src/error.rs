//! Error types for vitrina.

use thiserror::Error;

/// Errors that can occur in the search core and its services.
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// Suggestion lookup failures (remote service errors). Recovered by
    /// the predictive controller, never propagated to a crash.
    #[error("Suggestion lookup error: {0}")]
    Suggest(String),

    /// Filter/query store errors
    #[error("Store error: {0}")]
    Store(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for vitrina operations
pub type VitrinaResult<T> = Result<T, VitrinaError>;
