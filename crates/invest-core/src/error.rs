//! Error types for the investment bot

use thiserror::Error;

/// Errors raised outside the dialogue itself (configuration, catalog,
/// commands, advisor calls). Dialogue-level problems are [`crate::dialogue::TurnError`]
/// and never escape a turn.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Catalog could not be loaded or is inconsistent
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Malformed or unknown command
    #[error("Command error: {0}")]
    CommandError(String),

    /// Advisor mode requested without a configured provider
    #[error("Advisor mode is not configured")]
    AdvisorUnavailable,

    /// Completion service failed
    #[error("Advisor error: {0}")]
    LlmError(#[from] invest_llm::LLMError),

    /// File access error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Convert anyhow::Error to AdvisorError
impl From<anyhow::Error> for AdvisorError {
    fn from(err: anyhow::Error) -> Self {
        AdvisorError::Other(err.to_string())
    }
}
