//! Error types for advisor completions

use thiserror::Error;

/// Result type for completion calls
pub type Result<T> = std::result::Result<T, LLMError>;

/// Failures talking to a completion service
#[derive(Error, Debug)]
pub enum LLMError {
    /// Missing or unusable client configuration
    #[error("Completion service is not configured: {0}")]
    NotConfigured(String),

    /// The service rejected the API key (HTTP 401)
    #[error("Completion service rejected the API key")]
    Unauthorized,

    /// Too many requests (HTTP 429)
    #[error("Completion service is rate limiting requests: {0}")]
    RateLimited(String),

    /// Request body refused by the service (HTTP 400)
    #[error("Completion request was rejected: {0}")]
    BadRequest(String),

    /// Model unknown to the service (HTTP 404) or outside the allow-list
    #[error("Model {0:?} is not available")]
    UnknownModel(String),

    /// Any other non-success status
    #[error("Completion service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    /// Connection, timeout or TLS failure
    #[error("Could not reach completion service: {0}")]
    Transport(#[from] reqwest::Error),

    /// Payload that is not the JSON we expect
    #[error("Could not decode completion payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Well-formed JSON without a usable reply in it
    #[error("Completion reply was malformed: {0}")]
    MalformedReply(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LLMError::Service {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Completion service returned HTTP 503: overloaded"
        );
        assert_eq!(
            LLMError::UnknownModel("gpt-x".to_string()).to_string(),
            "Model \"gpt-x\" is not available"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(LLMError::from(json_err), LLMError::Decode(_)));
    }
}
