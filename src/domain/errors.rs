//! Domain errors for agentflow.

use thiserror::Error;

/// Domain-level errors surfaced by agents, the router and the workflow.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required credential is absent from the process environment.
    #[error("Missing credential: environment variable {variable} is not set")]
    MissingCredential { variable: String },

    /// The caller wired something up incorrectly (e.g. a router with no agents).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A model call failed after the HTTP boundary gave up.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    /// The endpoint answered but the payload had nothing usable in it.
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_names_variable() {
        let err = DomainError::MissingCredential {
            variable: "OPENAI_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DomainError = parse_err.into();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }
}
