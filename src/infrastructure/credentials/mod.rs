//! Credentials management infrastructure
//!
//! The API key lives in the process environment, optionally seeded from a
//! local `.env` file. Lookups fail fast so no request is ever attempted
//! without a key.

use std::path::Path;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};

/// Environment variable holding the model API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Load `.env` from the working directory, if present.
///
/// Variables already set in the environment are not overwritten.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => debug!("no .env file found"),
        Err(err) => debug!(error = %err, "failed to parse .env file"),
    }
}

/// Load a specific env file, if present.
pub fn load_dotenv_from(path: impl AsRef<Path>) {
    let path = path.as_ref();
    if let Err(err) = dotenvy::from_path(path) {
        debug!(path = %path.display(), error = %err, "env file not loaded");
    }
}

/// Resolve the API key from `OPENAI_API_KEY`.
pub fn resolve_api_key() -> DomainResult<String> {
    resolve_from_env(API_KEY_VAR)
}

/// Resolve a non-empty credential from the named variable.
pub fn resolve_from_env(variable: &str) -> DomainResult<String> {
    std::env::var(variable)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DomainError::MissingCredential {
            variable: variable.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_present_key() {
        temp_env::with_var("AGENTFLOW_TEST_KEY_PRESENT", Some(" sk-abc "), || {
            assert_eq!(resolve_from_env("AGENTFLOW_TEST_KEY_PRESENT").unwrap(), "sk-abc");
        });
    }

    #[test]
    fn test_resolve_missing_key() {
        temp_env::with_var_unset("AGENTFLOW_TEST_KEY_MISSING", || {
            match resolve_from_env("AGENTFLOW_TEST_KEY_MISSING") {
                Err(DomainError::MissingCredential { variable }) => {
                    assert_eq!(variable, "AGENTFLOW_TEST_KEY_MISSING");
                }
                other => panic!("expected MissingCredential, got {other:?}"),
            }
        });
    }

    #[test]
    fn test_resolve_blank_key_is_missing() {
        temp_env::with_var("AGENTFLOW_TEST_KEY_BLANK", Some("   "), || {
            assert!(resolve_from_env("AGENTFLOW_TEST_KEY_BLANK").is_err());
        });
    }

    #[test]
    fn test_load_dotenv_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "AGENTFLOW_TEST_DOTENV_KEY=sk-from-file").unwrap();
        file.flush().unwrap();

        temp_env::with_var_unset("AGENTFLOW_TEST_DOTENV_KEY", || {
            load_dotenv_from(file.path());
            assert_eq!(resolve_from_env("AGENTFLOW_TEST_DOTENV_KEY").unwrap(), "sk-from-file");
        });
    }
}
