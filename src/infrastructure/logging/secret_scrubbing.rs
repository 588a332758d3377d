use regex::Regex;
use std::sync::LazyLock;

static API_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sk-[A-Za-z0-9_-]{16,}").expect("valid api key regex"));

static BEARER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[A-Za-z0-9_\-\.]+").expect("valid bearer regex"));

static TOKEN_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(["']?(?:api_key|apikey|token|secret)["']?\s*[:=]\s*)["']?[A-Za-z0-9_\-\.]{16,}["']?"#)
        .expect("valid token field regex")
});

/// Scrubs API keys and bearer tokens out of text before it is logged or printed
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = BEARER_PATTERN.replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed = TOKEN_FIELD_PATTERN.replace_all(&scrubbed, "${1}[REDACTED]");
        API_KEY_PATTERN
            .replace_all(&scrubbed, "[API_KEY_REDACTED]")
            .into_owned()
    }
}

/// Short, log-safe form of an API key
pub fn redact_api_key(api_key: &str) -> String {
    match api_key.get(..6) {
        Some(prefix) if api_key.len() > 12 => format!("{prefix}...[REDACTED]"),
        _ => "[REDACTED]".to_string(),
    }
}
