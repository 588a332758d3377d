//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - pretty or JSON output on stderr (stdout carries command results)
//! - optional rolling JSON log files
//! - secret scrubbing helpers for anything echoed from the API

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::LoggerImpl;
pub use secret_scrubbing::{redact_api_key, SecretScrubber};
