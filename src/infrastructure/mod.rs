//! Infrastructure layer module
//!
//! Adapters and external integrations behind the domain ports:
//! - OpenAI-compatible chat completions and embeddings clients
//! - Configuration management
//! - Credential loading
//! - Logging infrastructure
//! - Deterministic test doubles

pub mod config;
pub mod credentials;
pub mod logging;
pub mod mock;
pub mod openai;
