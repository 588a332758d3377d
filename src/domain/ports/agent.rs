//! Agent port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Something that turns an input prompt into a text response.
///
/// Persona, knowledge, evaluation and routing agents all implement this, so
/// any of them can be registered with a router or wrapped by an evaluator.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn respond(&self, input: &str) -> DomainResult<String>;
}
