//! Port trait definitions (Hexagonal Architecture)
//!
//! - `CompletionClient`: one system/user prompt in, one text answer out
//! - `EmbeddingProvider`: text to dense vectors, used for routing
//! - `Agent`: the capability every worker exposes to the router and workflow
pub mod agent;
pub mod completion;
pub mod embedding;

pub use agent::Agent;
pub use completion::{CompletionClient, CompletionRequest};
pub use embedding::{EmbeddingInput, EmbeddingOutput, EmbeddingProvider};
