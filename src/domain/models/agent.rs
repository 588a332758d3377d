//! Agent descriptors used by the router.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::domain::ports::Agent;

/// A named, described worker the router can delegate to.
#[derive(Clone)]
pub struct AgentDescriptor {
    /// Display name (e.g. "texas agent").
    pub name: String,
    /// Free-text description the step is scored against.
    pub description: String,
    /// The capability invoked when this descriptor is chosen.
    pub agent: Arc<dyn Agent>,
}

impl AgentDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        agent: Arc<dyn Agent>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            agent,
        }
    }
}

impl fmt::Debug for AgentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Why the router picked the agent it picked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDecision {
    /// Name of the chosen descriptor.
    pub agent_name: String,
    /// Position of the chosen descriptor in registration order.
    pub index: usize,
    /// Similarity of the chosen descriptor.
    pub score: f32,
    /// `(name, score)` for every descriptor, in registration order.
    pub scores: Vec<(String, f32)>,
}
