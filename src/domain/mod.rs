//! Domain layer for agentflow
//!
//! Core types and port traits. Nothing in here talks to the network; the
//! infrastructure layer provides the implementations.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
