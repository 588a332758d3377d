//! Deterministic test doubles for the completion, embedding and agent ports.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{
    Agent, CompletionClient, CompletionRequest, EmbeddingInput, EmbeddingOutput, EmbeddingProvider,
};

type Responder = Box<dyn Fn(&CompletionRequest) -> DomainResult<String> + Send + Sync>;

/// Completion client that answers from a closure and records every request.
pub struct MockCompletionClient {
    responder: Responder,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionClient {
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&CompletionRequest) -> DomainResult<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies with the given responses in order; errors once they run out.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue: Mutex<VecDeque<String>> =
            Mutex::new(responses.into_iter().map(Into::into).collect());
        Self::with_responder(move |_| {
            queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .ok_or_else(|| {
                    DomainError::ExecutionFailed("mock completion responses exhausted".to_string())
                })
        })
    }

    /// Always replies with the same text.
    pub fn constant(response: impl Into<String>) -> Self {
        let response = response.into();
        Self::with_responder(move |_| Ok(response.clone()))
    }

    /// Always fails with `ExecutionFailed`.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::with_responder(move |_| Err(DomainError::ExecutionFailed(message.clone())))
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> DomainResult<String> {
        let result = (self.responder)(&request);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        result
    }
}

type Axis = Box<dyn Fn(&str) -> f32 + Send + Sync>;

/// Embedding provider whose dimensions are hand-written feature functions.
///
/// Each axis maps the (lowercased) text to one vector component, which keeps
/// similarity scores predictable in tests.
pub struct MockEmbeddingProvider {
    axes: Vec<Axis>,
    calls: AtomicUsize,
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self {
            axes: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Add a dimension scored by the number of keyword occurrences.
    #[must_use]
    pub fn with_keyword_axis(mut self, keywords: &[&str]) -> Self {
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        self.axes.push(Box::new(move |text: &str| {
            let hits = keywords.iter().map(|k| text.matches(k.as_str()).count()).sum::<usize>();
            f32::from(u16::try_from(hits).unwrap_or(u16::MAX))
        }));
        self
    }

    /// Add a dimension that fires on digits or on any of the keywords.
    #[must_use]
    pub fn with_numeric_axis(mut self, keywords: &[&str]) -> Self {
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        self.axes.push(Box::new(move |text: &str| {
            let numeric = text.chars().any(|c| c.is_ascii_digit())
                || keywords.iter().any(|k| text.contains(k.as_str()));
            if numeric {
                1.0
            } else {
                0.0
            }
        }));
        self
    }

    /// Number of `embed`/`embed_batch` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        self.axes.iter().map(|axis| axis(&lowered)).collect()
    }
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, inputs: &[EmbeddingInput]) -> DomainResult<Vec<EmbeddingOutput>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(inputs
            .iter()
            .map(|input| EmbeddingOutput {
                id: input.id.clone(),
                vector: self.vectorize(&input.text),
            })
            .collect())
    }
}

/// Agent that returns a fixed reply (or error) and records its inputs.
pub struct RecordingAgent {
    reply: Result<String, String>,
    inputs: Mutex<Vec<String>>,
}

impl RecordingAgent {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Agent for RecordingAgent {
    async fn respond(&self, input: &str) -> DomainResult<String> {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(input.to_string());
        self.reply
            .clone()
            .map_err(DomainError::ExecutionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses_run_out() {
        let client = MockCompletionClient::with_responses(["one", "two"]);
        assert_eq!(client.complete(CompletionRequest::user("a")).await.unwrap(), "one");
        assert_eq!(client.complete(CompletionRequest::user("b")).await.unwrap(), "two");
        assert!(client.complete(CompletionRequest::user("c")).await.is_err());
        assert_eq!(client.call_count(), 3);
        assert_eq!(client.requests()[1].user, "b");
    }

    #[tokio::test]
    async fn test_keyword_axes() {
        let provider = MockEmbeddingProvider::new()
            .with_keyword_axis(&["texas"])
            .with_numeric_axis(&["number"]);
        assert_eq!(provider.embed("Rome, Texas").await.unwrap(), vec![1.0, 0.0]);
        assert_eq!(provider.embed("20 stories").await.unwrap(), vec![0.0, 1.0]);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_recording_agent() {
        let agent = RecordingAgent::new("ok");
        assert_eq!(agent.respond("hello").await.unwrap(), "ok");
        assert_eq!(agent.inputs(), vec!["hello".to_string()]);

        let failing = RecordingAgent::failing("boom");
        assert!(matches!(
            failing.respond("x").await,
            Err(DomainError::ExecutionFailed(msg)) if msg == "boom"
        ));
    }
}
