/// Routing scenarios with deterministic embeddings.
use std::sync::Arc;

use agentflow::domain::errors::DomainError;
use agentflow::domain::models::AgentDescriptor;
use agentflow::infrastructure::mock::{MockEmbeddingProvider, RecordingAgent};
use agentflow::services::RoutingAgent;

struct Specialists {
    texas: Arc<RecordingAgent>,
    europe: Arc<RecordingAgent>,
    math: Arc<RecordingAgent>,
    embedder: Arc<MockEmbeddingProvider>,
    router: RoutingAgent,
}

fn specialists() -> Specialists {
    let embedder = Arc::new(
        MockEmbeddingProvider::new()
            .with_keyword_axis(&["texas"])
            .with_keyword_axis(&["europe", "italy"])
            .with_numeric_axis(&["number", "math"]),
    );
    let texas = Arc::new(RecordingAgent::new("Rome, Texas was founded in 1836."));
    let europe = Arc::new(RecordingAgent::new("Rome, Italy is the capital of Italy."));
    let math = Arc::new(RecordingAgent::new("2 * 20 = 40"));

    let router = RoutingAgent::new(
        embedder.clone(),
        vec![
            AgentDescriptor::new("texas agent", "Answer a question about Texas", texas.clone()),
            AgentDescriptor::new("europe agent", "Answer a question about Europe", europe.clone()),
        ],
    )
    .with_agent(AgentDescriptor::new(
        "math agent",
        "When a prompt contains numbers, respond with a math formula",
        math.clone(),
    ));

    Specialists {
        texas,
        europe,
        math,
        embedder,
        router,
    }
}

#[tokio::test]
async fn test_rome_texas_goes_to_texas_agent() {
    let s = specialists();

    let (decision, response) = s
        .router
        .route("Tell me about the history of Rome, Texas")
        .await
        .unwrap();

    assert_eq!(decision.agent_name, "texas agent");
    assert_eq!(decision.index, 0);
    assert_eq!(response, "Rome, Texas was founded in 1836.");
    assert_eq!(s.texas.inputs(), vec!["Tell me about the history of Rome, Texas"]);
    assert_eq!(s.europe.call_count(), 0);
    assert_eq!(s.math.call_count(), 0);
}

#[tokio::test]
async fn test_rome_italy_goes_to_europe_agent() {
    let s = specialists();
    let (decision, _) = s
        .router
        .route("Tell me about the history of Rome, Italy")
        .await
        .unwrap();
    assert_eq!(decision.agent_name, "europe agent");
    assert_eq!(s.europe.call_count(), 1);
}

#[tokio::test]
async fn test_story_points_go_to_math_agent() {
    let s = specialists();

    let (decision, response) = s
        .router
        .route("One story takes 2 days, and there are 20 stories")
        .await
        .unwrap();

    assert_eq!(decision.agent_name, "math agent");
    assert_eq!(response, "2 * 20 = 40");
    assert_eq!(decision.scores.len(), 3);
    assert!(decision.scores[2].1 > decision.scores[0].1);
    assert_eq!(s.math.call_count(), 1);
}

#[tokio::test]
async fn test_select_scores_without_invoking() {
    let s = specialists();
    let decision = s.router.select("Tell me about Texas").await.unwrap();
    assert_eq!(decision.agent_name, "texas agent");
    assert!((decision.score - 1.0).abs() < 1e-6);
    assert_eq!(s.texas.call_count(), 0);
    assert_eq!(s.embedder.call_count(), 2);
}

#[tokio::test]
async fn test_routing_is_deterministic() {
    let s = specialists();
    let first = s.router.select("Rome, Texas").await.unwrap();
    let second = s.router.select("Rome, Texas").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unrelated_prompt_falls_back_to_first_agent() {
    let s = specialists();
    // Zero vector: every score is 0.0, so the first registered agent wins.
    let (decision, _) = s.router.route("Hello there").await.unwrap();
    assert_eq!(decision.index, 0);
    assert_eq!(decision.score, 0.0);
}

#[tokio::test]
async fn test_empty_router_is_configuration_error() {
    let embedder = Arc::new(MockEmbeddingProvider::new());
    let router = RoutingAgent::new(embedder.clone(), Vec::new());

    let err = router.route("anything").await.unwrap_err();

    assert!(matches!(err, DomainError::Configuration(msg) if msg.contains("no agents")));
    assert_eq!(embedder.call_count(), 0);
}
