/// Running commands end to end against scripted clients.
use std::io::Write;
use std::sync::Arc;

use agentflow::cli::commands::{route, workflow};
use agentflow::cli::AppContext;
use agentflow::domain::models::Config;
use agentflow::infrastructure::mock::{MockCompletionClient, MockEmbeddingProvider};

fn embedder() -> Arc<MockEmbeddingProvider> {
    Arc::new(
        MockEmbeddingProvider::new()
            .with_keyword_axis(&["texas"])
            .with_keyword_axis(&["europe", "italy"])
            .with_numeric_axis(&["number", "math"]),
    )
}

#[tokio::test]
async fn test_route_command_answers_sample_prompts() {
    let client = Arc::new(MockCompletionClient::constant("An answer"));
    let embedder = embedder();
    let ctx = AppContext::with_clients(Config::default(), client.clone(), embedder.clone());

    route::execute(route::RouteArgs { prompts: Vec::new() }, &ctx, true)
        .await
        .unwrap();

    // One specialist call per sample prompt; prompt plus description batch per route
    assert_eq!(client.call_count(), route::SAMPLE_PROMPTS.len());
    assert_eq!(embedder.call_count(), 2 * route::SAMPLE_PROMPTS.len());
    let systems: Vec<String> = client
        .requests()
        .into_iter()
        .filter_map(|r| r.system)
        .collect();
    assert!(systems[2].contains("math professor"));
}

#[tokio::test]
async fn test_route_command_surfaces_model_failure() {
    let ctx = AppContext::with_clients(
        Config::default(),
        Arc::new(MockCompletionClient::failing("quota exhausted")),
        embedder(),
    );

    let err = route::execute(
        route::RouteArgs {
            prompts: vec!["Tell me about Texas".to_string()],
        },
        &ctx,
        true,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("quota exhausted"));
}

#[tokio::test]
async fn test_workflow_command_runs_plan_from_spec_file() {
    let mut spec = tempfile::NamedTempFile::new().unwrap();
    spec.write_all(b"Email Router: routes support email to the right team.")
        .unwrap();

    let client = Arc::new(MockCompletionClient::with_responder(|request| {
        let system = request.system.as_deref().unwrap_or_default();
        if system.starts_with("You are an action planning agent") {
            Ok("1. Define the user personas and stories\n\nGood luck!".to_string())
        } else if request.user.starts_with("Does the following answer") {
            Ok("VERDICT: YES".to_string())
        } else {
            Ok("As a support agent, I want email sorted so that I reply faster.".to_string())
        }
    }));
    let embedder = Arc::new(MockEmbeddingProvider::new().with_keyword_axis(&["personas"]));
    let ctx = AppContext::with_clients(Config::default(), client.clone(), embedder);

    workflow::execute(
        workflow::WorkflowArgs {
            spec: Some(spec.path().to_path_buf()),
            prompt: "What would the development tasks for this product be?".to_string(),
        },
        &ctx,
        true,
    )
    .await
    .unwrap();

    // planner, worker, verdict
    assert_eq!(client.call_count(), 3);
    assert!(client.requests()[1].user.contains("Email Router"));
}

#[tokio::test]
async fn test_workflow_command_missing_spec_makes_no_calls() {
    let client = Arc::new(MockCompletionClient::constant("unused"));
    let ctx = AppContext::with_clients(Config::default(), client.clone(), embedder());

    let result = workflow::execute(
        workflow::WorkflowArgs {
            spec: Some("/no/such/product-spec.txt".into()),
            prompt: "Plan it".to_string(),
        },
        &ctx,
        true,
    )
    .await;

    assert!(result.is_err());
    assert_eq!(client.call_count(), 0);
}
