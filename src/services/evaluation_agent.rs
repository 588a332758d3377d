//! Evaluation agent: a bounded worker / judge / revise loop.
//!
//! Each iteration asks the worker for a response and asks the judge (the
//! completion client, in the evaluator's persona) whether it meets the
//! criteria. A rejection with iterations left costs one more judge call for
//! correction instructions, which are folded into the next worker prompt.
//! With a bound of K the loop makes at most K worker calls and K verdict
//! calls; when the bound is hit the last response comes back flagged
//! [`EvaluationOutcome::Exhausted`].

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{EvaluationOutcome, EvaluationResult, Verdict};
use crate::domain::ports::{Agent, CompletionClient, CompletionRequest};

/// Default bound on worker/judge round trips.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Wraps a worker agent and re-prompts it until the judge accepts its
/// response against `criteria` or the iteration bound is reached.
pub struct EvaluationAgent {
    client: Arc<dyn CompletionClient>,
    worker: Arc<dyn Agent>,
    persona: String,
    criteria: String,
    max_iterations: u32,
}

impl EvaluationAgent {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        worker: Arc<dyn Agent>,
        persona: impl Into<String>,
        criteria: impl Into<String>,
    ) -> Self {
        Self {
            client,
            worker,
            persona: persona.into(),
            criteria: criteria.into(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the iteration bound. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn judge_system_prompt(&self) -> String {
        format!("{}. Forget all previous context.", self.persona)
    }

    fn verdict_prompt(&self, response: &str) -> String {
        format!(
            "Does the following answer: {response}\n\
             Meet this criteria: {}\n\
             Respond on the first line with exactly `VERDICT: YES` or `VERDICT: NO`, \
             then give the reason on the following lines.",
            self.criteria
        )
    }

    fn correction_prompt(evaluation: &str) -> String {
        format!("Provide instructions to fix an answer based on these reasons why it is incorrect: {evaluation}")
    }

    fn revised_prompt(original: &str, response: &str, instructions: &str) -> String {
        format!(
            "The original prompt was: {original}\n\
             The response to that prompt was: {response}\n\
             It has been evaluated as incorrect.\n\
             Make only these corrections, do not alter content validity: {instructions}"
        )
    }

    /// Run the loop for `prompt`.
    ///
    /// Errors from the worker or the judge propagate immediately; running out
    /// of iterations is not an error.
    #[instrument(skip(self, prompt), fields(max_iterations = self.max_iterations))]
    pub async fn evaluate(&self, prompt: &str) -> DomainResult<EvaluationResult> {
        let judge_system = self.judge_system_prompt();
        let mut next_prompt = prompt.to_string();
        let mut last_response = String::new();
        let mut last_evaluation = String::new();

        for iteration in 1..=self.max_iterations {
            info!(iteration, "worker generating response");
            let response = self.worker.respond(&next_prompt).await?;
            debug!(iteration, response = %response, "worker response");

            let evaluation = self
                .client
                .complete(CompletionRequest::with_system(
                    judge_system.clone(),
                    self.verdict_prompt(&response),
                ))
                .await?;

            match Verdict::parse(&evaluation) {
                Verdict::Accept => {
                    info!(iteration, "response accepted");
                    return Ok(EvaluationResult {
                        final_response: response,
                        evaluation,
                        iterations: iteration,
                        outcome: EvaluationOutcome::Accepted,
                    });
                }
                Verdict::Reject => info!(iteration, "response rejected"),
                Verdict::Unclear => {
                    warn!(iteration, "judge output had no verdict, treating as rejection");
                }
            }

            if iteration < self.max_iterations {
                let instructions = self
                    .client
                    .complete(CompletionRequest::with_system(
                        judge_system.clone(),
                        Self::correction_prompt(&evaluation),
                    ))
                    .await?;
                next_prompt = Self::revised_prompt(prompt, &response, &instructions);
            }

            last_response = response;
            last_evaluation = evaluation;
        }

        warn!(
            iterations = self.max_iterations,
            "evaluation bound reached without acceptance"
        );
        Ok(EvaluationResult {
            final_response: last_response,
            evaluation: last_evaluation,
            iterations: self.max_iterations,
            outcome: EvaluationOutcome::Exhausted,
        })
    }
}

#[async_trait]
impl Agent for EvaluationAgent {
    async fn respond(&self, input: &str) -> DomainResult<String> {
        Ok(self.evaluate(input).await?.final_response)
    }
}
