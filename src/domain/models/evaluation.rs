//! Evaluation loop results and judge verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an evaluation loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationOutcome {
    /// The judge accepted the final response.
    Accepted,
    /// The iteration bound was reached without acceptance; the last response
    /// is returned as-is.
    Exhausted,
}

impl fmt::Display for EvaluationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Result of one call to the evaluation agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Last worker response.
    pub final_response: String,
    /// Last judge output, verbatim.
    pub evaluation: String,
    /// Number of worker invocations performed.
    pub iterations: u32,
    pub outcome: EvaluationOutcome,
}

impl EvaluationResult {
    pub fn is_accepted(&self) -> bool {
        self.outcome == EvaluationOutcome::Accepted
    }

    /// Human-readable one-liner about how the loop ended.
    pub fn diagnostic(&self) -> String {
        match self.outcome {
            EvaluationOutcome::Accepted => {
                format!("accepted after {} iteration(s)", self.iterations)
            }
            EvaluationOutcome::Exhausted => format!(
                "not accepted after {} iteration(s); returning last response",
                self.iterations
            ),
        }
    }
}

/// Parsed judge signal.
///
/// Judges are asked to open with `VERDICT: YES` or `VERDICT: NO`. The parser
/// also accepts a bare leading `Yes`/`No`, with or without markdown emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
    /// Could not tell; callers treat this as a rejection.
    Unclear,
}

impl Verdict {
    pub fn parse(evaluation: &str) -> Self {
        let Some(first_line) = evaluation.lines().map(str::trim).find(|l| !l.is_empty()) else {
            return Self::Unclear;
        };

        let normalized = first_line
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_ascii_lowercase();
        let body = normalized
            .strip_prefix("verdict")
            .map(|rest| rest.trim_start_matches(|c: char| c == ':' || c == '*' || c.is_whitespace()))
            .unwrap_or(normalized.as_str());

        let word: String = body.chars().take_while(char::is_ascii_alphabetic).collect();
        match word.as_str() {
            "yes" => Self::Accept,
            "no" => Self::Reject,
            _ => Self::Unclear,
        }
    }

    pub fn is_accept(self) -> bool {
        self == Self::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict_grammar() {
        assert_eq!(Verdict::parse("VERDICT: YES\nLooks right."), Verdict::Accept);
        assert_eq!(Verdict::parse("VERDICT: NO\nIt is a sentence."), Verdict::Reject);
    }

    #[test]
    fn test_parse_bare_answers() {
        assert_eq!(Verdict::parse("Yes, the answer is a city."), Verdict::Accept);
        assert_eq!(Verdict::parse("No. The answer is a full sentence."), Verdict::Reject);
        assert_eq!(Verdict::parse("  \n\n yes"), Verdict::Accept);
    }

    #[test]
    fn test_parse_markdown_emphasis() {
        assert_eq!(Verdict::parse("**VERDICT: YES**"), Verdict::Accept);
        assert_eq!(Verdict::parse("**No**, because"), Verdict::Reject);
    }

    #[test]
    fn test_parse_unclear() {
        assert_eq!(Verdict::parse(""), Verdict::Unclear);
        assert_eq!(Verdict::parse("   "), Verdict::Unclear);
        assert_eq!(Verdict::parse("Yesterday it was fine"), Verdict::Unclear);
        assert_eq!(Verdict::parse("Maybe"), Verdict::Unclear);
        assert_eq!(Verdict::parse("Notably, the answer"), Verdict::Unclear);
    }

    #[test]
    fn test_diagnostic_mentions_exhaustion() {
        let result = EvaluationResult {
            final_response: "Paris".to_string(),
            evaluation: "VERDICT: NO".to_string(),
            iterations: 10,
            outcome: EvaluationOutcome::Exhausted,
        };
        assert!(!result.is_accepted());
        assert!(result.diagnostic().contains("not accepted"));
    }
}
