//! Answer evaluation verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasoning recorded when the evaluator could not be reached.
pub const EVALUATION_UNAVAILABLE: &str = "evaluation unavailable";

/// Binary correctness classification. Partially correct answers are `Correct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    False,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => f.write_str("Correct"),
            Verdict::False => f.write_str("False"),
        }
    }
}

/// Whether a follow-up question should be asked.
///
/// `No` when the candidate said they do not know the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowUp {
    Yes,
    No,
}

impl FollowUp {
    pub fn is_requested(&self) -> bool {
        matches!(self, FollowUp::Yes)
    }
}

/// Output of the answer-evaluation capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub verdict: Verdict,
    /// Short diagnostic text. Never shown to the candidate.
    pub reasoning: String,
    pub follow_up: FollowUp,
}

impl AnswerEvaluation {
    pub fn new(verdict: Verdict, reasoning: impl Into<String>, follow_up: FollowUp) -> Self {
        Self {
            verdict,
            reasoning: reasoning.into(),
            follow_up,
        }
    }

    /// Fallback used when evaluation fails; the interview moves on.
    pub fn unavailable() -> Self {
        Self::new(Verdict::Correct, EVALUATION_UNAVAILABLE, FollowUp::No)
    }
}
