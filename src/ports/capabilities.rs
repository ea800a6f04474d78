//! Screening capability ports.
//!
//! Each capability is a black box that either returns a value conforming to
//! its contract or fails. Callers never see partial output: a failure is a
//! [`CapabilityError`] and the flow substitutes its fallback.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::screening::{AnswerEvaluation, CandidateProfile, DisplayLanguage};

use super::ai_provider::AIError;

/// Why a capability call produced no usable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The backing service failed or could not be reached.
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// The call did not finish within its deadline.
    #[error("capability timed out after {0}s")]
    Timeout(u64),

    /// The service answered, but not in the contracted shape.
    #[error("malformed capability output: {0}")]
    Malformed(String),
}

impl CapabilityError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

impl From<AIError> for CapabilityError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::Timeout { timeout_secs } => Self::Timeout(u64::from(timeout_secs)),
            AIError::Parse(message) => Self::Malformed(message),
            AIError::ContentFiltered { reason } => Self::Malformed(reason),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

/// Converts free-text self description into a candidate profile.
///
/// Every field is present in the result; unrecoverable fields are empty.
#[async_trait]
pub trait ProfileExtractor: Send + Sync {
    async fn extract_profile(&self, text: &str) -> Result<CandidateProfile, CapabilityError>;
}

/// Generates 1-2 questions scoped to a comma-joined tech stack.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_questions(&self, tech_stack_csv: &str)
        -> Result<Vec<String>, CapabilityError>;
}

/// Generates exactly one follow-up question.
#[async_trait]
pub trait FollowupGenerator: Send + Sync {
    async fn generate_followup(
        &self,
        question: &str,
        answer: &str,
        context: &str,
    ) -> Result<String, CapabilityError>;
}

/// Classifies an answer as correct or not and decides on a follow-up.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate_answer(
        &self,
        context: &str,
        question: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation, CapabilityError>;
}

/// Translates text into a target language.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: DisplayLanguage)
        -> Result<String, CapabilityError>;
}

/// Translator that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

#[async_trait]
impl Translator for IdentityTranslator {
    async fn translate(
        &self,
        text: &str,
        _target: DisplayLanguage,
    ) -> Result<String, CapabilityError> {
        Ok(text.to_string())
    }
}
