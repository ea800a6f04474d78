//! Deterministic in-process capabilities for tests.
//!
//! Results are queued per capability and consumed in order. A drained queue
//! answers with `CapabilityError::Unavailable`, which exercises the flow's
//! fallback path. Every call is recorded for later assertions.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::screening::{AnswerEvaluation, CandidateProfile, DisplayLanguage};
use crate::ports::{
    AnswerEvaluator, CapabilityError, FollowupGenerator, ProfileExtractor, QuestionGenerator,
    Translator,
};

/// A recorded capability invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityCall {
    ExtractProfile { text: String },
    GenerateQuestions { tech_stack_csv: String },
    GenerateFollowup { question: String, answer: String },
    EvaluateAnswer { question: String, answer: String },
    Translate { text: String, target: DisplayLanguage },
}

/// How the scripted translator behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationMode {
    /// Returns the input unchanged.
    #[default]
    Identity,
    /// Prefixes the text with the target code, e.g. `[hi] Hello`.
    Tagged,
    /// Every translation fails.
    Failing,
}

#[derive(Debug, Default)]
struct Script {
    profiles: VecDeque<Result<CandidateProfile, CapabilityError>>,
    questions: VecDeque<Result<Vec<String>, CapabilityError>>,
    followups: VecDeque<Result<String, CapabilityError>>,
    evaluations: VecDeque<Result<AnswerEvaluation, CapabilityError>>,
    translation: TranslationMode,
    calls: Vec<CapabilityCall>,
}

/// Scripted implementation of every screening capability port.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCapabilities {
    script: Arc<Mutex<Script>>,
    delay: Duration,
}

fn drained(capability: &str) -> CapabilityError {
    CapabilityError::unavailable(format!("no scripted {} left", capability))
}

impl ScriptedCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_profile(self, profile: CandidateProfile) -> Self {
        self.script().profiles.push_back(Ok(profile));
        self
    }

    pub fn with_profile_error(self, error: CapabilityError) -> Self {
        self.script().profiles.push_back(Err(error));
        self
    }

    pub fn with_questions<I, S>(self, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let questions = questions.into_iter().map(Into::into).collect();
        self.script().questions.push_back(Ok(questions));
        self
    }

    pub fn with_questions_error(self, error: CapabilityError) -> Self {
        self.script().questions.push_back(Err(error));
        self
    }

    pub fn with_followup(self, question: impl Into<String>) -> Self {
        self.script().followups.push_back(Ok(question.into()));
        self
    }

    pub fn with_followup_error(self, error: CapabilityError) -> Self {
        self.script().followups.push_back(Err(error));
        self
    }

    pub fn with_evaluation(self, evaluation: AnswerEvaluation) -> Self {
        self.script().evaluations.push_back(Ok(evaluation));
        self
    }

    pub fn with_evaluation_error(self, error: CapabilityError) -> Self {
        self.script().evaluations.push_back(Err(error));
        self
    }

    pub fn with_translation(self, mode: TranslationMode) -> Self {
        self.script().translation = mode;
        self
    }

    /// Delays every model capability call; translation is not delayed.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<CapabilityCall> {
        self.script().calls.clone()
    }

    /// Calls other than translations.
    pub fn model_calls(&self) -> Vec<CapabilityCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, CapabilityCall::Translate { .. }))
            .collect()
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl ProfileExtractor for ScriptedCapabilities {
    async fn extract_profile(&self, text: &str) -> Result<CandidateProfile, CapabilityError> {
        let next = {
            let mut script = self.script();
            script.calls.push(CapabilityCall::ExtractProfile {
                text: text.to_string(),
            });
            script.profiles.pop_front()
        };
        self.pause().await;
        next.unwrap_or_else(|| Err(drained("profile")))
    }
}

#[async_trait]
impl QuestionGenerator for ScriptedCapabilities {
    async fn generate_questions(
        &self,
        tech_stack_csv: &str,
    ) -> Result<Vec<String>, CapabilityError> {
        let next = {
            let mut script = self.script();
            script.calls.push(CapabilityCall::GenerateQuestions {
                tech_stack_csv: tech_stack_csv.to_string(),
            });
            script.questions.pop_front()
        };
        self.pause().await;
        next.unwrap_or_else(|| Err(drained("questions")))
    }
}

#[async_trait]
impl FollowupGenerator for ScriptedCapabilities {
    async fn generate_followup(
        &self,
        question: &str,
        answer: &str,
        _context: &str,
    ) -> Result<String, CapabilityError> {
        let next = {
            let mut script = self.script();
            script.calls.push(CapabilityCall::GenerateFollowup {
                question: question.to_string(),
                answer: answer.to_string(),
            });
            script.followups.pop_front()
        };
        self.pause().await;
        next.unwrap_or_else(|| Err(drained("follow-up")))
    }
}

#[async_trait]
impl AnswerEvaluator for ScriptedCapabilities {
    async fn evaluate_answer(
        &self,
        _context: &str,
        question: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation, CapabilityError> {
        let next = {
            let mut script = self.script();
            script.calls.push(CapabilityCall::EvaluateAnswer {
                question: question.to_string(),
                answer: answer.to_string(),
            });
            script.evaluations.pop_front()
        };
        self.pause().await;
        next.unwrap_or_else(|| Err(drained("evaluation")))
    }
}

#[async_trait]
impl Translator for ScriptedCapabilities {
    async fn translate(
        &self,
        text: &str,
        target: DisplayLanguage,
    ) -> Result<String, CapabilityError> {
        let mode = {
            let mut script = self.script();
            script.calls.push(CapabilityCall::Translate {
                text: text.to_string(),
                target,
            });
            script.translation
        };
        match mode {
            TranslationMode::Identity => Ok(text.to_string()),
            TranslationMode::Tagged => Ok(format!("[{}] {}", target.code(), text)),
            TranslationMode::Failing => Err(CapabilityError::unavailable("translation disabled")),
        }
    }
}
