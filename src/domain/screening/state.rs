//! Conversation state threaded through every turn of an interview.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use crate::domain::foundation::StateMachine;

use super::context::ContextMessage;
use super::evaluation::{AnswerEvaluation, Verdict};
use super::phase::InterviewPhase;
use super::profile::CandidateProfile;
use super::report::CandidateReport;

/// Broken structural invariant of a [`ConversationState`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{answers} answers but {verdicts} verdicts and {reasonings} reasonings")]
    MisalignedEvaluations {
        answers: usize,
        verdicts: usize,
        reasonings: usize,
    },

    #[error("{asked} questions asked but {answers} answers recorded")]
    MisalignedAnswers { asked: usize, answers: usize },

    #[error("profile presence does not match phase {0:?}")]
    ProfileOutOfPhase(InterviewPhase),

    #[error("questions still pending after termination")]
    PendingAfterTermination,
}

/// Everything the flow needs to resume an interview on the next turn.
///
/// Owned by the session driving the conversation. The UI transcript lives
/// outside this record; `model_context` is the only history the model sees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub(crate) phase: InterviewPhase,
    pub(crate) raw_profile_text: String,
    pub(crate) profile: Option<CandidateProfile>,
    pub(crate) pending_questions: VecDeque<String>,
    pub(crate) asked_questions: Vec<String>,
    pub(crate) answers: Vec<String>,
    pub(crate) verdicts: Vec<Verdict>,
    pub(crate) reasonings: Vec<String>,
    pub(crate) model_context: Vec<ContextMessage>,
}

impl ConversationState {
    /// Creates the state for a fresh interview, seeded with the greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            model_context: vec![ContextMessage::assistant(greeting)],
            ..Default::default()
        }
    }

    pub fn phase(&self) -> InterviewPhase {
        self.phase
    }

    pub fn raw_profile_text(&self) -> &str {
        &self.raw_profile_text
    }

    pub fn profile(&self) -> Option<&CandidateProfile> {
        self.profile.as_ref()
    }

    pub fn pending_questions(&self) -> &VecDeque<String> {
        &self.pending_questions
    }

    pub fn asked_questions(&self) -> &[String] {
        &self.asked_questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn reasonings(&self) -> &[String] {
        &self.reasonings
    }

    pub fn model_context(&self) -> &[ContextMessage] {
        &self.model_context
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == InterviewPhase::Terminated
    }

    /// The most recent question, if it is still waiting for an answer.
    pub fn unanswered_question(&self) -> Option<&str> {
        if self.asked_questions.len() > self.answers.len() {
            self.asked_questions.last().map(String::as_str)
        } else {
            None
        }
    }

    /// Moves to `target`, ignoring transitions the phase graph does not allow.
    pub(crate) fn advance_to(&mut self, target: InterviewPhase) {
        match self.phase.transition_to(target) {
            Ok(next) => {
                tracing::debug!(from = ?self.phase, to = ?next, "interview phase transition");
                self.phase = next;
            }
            Err(err) => tracing::warn!(error = %err, "rejected interview phase transition"),
        }
    }

    /// Ends the interview; nothing remains queued afterwards.
    pub(crate) fn terminate(&mut self) {
        self.advance_to(InterviewPhase::Terminated);
        self.pending_questions.clear();
    }

    pub(crate) fn append_profile_text(&mut self, text: &str) {
        self.raw_profile_text.push_str(text);
        self.raw_profile_text.push('\n');
    }

    pub(crate) fn push_user(&mut self, content: impl Into<String>) {
        self.model_context.push(ContextMessage::user(content));
    }

    pub(crate) fn push_assistant(&mut self, content: impl Into<String>) {
        self.model_context.push(ContextMessage::assistant(content));
    }

    /// Commits the profile. Only the first commit takes effect.
    pub(crate) fn commit_profile(&mut self, profile: CandidateProfile) {
        if self.profile.is_none() {
            self.profile = Some(profile);
        }
    }

    /// Queues generated questions behind anything already pending.
    pub(crate) fn enqueue_questions(&mut self, questions: impl IntoIterator<Item = String>) {
        self.pending_questions.extend(questions);
    }

    /// Puts a follow-up ahead of every queued question.
    pub(crate) fn prioritize_question(&mut self, question: String) {
        self.pending_questions.push_front(question);
    }

    /// Pops the next queued question and records it as asked.
    pub(crate) fn ask_next_question(&mut self) -> Option<String> {
        let question = self.pending_questions.pop_front()?;
        self.asked_questions.push(question.clone());
        self.push_assistant(question.clone());
        Some(question)
    }

    pub(crate) fn record_answer(&mut self, answer: impl Into<String>) {
        self.answers.push(answer.into());
    }

    pub(crate) fn record_evaluation(&mut self, evaluation: &AnswerEvaluation) {
        self.verdicts.push(evaluation.verdict);
        self.reasonings.push(evaluation.reasoning.clone());
    }

    /// Builds the final report. `None` until a profile has been committed.
    pub fn report(&self, ended_by_candidate: bool) -> Option<CandidateReport> {
        let profile = self.profile.as_ref()?;
        Some(CandidateReport::from_parts(
            profile,
            &self.asked_questions,
            &self.answers,
            &self.verdicts,
            &self.reasonings,
            ended_by_candidate,
        ))
    }

    /// Checks the structural invariants of the state.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let answers = self.answers.len();
        if self.verdicts.len() != answers || self.reasonings.len() != answers {
            return Err(InvariantViolation::MisalignedEvaluations {
                answers,
                verdicts: self.verdicts.len(),
                reasonings: self.reasonings.len(),
            });
        }

        let asked = self.asked_questions.len();
        if asked != answers && asked != answers + 1 {
            return Err(InvariantViolation::MisalignedAnswers { asked, answers });
        }

        let profile_expected = match self.phase {
            InterviewPhase::QuestionLoop => Some(true),
            InterviewPhase::Terminated => None,
            _ => Some(false),
        };
        if let Some(expected) = profile_expected {
            if self.profile.is_some() != expected {
                return Err(InvariantViolation::ProfileOutOfPhase(self.phase));
            }
        }

        if self.is_terminated() && !self.pending_questions.is_empty() {
            return Err(InvariantViolation::PendingAfterTermination);
        }

        Ok(())
    }
}
