//! SubmitUtteranceHandler - Command handler for one candidate turn.

use std::sync::Arc;

use crate::application::FlowController;
use crate::domain::foundation::SessionId;
use crate::domain::screening::{CandidateReport, InterviewPhase};
use crate::ports::{ReportSink, SessionStore};

use super::InterviewError;

/// Command carrying one candidate utterance.
#[derive(Debug, Clone)]
pub struct SubmitUtteranceCommand {
    pub session_id: SessionId,
    pub text: String,
}

/// Result of a processed turn.
#[derive(Debug, Clone)]
pub struct SubmitUtteranceResult {
    /// Interviewer replies in the display language.
    pub messages: Vec<String>,
    pub input_enabled: bool,
    pub phase: InterviewPhase,
    /// Set on the turn that finished the interview.
    pub report: Option<CandidateReport>,
}

/// Runs one turn of an interview.
///
/// The session lock is held for the whole turn, so concurrent submissions
/// for the same session are processed one after another.
pub struct SubmitUtteranceHandler {
    store: Arc<dyn SessionStore>,
    flow: Arc<FlowController>,
    report_sink: Arc<dyn ReportSink>,
}

impl SubmitUtteranceHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        flow: Arc<FlowController>,
        report_sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            store,
            flow,
            report_sink,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitUtteranceCommand,
    ) -> Result<SubmitUtteranceResult, InterviewError> {
        let text = cmd.text.trim();
        if text.is_empty() {
            return Err(InterviewError::MalformedUserInput);
        }

        let handle = self.store.load(cmd.session_id).await?;
        let mut session = handle.lock().await;

        if session.is_terminated() {
            return Err(InterviewError::AlreadyTerminated(cmd.session_id));
        }

        let (state, outcome) = self
            .flow
            .step(session.state().clone(), text, session.language())
            .await;

        session.record_turn(state, text, &outcome.messages);
        self.store.save(&session).await?;

        if let Some(report) = &outcome.report {
            match self.report_sink.publish(cmd.session_id, report).await {
                Ok(()) => tracing::info!(session_id = %cmd.session_id, "candidate report published"),
                Err(err) => tracing::warn!(
                    session_id = %cmd.session_id,
                    error = %err,
                    "failed to publish candidate report"
                ),
            }
        }

        if outcome.terminated {
            if let Err(err) = self.store.archive(cmd.session_id).await {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    error = %err,
                    "failed to archive finished interview"
                );
            }
        }

        Ok(SubmitUtteranceResult {
            messages: outcome.messages,
            input_enabled: outcome.input_enabled,
            phase: session.phase(),
            report: outcome.report,
        })
    }
}
