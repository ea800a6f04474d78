//! ChangeLanguageHandler - Command handler for switching display language.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::screening::DisplayLanguage;
use crate::ports::SessionStore;

use super::InterviewError;

#[derive(Debug, Clone)]
pub struct ChangeLanguageCommand {
    pub session_id: SessionId,
    pub language: DisplayLanguage,
}

#[derive(Debug, Clone)]
pub struct ChangeLanguageResult {
    /// The restarted transcript: the localized greeting only.
    pub messages: Vec<String>,
    pub input_enabled: bool,
}

/// Switches the display language of an interview.
///
/// Only the candidate-facing transcript restarts; the conversation state and
/// its phase carry on untouched.
pub struct ChangeLanguageHandler {
    store: Arc<dyn SessionStore>,
}

impl ChangeLanguageHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ChangeLanguageCommand,
    ) -> Result<ChangeLanguageResult, InterviewError> {
        let handle = self.store.load(cmd.session_id).await?;
        let mut session = handle.lock().await;

        session.change_language(cmd.language);
        self.store.save(&session).await?;

        tracing::debug!(
            session_id = %cmd.session_id,
            language = cmd.language.code(),
            "display language changed"
        );

        Ok(ChangeLanguageResult {
            messages: session
                .transcript()
                .iter()
                .map(|entry| entry.text.clone())
                .collect(),
            input_enabled: !session.is_terminated(),
        })
    }
}
