//! StartInterviewHandler - Command handler for opening a new interview.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::screening::{DisplayLanguage, InterviewSession};
use crate::ports::SessionStore;

use super::InterviewError;

/// Command to start an interview.
#[derive(Debug, Clone, Default)]
pub struct StartInterviewCommand {
    pub language: DisplayLanguage,
}

/// Result of starting an interview.
#[derive(Debug, Clone)]
pub struct StartInterviewResult {
    pub session_id: SessionId,
    /// Messages to show, already in the display language.
    pub messages: Vec<String>,
    pub input_enabled: bool,
}

/// Handler for starting interviews.
pub struct StartInterviewHandler {
    store: Arc<dyn SessionStore>,
}

impl StartInterviewHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: StartInterviewCommand,
    ) -> Result<StartInterviewResult, InterviewError> {
        let session = InterviewSession::start(cmd.language);
        let session_id = session.id();
        let messages = session
            .transcript()
            .iter()
            .map(|entry| entry.text.clone())
            .collect();

        self.store.create(session).await?;
        tracing::info!(%session_id, language = cmd.language.code(), "interview started");

        Ok(StartInterviewResult {
            session_id,
            messages,
            input_enabled: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::screening::{ContextMessage, InterviewPhase, WORKING_LANGUAGE};

    #[tokio::test]
    async fn creates_session_with_localized_greeting() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = StartInterviewHandler::new(store.clone());

        let result = handler
            .handle(StartInterviewCommand {
                language: DisplayLanguage::German,
            })
            .await
            .unwrap();

        assert_eq!(result.messages, vec![DisplayLanguage::German.greeting()]);
        assert!(result.input_enabled);

        let handle = store.load(result.session_id).await.unwrap();
        let session = handle.lock().await;
        assert_eq!(session.phase(), InterviewPhase::GreetingAck);
        assert_eq!(session.language(), DisplayLanguage::German);
        assert_eq!(
            session.state().model_context(),
            &[ContextMessage::assistant(WORKING_LANGUAGE.greeting())]
        );
    }

    #[tokio::test]
    async fn defaults_to_english() {
        let store = Arc::new(InMemorySessionStore::new());
        let result = StartInterviewHandler::new(store)
            .handle(StartInterviewCommand::default())
            .await
            .unwrap();

        assert_eq!(result.messages, vec![DisplayLanguage::English.greeting()]);
    }
}
