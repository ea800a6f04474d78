//! GetTranscriptHandler - Query handler for the candidate-facing transcript.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::screening::{DisplayLanguage, InterviewPhase, TranscriptEntry};
use crate::ports::SessionStore;

use super::InterviewError;

/// Query for one interview's transcript.
#[derive(Debug, Clone)]
pub struct GetTranscriptQuery {
    pub session_id: SessionId,
}

/// Read-only view of an interview.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptView {
    pub session_id: SessionId,
    pub phase: InterviewPhase,
    pub language: DisplayLanguage,
    pub transcript: Vec<TranscriptEntry>,
    pub input_enabled: bool,
}

pub struct GetTranscriptHandler {
    store: Arc<dyn SessionStore>,
}

impl GetTranscriptHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetTranscriptQuery) -> Result<TranscriptView, InterviewError> {
        let handle = self.store.load(query.session_id).await?;
        let session = handle.lock().await;

        Ok(TranscriptView {
            session_id: session.id(),
            phase: session.phase(),
            language: session.language(),
            transcript: session.transcript().to_vec(),
            input_enabled: !session.is_terminated(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::screening::{InterviewSession, Speaker};

    #[tokio::test]
    async fn returns_transcript_of_existing_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = InterviewSession::start(DisplayLanguage::Hindi);
        let id = session.id();
        store.create(session).await.unwrap();

        let view = GetTranscriptHandler::new(store)
            .handle(GetTranscriptQuery { session_id: id })
            .await
            .unwrap();

        assert_eq!(view.session_id, id);
        assert_eq!(view.phase, InterviewPhase::GreetingAck);
        assert_eq!(view.language, DisplayLanguage::Hindi);
        assert_eq!(view.transcript.len(), 1);
        assert_eq!(view.transcript[0].speaker, Speaker::Interviewer);
        assert!(view.input_enabled);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = SessionId::new();

        let err = GetTranscriptHandler::new(store)
            .handle(GetTranscriptQuery { session_id: id })
            .await
            .unwrap_err();

        assert_eq!(err, InterviewError::NotFound(id));
    }
}
