//! Errors returned by the interview handlers.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::ports::SessionStoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterviewError {
    /// The candidate submitted nothing usable.
    #[error("Utterance must not be empty")]
    MalformedUserInput,

    #[error("Interview not found: {0}")]
    NotFound(SessionId),

    /// Input arrived after the interview ended.
    #[error("Interview {0} has already terminated")]
    AlreadyTerminated(SessionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl InterviewError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InterviewError::MalformedUserInput => ErrorCode::EmptyField,
            InterviewError::NotFound(_) => ErrorCode::SessionNotFound,
            InterviewError::AlreadyTerminated(_) => ErrorCode::InterviewTerminated,
            InterviewError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

impl From<SessionStoreError> for InterviewError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => InterviewError::NotFound(id),
            other => InterviewError::Storage(other.to_string()),
        }
    }
}
