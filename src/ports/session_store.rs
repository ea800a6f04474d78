//! Session Store Port - Interface for keeping interview sessions between turns.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::screening::InterviewSession;

/// Lockable handle to a live session.
///
/// Holding the lock is what serializes turns for one session.
pub type SessionHandle = Arc<Mutex<InterviewSession>>;

/// Errors that can occur during session storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session already exists: {0}")]
    AlreadyExists(SessionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for creating, loading and persisting interview sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Registers a new session and returns its handle.
    async fn create(&self, session: InterviewSession) -> Result<SessionHandle, SessionStoreError>;

    /// Returns the handle for an existing session.
    async fn load(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError>;

    /// Persists a snapshot of the session after a turn.
    ///
    /// Called while the session lock is held, so implementations must not
    /// lock the handle themselves.
    async fn save(&self, session: &InterviewSession) -> Result<(), SessionStoreError>;

    /// Moves a finished session out of the live set.
    ///
    /// An archived session stays loadable until the implementation's
    /// retention limit evicts it. Archiving an unknown or already archived
    /// session is not an error.
    async fn archive(&self, id: SessionId) -> Result<(), SessionStoreError>;
}
