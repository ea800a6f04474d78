//! In-Memory Session Store Adapter
//!
//! Keeps live sessions in a map of lockable handles. The handle is the
//! session record itself, so a turn's changes are visible as soon as the
//! lock is released.
//!
//! Finished sessions move to a bounded archive. The oldest archived session
//! is evicted once the archive is full, so the store never grows past the
//! live sessions plus the archive capacity.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::screening::InterviewSession;
use crate::ports::{SessionHandle, SessionStore, SessionStoreError};

/// Finished sessions kept readable by default.
pub const DEFAULT_ARCHIVE_CAPACITY: usize = 1024;

#[derive(Debug, Default)]
struct Sessions {
    live: HashMap<SessionId, SessionHandle>,
    archived: HashMap<SessionId, SessionHandle>,
    /// Archive insertion order, oldest first.
    archive_order: VecDeque<SessionId>,
}

impl Sessions {
    fn get(&self, id: &SessionId) -> Option<&SessionHandle> {
        self.live.get(id).or_else(|| self.archived.get(id))
    }
}

/// In-memory storage for interview sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<Sessions>>,
    archive_capacity: usize,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_archive_capacity(DEFAULT_ARCHIVE_CAPACITY)
    }

    /// A capacity of zero drops sessions as soon as they are archived.
    pub fn with_archive_capacity(archive_capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Sessions::default())),
            archive_capacity,
        }
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.live.len()
    }

    /// Number of finished sessions still held in the archive
    pub async fn archived_count(&self) -> usize {
        self.sessions.read().await.archived.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: InterviewSession) -> Result<SessionHandle, SessionStoreError> {
        let id = session.id();
        let mut sessions = self.sessions.write().await;
        if sessions.get(&id).is_some() {
            return Err(SessionStoreError::AlreadyExists(id));
        }

        let handle = Arc::new(Mutex::new(session));
        sessions.live.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    async fn load(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn save(&self, session: &InterviewSession) -> Result<(), SessionStoreError> {
        // The handle already holds the live record; only confirm it is still registered.
        if self.sessions.read().await.get(&session.id()).is_some() {
            Ok(())
        } else {
            Err(SessionStoreError::NotFound(session.id()))
        }
    }

    async fn archive(&self, id: SessionId) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let Some(handle) = sessions.live.remove(&id) else {
            return Ok(());
        };

        if self.archive_capacity == 0 {
            return Ok(());
        }

        while sessions.archive_order.len() >= self.archive_capacity {
            if let Some(evicted) = sessions.archive_order.pop_front() {
                sessions.archived.remove(&evicted);
                tracing::debug!(session_id = %evicted, "archived session evicted");
            }
        }
        sessions.archived.insert(id, handle);
        sessions.archive_order.push_back(id);
        Ok(())
    }
}
