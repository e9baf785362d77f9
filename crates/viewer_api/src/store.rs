use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use shared::domain::SessionId;
use tokio::sync::Mutex;

use crate::session::SessionState;

/// In-memory map of live sessions. Each entry is owned by exactly one client.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session_id: SessionId, state: SessionState) {
        self.sessions.lock().await.insert(session_id, state);
    }

    pub async fn remove(&self, session_id: SessionId) -> Option<SessionState> {
        self.sessions.lock().await.remove(&session_id)
    }

    pub async fn contains(&self, session_id: SessionId) -> bool {
        self.sessions.lock().await.contains_key(&session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Runs `f` against one session while holding the lock. `None` when the id is unknown.
    pub async fn with_session<T>(
        &self,
        session_id: SessionId,
        f: impl FnOnce(&mut SessionState) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.lock().await;
        sessions.get_mut(&session_id).map(f)
    }

    /// Drops sessions idle for longer than `ttl`. Returns the removed ids.
    pub async fn prune_idle(&self, now: DateTime<Utc>, ttl: Duration) -> Vec<SessionId> {
        let mut sessions = self.sessions.lock().await;
        let expired: Vec<SessionId> = sessions
            .iter()
            .filter(|(_, state)| now - state.last_seen() > ttl)
            .map(|(id, _)| *id)
            .collect();
        for id in &expired {
            sessions.remove(id);
        }
        expired
    }
}
