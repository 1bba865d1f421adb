//! Session ownership — each session exclusively owns one `Conversation`.
//!
//! The per-session mutex is held for a whole consultation, so a session never has
//! more than one completion call in flight and its conversation has a single writer.
//!
//! Sessions that go untouched for longer than the idle TTL are dropped the next time
//! a session is created, so the table stays bounded by recent activity.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::conversation::Conversation;

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub conversation: Conversation,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation: Conversation::new(),
            created_at: Utc::now(),
        }
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// Idle time after which a session becomes eligible for pruning.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// In-memory session table. Sessions live until deleted, until they sit idle past
/// the TTL, or until the process exits.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl SessionRegistry {
    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    pub async fn create(&self) -> Uuid {
        let session = Session::new();
        let id = session.id;
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        // A handle still held elsewhere belongs to a request in progress.
        sessions.retain(|_, entry| {
            now.duration_since(entry.last_seen) <= self.idle_ttl
                || Arc::strong_count(&entry.handle) > 1
        });
        let pruned = before - sessions.len();
        if pruned > 0 {
            info!("Pruned {pruned} idle sessions");
        }

        sessions.insert(
            id,
            Entry {
                handle: Arc::new(Mutex::new(session)),
                last_seen: now,
            },
        );
        info!("Created session {id}");
        id
    }

    /// Looks up a session and marks it as recently used.
    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.handle.clone())
    }

    /// Returns whether a session was removed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Removed session {id}");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
