use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Authoritative holder of session validity. Sessions are immutable once
/// issued; renewal means issuing a new one.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn issue(&self) -> Session {
        let session_id = uuid::Uuid::new_v4().to_string();
        let session = Session::new(session_id, self.ttl);

        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        session
    }

    /// True iff the id names a live session. Unknown, malformed, and
    /// expired ids all collapse to `false`.
    pub async fn verify(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;

        match sessions.get(session_id) {
            Some(session) if session.is_expired() => {
                sessions.remove(session_id);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Removes the session if present; a no-op otherwise.
    pub async fn revoke(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    pub async fn evict_expired(&self) {
        self.sessions
            .write()
            .await
            .retain(|_, session| !session.is_expired());
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
