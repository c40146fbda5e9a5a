//! Live chat sessions
//!
//! Each session is owned by one logged-in user and lives until it is ended
//! or the process exits. Sessions share no mutable state; turns within one
//! session run one at a time.

#[cfg(test)]
pub mod testing;

use crate::auth::Identity;
use crate::model_selection::ModelChoices;
use crate::session::Session;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// A registered session and who it belongs to
pub struct SessionRecord {
    pub id: String,
    pub identity: Identity,
    pub created_at: DateTime<Utc>,
    /// Held for the whole turn, so overlapping turns queue up
    pub session: Mutex<Session>,
}

/// Registry of all live sessions
pub struct SessionManager {
    system_prompt: String,
    sessions: RwLock<HashMap<String, Arc<SessionRecord>>>,
}

impl SessionManager {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session for `identity`, starting on the selector's initial model
    pub async fn start(&self, identity: Identity, choices: &ModelChoices) -> Arc<SessionRecord> {
        let mut session = Session::new(self.system_prompt.clone());
        session.set_model(choices.selected());

        let record = Arc::new(SessionRecord {
            id: uuid::Uuid::new_v4().to_string(),
            identity,
            created_at: Utc::now(),
            session: Mutex::new(session),
        });

        let active = {
            let mut sessions = self.sessions.write().await;
            sessions.insert(record.id.clone(), record.clone());
            sessions.len()
        };

        tracing::info!(
            session_id = %record.id,
            active,
            user = %record.identity.identifier,
            model = %choices.selected(),
            "Session started"
        );

        record
    }

    pub async fn get(&self, id: &str) -> Option<Arc<SessionRecord>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drop a session; returns whether it existed
    pub async fn end(&self, id: &str) -> bool {
        let (removed, active) = {
            let mut sessions = self.sessions.write().await;
            let removed = sessions.remove(id);
            (removed, sessions.len())
        };
        if let Some(record) = &removed {
            tracing::info!(
                session_id = %id,
                active,
                user = %record.identity.identifier,
                "Session ended"
            );
        }
        removed.is_some()
    }

    /// Number of live sessions
    #[allow(dead_code)] // Diagnostics and tests
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
