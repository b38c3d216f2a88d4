//! Server-side session management

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::AuthResult,
    models::Session,
    repositories::SessionRepository,
    token::{SESSION_ID_LENGTH, generate_token},
};

/// Session manager for handling user sessions
#[derive(Clone)]
pub struct SessionManager {
    repository: Arc<dyn SessionRepository>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(repository: Arc<dyn SessionRepository>, ttl: Duration) -> Self {
        Self { repository, ttl }
    }

    /// Create a new session for a user
    pub async fn create_session(&self, user_id: Uuid) -> AuthResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: generate_token(SESSION_ID_LENGTH),
            user_id,
            expires_at: now + self.ttl,
            created_at: now,
        };

        self.repository.create(&session).await?;
        info!(%user_id, "Session created");

        Ok(session)
    }

    /// Resolve a session id to its user.
    ///
    /// Expired sessions are deleted on sight and resolve to `None`.
    pub async fn resolve(&self, session_id: &str) -> AuthResult<Option<Uuid>> {
        let Some(session) = self.repository.find(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            debug!(user_id = %session.user_id, "Dropping expired session");
            self.repository.delete(session_id).await?;
            return Ok(None);
        }

        Ok(Some(session.user_id))
    }

    /// Delete a session; unknown ids are ignored
    pub async fn destroy(&self, session_id: &str) -> AuthResult<()> {
        if self.repository.delete(session_id).await? {
            info!("Session destroyed");
        }
        Ok(())
    }

    /// Remove every expired session
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let removed = self.repository.delete_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Expired sessions removed");
        }
        Ok(removed)
    }
}
