//! In-memory credential repositories

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ResetTokenRepository, SessionRepository, UserRepository};
use crate::models::{NewUser, PasswordResetToken, Session, UpdateUser, User};

/// User repository kept in process memory
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(DatabaseError::Conflict("users_email_key".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            name: new_user.name.clone(),
            bio: None,
            avatar_url: None,
            country: new_user.country.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, changes: &UpdateUser) -> DatabaseResult<Option<User>> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            user.name = Some(name.clone());
        }
        if let Some(bio) = &changes.bio {
            user.bio = Some(bio.clone());
        }
        if let Some(country) = &changes.country {
            user.country = country.clone();
        }
        if let Some(avatar_url) = &changes.avatar_url {
            user.avatar_url = Some(avatar_url.clone());
        }
        if let Some(password_hash) = &changes.password_hash {
            user.password_hash = password_hash.clone();
        }

        Ok(Some(user.clone()))
    }
}

/// Reset token repository kept in process memory
///
/// Redemption writes the new password hash through `users`.
#[derive(Clone)]
pub struct MemoryResetTokenRepository {
    tokens: Arc<RwLock<Vec<PasswordResetToken>>>,
    users: Arc<dyn UserRepository>,
}

impl MemoryResetTokenRepository {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            tokens: Arc::default(),
            users,
        }
    }

    /// Every token ever issued, used or not
    pub async fn all(&self) -> Vec<PasswordResetToken> {
        self.tokens.read().await.clone()
    }

    /// Store a token row as-is
    pub async fn insert(&self, token: PasswordResetToken) {
        self.tokens.write().await.push(token);
    }
}

#[async_trait]
impl ResetTokenRepository for MemoryResetTokenRepository {
    async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> DatabaseResult<PasswordResetToken> {
        let mut tokens = self.tokens.write().await;
        if tokens.iter().any(|t| t.token == token) {
            return Err(DatabaseError::Conflict(
                "password_reset_tokens_token_key".to_string(),
            ));
        }

        let row = PasswordResetToken {
            id: Uuid::new_v4(),
            user_id,
            token: token.to_string(),
            expires_at,
            used: false,
            created_at: Utc::now(),
        };
        tokens.push(row.clone());
        Ok(row)
    }

    async fn find_unused(&self, token: &str) -> DatabaseResult<Option<PasswordResetToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .find(|t| t.token == token && !t.used)
            .cloned())
    }

    async fn redeem(&self, id: Uuid, user_id: Uuid, password_hash: &str) -> DatabaseResult<bool> {
        // The write lock is held across the user update so no other redemption
        // can observe the token between the two steps.
        let mut tokens = self.tokens.write().await;
        let Some(token) = tokens
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id && !t.used)
        else {
            return Ok(false);
        };

        let changes = UpdateUser {
            password_hash: Some(password_hash.to_string()),
            ..Default::default()
        };
        if self.users.update(user_id, &changes).await?.is_none() {
            return Ok(false);
        }

        token.used = true;
        Ok(true)
    }
}

/// Session repository kept in process memory
#[derive(Clone, Default)]
pub struct MemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn create(&self, session: &Session) -> DatabaseResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(DatabaseError::Conflict("sessions_pkey".to_string()));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> DatabaseResult<Option<Session>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> DatabaseResult<bool> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DatabaseResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}
