//! Repositories for credential storage
//!
//! Each repository is a trait with a PostgreSQL implementation and an
//! in-memory one used by the memory backend and the tests.

mod memory;
mod reset_token;
mod session;
mod user;

pub use memory::{MemoryResetTokenRepository, MemorySessionRepository, MemoryUserRepository};
pub use reset_token::PgResetTokenRepository;
pub use session::PgSessionRepository;
pub use user::PgUserRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{NewUser, PasswordResetToken, Session, UpdateUser, User};

/// User storage
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken email surfaces as a unique violation
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    /// Apply the `Some` fields of `changes`; `None` when the user is missing
    async fn update(&self, id: Uuid, changes: &UpdateUser) -> DatabaseResult<Option<User>>;
}

/// Password reset token storage
#[async_trait]
pub trait ResetTokenRepository: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> DatabaseResult<PasswordResetToken>;

    /// Look up a token that has not been used yet
    async fn find_unused(&self, token: &str) -> DatabaseResult<Option<PasswordResetToken>>;

    /// Mark the token used and set the user's password hash as one unit
    ///
    /// Returns false, changing nothing, when the token was already used or
    /// the user no longer exists.
    async fn redeem(&self, id: Uuid, user_id: Uuid, password_hash: &str) -> DatabaseResult<bool>;
}

/// Session storage
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> DatabaseResult<()>;

    async fn find(&self, id: &str) -> DatabaseResult<Option<Session>>;

    /// Remove a session; returns whether one existed
    async fn delete(&self, id: &str) -> DatabaseResult<bool>;

    /// Remove every session that expired before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> DatabaseResult<u64>;
}
