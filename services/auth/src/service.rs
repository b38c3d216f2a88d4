//! Credential service: registration, login, profile and password reset

use chrono::{Duration, Utc};
use common::{
    error::DatabaseError,
    notifications::{NotificationKind, NotificationLedger},
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{AuthError, AuthResult},
    models::{
        DEFAULT_COUNTRY, NewUser, PasswordReset, ProfileChanges, Registration, Session,
        UpdateUser, User, UserProfile,
    },
    password::{hash_password, verify_against_dummy, verify_password},
    repositories::{ResetTokenRepository, UserRepository},
    session::SessionManager,
    token::{RESET_TOKEN_LENGTH, generate_token},
    validation,
};

const WELCOME_MESSAGE: &str = "Welcome to LibraryHub! Start exploring our collection.";

/// How reset tokens are issued and where the link points
#[derive(Debug, Clone)]
pub struct ResetPolicy {
    pub token_ttl: Duration,
    pub public_base_url: String,
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            token_ttl: Duration::hours(1),
            public_base_url: "http://localhost:5000".to_string(),
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    pub user: UserProfile,
}

/// Credential service
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    reset_tokens: Arc<dyn ResetTokenRepository>,
    sessions: SessionManager,
    notifications: NotificationLedger,
    reset_policy: ResetPolicy,
}

impl CredentialService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        reset_tokens: Arc<dyn ResetTokenRepository>,
        sessions: SessionManager,
        notifications: NotificationLedger,
        reset_policy: ResetPolicy,
    ) -> Self {
        Self {
            users,
            reset_tokens,
            sessions,
            notifications,
            reset_policy,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Register a new user and greet them with a welcome notification
    pub async fn register(&self, registration: Registration) -> AuthResult<Uuid> {
        let email = validation::normalize_email(&registration.email);
        validation::validate_email(&email).map_err(AuthError::Validation)?;
        validation::validate_new_password(&registration.password, &registration.confirm_password)
            .map_err(AuthError::Validation)?;

        let name = match registration.name {
            Some(name) if !name.trim().is_empty() => {
                validation::validate_name(&name).map_err(AuthError::Validation)?;
                Some(name.trim().to_string())
            }
            _ => None,
        };

        let country = match registration.country {
            Some(country) if !country.trim().is_empty() => {
                let country = validation::normalize_country(&country);
                validation::validate_country(&country).map_err(AuthError::Validation)?;
                country
            }
            _ => DEFAULT_COUNTRY.to_string(),
        };

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = hash_password(&registration.password)?;
        let user = self
            .users
            .create(&NewUser {
                email,
                password_hash,
                name,
                country,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::Conflict(_) => AuthError::DuplicateEmail,
                other => AuthError::Database(other),
            })?;

        info!(user_id = %user.id, "User registered");

        self.notifications
            .notify(user.id, NotificationKind::Success, WELCOME_MESSAGE)
            .await?;

        Ok(user.id)
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown email and wrong password both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<LoginOutcome> {
        let email = validation::normalize_email(email);

        let user = match self.users.find_by_email(&email).await? {
            Some(user) if verify_password(&user.password_hash, password) => user,
            Some(user) => {
                warn!(user_id = %user.id, "Login failed: password mismatch");
                return Err(AuthError::InvalidCredentials);
            }
            None => {
                verify_against_dummy(password);
                warn!("Login failed: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let session = self.sessions.create_session(user.id).await?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            session,
            user: user.profile(),
        })
    }

    /// Destroy a session; unknown sessions are ignored
    pub async fn logout(&self, session_id: &str) -> AuthResult<()> {
        self.sessions.destroy(session_id).await
    }

    /// Load the user bound to an authenticated request
    pub async fn current_user(&self, user_id: Uuid) -> AuthResult<UserProfile> {
        self.load_user(user_id).await.map(|user| user.profile())
    }

    /// Apply a partial profile update
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> AuthResult<UserProfile> {
        let mut update = UpdateUser::default();

        if let Some(name) = changes.name {
            validation::validate_name(&name).map_err(AuthError::Validation)?;
            update.name = Some(name.trim().to_string());
        }

        if let Some(bio) = changes.bio {
            validation::validate_bio(&bio).map_err(AuthError::Validation)?;
            update.bio = Some(bio);
        }

        if let Some(country) = changes.country {
            let country = validation::normalize_country(&country);
            validation::validate_country(&country).map_err(AuthError::Validation)?;
            update.country = Some(country);
        }

        let user = self
            .users
            .update(user_id, &update)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        info!(%user_id, "Profile updated");
        Ok(user.profile())
    }

    /// Replace the avatar reference
    pub async fn update_avatar(&self, user_id: Uuid, avatar_url: String) -> AuthResult<String> {
        let update = UpdateUser {
            avatar_url: Some(avatar_url),
            ..Default::default()
        };

        let user = self
            .users
            .update(user_id, &update)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        info!(%user_id, "Avatar updated");
        Ok(user.avatar_url.unwrap_or_default())
    }

    /// Issue a reset token when the email matches a user.
    ///
    /// The outcome is the same whether or not the email is known. Only a
    /// malformed email is rejected.
    pub async fn request_password_reset(&self, email: &str) -> AuthResult<()> {
        let email = validation::normalize_email(email);
        validation::validate_email(&email).map_err(AuthError::Validation)?;

        let Some(user) = self.users.find_by_email(&email).await? else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_token(RESET_TOKEN_LENGTH);
        let expires_at = Utc::now() + self.reset_policy.token_ttl;
        self.reset_tokens.create(user.id, &token, expires_at).await?;

        let reset_link = format!(
            "{}/reset-password?token={}",
            self.reset_policy.public_base_url.trim_end_matches('/'),
            token
        );
        info!(user_id = %user.id, %reset_link, %expires_at, "Password reset issued");

        Ok(())
    }

    /// Redeem a reset token and replace the password
    pub async fn redeem_password_reset(&self, reset: PasswordReset) -> AuthResult<()> {
        validation::validate_new_password(&reset.password, &reset.confirm_password)
            .map_err(AuthError::Validation)?;

        let token = self
            .reset_tokens
            .find_unused(&reset.token)
            .await?
            .filter(|token| token.is_redeemable(Utc::now()))
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        let password_hash = hash_password(&reset.password)?;
        if !self
            .reset_tokens
            .redeem(token.id, token.user_id, &password_hash)
            .await?
        {
            return Err(AuthError::InvalidOrExpiredToken);
        }

        info!(user_id = %token.user_id, "Password reset redeemed");
        Ok(())
    }

    async fn load_user(&self, user_id: Uuid) -> AuthResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
