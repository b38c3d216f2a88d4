//! Credential service errors

use common::error::DatabaseError;
use thiserror::Error;

/// Errors returned by the credential service
#[derive(Error, Debug)]
pub enum AuthError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Registration with an email that is already taken
    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password; the two are never told apart
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, expired or unknown session
    #[error("Unauthorized")]
    Unauthorized,

    /// No unused, unexpired reset token matched
    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Storage failure
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Type alias for credential service results
pub type AuthResult<T> = Result<T, AuthError>;
