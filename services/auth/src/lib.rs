//! Credential service for LibraryHub
//!
//! Registration, login and logout over server-side sessions, profile updates,
//! and the single-use password reset token lifecycle.

pub mod error;
pub mod models;
pub mod password;
pub mod repositories;
pub mod service;
pub mod session;
pub mod token;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use service::{CredentialService, LoginOutcome, ResetPolicy};
pub use session::SessionManager;
