//! Authentication service models

pub mod reset_token;
pub mod session;
pub mod user;

// Re-export for convenience
pub use reset_token::{PasswordReset, PasswordResetToken};
pub use session::Session;
pub use user::{DEFAULT_COUNTRY, NewUser, ProfileChanges, Registration, UpdateUser, User, UserProfile};
