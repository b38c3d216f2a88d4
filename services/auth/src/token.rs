//! Opaque random tokens for sessions and password resets

use rand::{
    distributions::{Alphanumeric, DistString},
    rngs::OsRng,
};

/// Length of a password reset token
pub const RESET_TOKEN_LENGTH: usize = 48;

/// Length of a session id
pub const SESSION_ID_LENGTH: usize = 64;

/// Generate an alphanumeric token from the operating system's CSPRNG
pub fn generate_token(length: usize) -> String {
    Alphanumeric.sample_string(&mut OsRng, length)
}
