//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

const MAX_NAME_LENGTH: usize = 100;
const MAX_BIO_LENGTH: usize = 1000;

/// Trim and lowercase an email address before storage or lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim and uppercase an ISO country code
pub fn normalize_country(country: &str) -> String {
    country.trim().to_ascii_uppercase()
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_LENGTH
        ));
    }

    Ok(())
}

/// Validate a password together with its confirmation
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), String> {
    validate_password(password)?;

    if password != confirmation {
        return Err("Passwords don't match".to_string());
    }

    Ok(())
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name must be at most {} characters",
            MAX_NAME_LENGTH
        ));
    }

    Ok(())
}

/// Validate profile bio
pub fn validate_bio(bio: &str) -> Result<(), String> {
    if bio.chars().count() > MAX_BIO_LENGTH {
        return Err(format!("Bio must be at most {} characters", MAX_BIO_LENGTH));
    }

    Ok(())
}

/// Validate a two-letter ISO country code
pub fn validate_country(country: &str) -> Result<(), String> {
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err("Invalid country code".to_string());
    }

    Ok(())
}
