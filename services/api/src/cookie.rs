//! Session cookie handling

use axum::http::HeaderValue;
use common::settings::SessionSettings;

/// Session cookies are never sent on cross-site subrequests
const SAME_SITE: &str = "Lax";

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "sid".to_string(),
            secure: false,
            http_only: true,
            path: "/".to_string(),
            max_age_secs: Some(30 * 24 * 60 * 60),
        }
    }
}

impl CookieConfig {
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self {
            name: settings.cookie_name.clone(),
            secure: settings.secure,
            max_age_secs: Some(settings.ttl_days * 24 * 60 * 60),
            ..Default::default()
        }
    }

    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);
        self.push_attributes(&mut cookie);

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build Set-Cookie header for deletion (expired)
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!("{}=", self.name);
        self.push_attributes(&mut cookie);
        cookie.push_str("; Max-Age=0");
        cookie
    }

    pub fn set_cookie_header(&self, value: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value)).ok()
    }

    pub fn delete_cookie_header(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie()).ok()
    }

    fn push_attributes(&self, cookie: &mut String) {
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", SAME_SITE));
        cookie.push_str(&format!("; Path={}", self.path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = CookieConfig::default();

        let cookie = config.build_set_cookie("abc123");
        assert!(cookie.starts_with("sid=abc123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=2592000"));
    }

    #[test]
    fn test_from_settings() {
        let config = CookieConfig::from_settings(&SessionSettings {
            cookie_name: "library_sid".to_string(),
            ttl_days: 1,
            secure: true,
        });

        let cookie = config.build_set_cookie("v");
        assert!(cookie.starts_with("library_sid=v"));
        assert!(cookie.contains("; Secure"));
        assert!(cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn test_delete_cookie_expires_immediately() {
        let cookie = CookieConfig::default().build_delete_cookie();
        assert!(cookie.starts_with("sid=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Path=/"));
    }
}
