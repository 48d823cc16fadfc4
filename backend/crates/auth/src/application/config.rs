//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export cookie types from platform
pub use platform::cookie::{CookieConfig, SameSite};

/// Session cookie name. Fixed constant: the client, the middleware, and
/// the issuance handlers must all agree on it.
pub const SESSION_COOKIE: &str = "session_token";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie lifetime (1 day)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie (production transport)
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Cookie path (application root)
    pub cookie_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            cookie_path: "/".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure transport)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Cookie configuration for issuing the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: SESSION_COOKIE.to_string(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: self.cookie_path.clone(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }
}
