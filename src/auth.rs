//! Login gate. This is a fixed-credential check that keeps casual users out of
//! the menus; it is not a security boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".into(),
            password: "admin".into(),
        }
    }
}

impl Credentials {
    /// Exact comparison of both strings; no trimming or case folding.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Proof of a successful login held by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub started_at: DateTime<Utc>,
}

pub fn authenticate(credentials: &Credentials, username: &str, password: &str) -> Option<Session> {
    if credentials.matches(username, password) {
        tracing::info!(user = username, "login succeeded");
        Some(Session {
            username: username.to_string(),
            started_at: Utc::now(),
        })
    } else {
        tracing::warn!(user = username, "login rejected");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_credentials_accept_admin() {
        let credentials = Credentials::default();
        let session = authenticate(&credentials, "admin", "admin").expect("session");
        assert_eq!(session.username, "admin");
    }

    #[test]
    fn comparison_is_exact() {
        let credentials = Credentials::default();
        assert!(authenticate(&credentials, "Admin", "admin").is_none());
        assert!(authenticate(&credentials, "admin", "admin ").is_none());
        assert!(authenticate(&credentials, "", "").is_none());
    }
}
