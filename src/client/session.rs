//! Client-side session state.
//!
//! The session moves Anonymous -> Authenticated at login and back at logout
//! or when the server rejects the stored token. It is persisted to a local
//! JSON file so the bearer token survives between CLI invocations and is
//! attached on every protected call.

use serde::{Deserialize, Serialize};

use crate::account::types::AccountProfile;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub enum ClientSession {
    #[default]
    Anonymous,
    Authenticated {
        profile: AccountProfile,
        token: String,
    },
}

impl ClientSession {
    /// Load from disk. Missing or unreadable files mean Anonymous.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => ClientSession::Anonymous,
        }
    }

    pub fn save(&self, path: &str) -> Result<(), String> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, contents).map_err(|e| e.to_string())
    }

    pub fn authenticate(&mut self, profile: AccountProfile, token: String) {
        *self = ClientSession::Authenticated { profile, token };
    }

    pub fn logout(&mut self) {
        *self = ClientSession::Anonymous;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, ClientSession::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            ClientSession::Authenticated { token, .. } => Some(token),
            ClientSession::Anonymous => None,
        }
    }

    pub fn profile(&self) -> Option<&AccountProfile> {
        match self {
            ClientSession::Authenticated { profile, .. } => Some(profile),
            ClientSession::Anonymous => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> AccountProfile {
        AccountProfile {
            id: "a1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            token_balance: 100,
        }
    }

    #[test]
    fn transitions_anonymous_to_authenticated_and_back() {
        let mut session = ClientSession::default();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());

        session.authenticate(profile(), "tok".to_string());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.profile().unwrap().username, "alice");

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.profile().is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let path = std::env::temp_dir().join(format!("hub_session_{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();

        let mut session = ClientSession::default();
        session.authenticate(profile(), "tok".to_string());
        session.save(&path).unwrap();

        let loaded = ClientSession::load(&path);
        assert!(loaded.is_authenticated());
        assert_eq!(loaded.token(), Some("tok"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_missing_or_garbage_file_is_anonymous() {
        let loaded = ClientSession::load("/nonexistent/hub_session.json");
        assert!(!loaded.is_authenticated());
    }
}
