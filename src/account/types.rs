//! Account type definitions

use serde::{Deserialize, Serialize};

/// Account identifier - UUID v4 string
pub type AccountId = String;

/// Persisted account record. Only ever written through the account store,
/// the reward service (balance, last_claimed) and the voting service
/// (balance); never deleted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,

    /// Argon2id PHC string. Never leaves the store layer.
    pub password_hash: String,

    pub token_balance: u64,
    /// Unix millis of the last daily claim. None until the first claim.
    pub last_claimed: Option<u64>,
    pub created_at: u64,
}

/// Public projection returned by the API: no credential material.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub token_balance: u64,
}

impl Account {
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            token_balance: self.token_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_excludes_credentials() {
        let account = Account {
            id: "a1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            token_balance: 100,
            last_claimed: None,
            created_at: 0,
        };

        let json = serde_json::to_value(account.profile()).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["tokenBalance"], 100);
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
