//! Authentication primitives: password hashing and signed bearer tokens.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::account::types::AccountId;
use crate::error::HubError;
use crate::util::current_timestamp_ms;

type HmacSha256 = Hmac<Sha256>;

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, HubError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| HubError::Internal(format!("password hashing failed: {}", e)))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored hash. A corrupt stored hash reports
/// the same error as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> Result<(), HubError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|_| HubError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| HubError::InvalidCredentials)
}

#[derive(Serialize, Deserialize, Debug)]
struct Claims {
    sub: AccountId,
    iat: u64,
    exp: u64,
}

/// Issues and verifies the bearer tokens handed out at login.
///
/// A token is `hex(claims-json) "." hex(hmac-sha256(secret, claims-json))`:
/// an opaque signed string carrying the account id and an expiry.
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl_ms: u64,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_ms: ttl_hours * 60 * 60 * 1000,
        }
    }

    /// Random signing secret for deployments that did not configure one.
    pub fn random_secret() -> String {
        let bytes: [u8; 32] = rand::random();
        hex::encode(bytes)
    }

    pub fn issue(&self, account_id: &str) -> Result<String, HubError> {
        self.issue_at(account_id, current_timestamp_ms())
    }

    pub fn issue_at(&self, account_id: &str, now_ms: u64) -> Result<String, HubError> {
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now_ms,
            exp: now_ms + self.ttl_ms,
        };
        let payload =
            serde_json::to_vec(&claims).map_err(|e| HubError::Serialization(e.to_string()))?;
        let sig = self.sign(&payload)?;
        Ok(format!("{}.{}", hex::encode(&payload), hex::encode(sig)))
    }

    /// Resolve a token back to the account id it is bound to. Any defect -
    /// malformed, bad signature, expired - reports the same error.
    pub fn verify(&self, token: &str) -> Result<AccountId, HubError> {
        self.verify_at(token, current_timestamp_ms())
    }

    pub fn verify_at(&self, token: &str, now_ms: u64) -> Result<AccountId, HubError> {
        let (payload_hex, sig_hex) = token.split_once('.').ok_or(HubError::InvalidToken)?;
        let payload = hex::decode(payload_hex).map_err(|_| HubError::InvalidToken)?;
        let sig = hex::decode(sig_hex).map_err(|_| HubError::InvalidToken)?;

        let mut mac = self.mac()?;
        mac.update(&payload);
        // Constant-time comparison
        mac.verify_slice(&sig).map_err(|_| HubError::InvalidToken)?;

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| HubError::InvalidToken)?;
        if claims.exp <= now_ms {
            return Err(HubError::InvalidToken);
        }
        Ok(claims.sub)
    }

    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, HubError> {
        let mut mac = self.mac()?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn mac(&self) -> Result<HmacSha256, HubError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| HubError::Internal(format!("hmac key: {}", e)))
    }
}
