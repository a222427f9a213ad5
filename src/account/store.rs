//! Account storage and management

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::auth::{hash_password, verify_password};
use super::types::{Account, AccountProfile};
use crate::error::HubError;
use crate::storage::{self, Storage};
use crate::util::current_timestamp_ms;

/// Account store backed by the accounts tree plus two index trees that keep
/// email and username unique.
#[derive(Clone)]
pub struct AccountStore {
    storage: Arc<Storage>,
    starting_balance: u64,
}

impl AccountStore {
    pub fn new(storage: Arc<Storage>, starting_balance: u64) -> Self {
        Self {
            storage,
            starting_balance,
        }
    }

    /// Create a new account. Uniqueness is reserved through compare-and-swap
    /// inserts on the index trees, so two concurrent registrations of the
    /// same email (or username) cannot both succeed. Email is checked first;
    /// duplicate-email reporting takes precedence over duplicate-username.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountProfile, HubError> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(HubError::Validation(
                "Username, email and password are required".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;
        let id = Uuid::new_v4().to_string();

        if self
            .storage
            .accounts_by_email
            .compare_and_swap(email.as_bytes(), None as Option<&[u8]>, Some(id.as_bytes()))?
            .is_err()
        {
            return Err(HubError::Conflict("Email"));
        }

        if self
            .storage
            .accounts_by_username
            .compare_and_swap(
                username.as_bytes(),
                None as Option<&[u8]>,
                Some(id.as_bytes()),
            )?
            .is_err()
        {
            // Release the email reservation taken above
            self.storage.accounts_by_email.remove(email.as_bytes())?;
            return Err(HubError::Conflict("Username"));
        }

        let account = Account {
            id: id.clone(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            token_balance: self.starting_balance,
            last_claimed: None,
            created_at: current_timestamp_ms(),
        };
        storage::put(&self.storage.accounts, &id, &account)?;

        info!(account = %id, username = %username, "registered account");
        Ok(account.profile())
    }

    /// Look an account up by credentials. An unknown email and a wrong
    /// password produce the identical error, so responses do not leak which
    /// of the two failed.
    pub fn login(&self, email: &str, password: &str) -> Result<Account, HubError> {
        let account = self
            .find_by_email(email.trim())?
            .ok_or(HubError::InvalidCredentials)?;
        verify_password(password, &account.password_hash)?;
        Ok(account)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>, HubError> {
        match self.storage.accounts_by_email.get(email.as_bytes())? {
            Some(id_bytes) => {
                let id = String::from_utf8_lossy(&id_bytes).to_string();
                self.get(&id)
            }
            None => Ok(None),
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<Account>, HubError> {
        storage::get(&self.storage.accounts, id)
    }
}
