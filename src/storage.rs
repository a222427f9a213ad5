//! Embedded document store.
//!
//! One sled keyspace per record type, plus the index trees the account store
//! uses to keep email and username unique. Records are bincode-encoded.
//! Services that need check-then-act semantics run sled transactions over
//! the trees directly; everything else goes through the typed helpers here.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::HubError;

pub struct Storage {
    db: sled::Db,
    pub accounts: sled::Tree,
    pub accounts_by_email: sled::Tree,
    pub accounts_by_username: sled::Tree,
    pub proposals: sled::Tree,
}

impl Storage {
    pub fn open(path: &str) -> Result<Self, HubError> {
        Self::from_db(sled::open(path)?)
    }

    /// In-memory store, dropped on close. Used by tests.
    pub fn temporary() -> Result<Self, HubError> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: sled::Db) -> Result<Self, HubError> {
        Ok(Self {
            accounts: db.open_tree("accounts")?,
            accounts_by_email: db.open_tree("accounts_by_email")?,
            accounts_by_username: db.open_tree("accounts_by_username")?,
            proposals: db.open_tree("proposals")?,
            db,
        })
    }

    pub fn flush(&self) -> Result<(), HubError> {
        self.db.flush()?;
        Ok(())
    }
}

// Generic Helper: Put
pub fn put<T: Serialize>(tree: &sled::Tree, key: &str, value: &T) -> Result<(), HubError> {
    tree.insert(key.as_bytes(), encode(value)?)?;
    Ok(())
}

// Generic Helper: Get
pub fn get<T: DeserializeOwned>(tree: &sled::Tree, key: &str) -> Result<Option<T>, HubError> {
    match tree.get(key.as_bytes())? {
        Some(bytes) => Ok(Some(decode(&bytes)?)),
        None => Ok(None),
    }
}

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, HubError> {
    bincode::serialize(value).map_err(|e| HubError::Serialization(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, HubError> {
    bincode::deserialize(bytes).map_err(|e| HubError::Serialization(e.to_string()))
}
