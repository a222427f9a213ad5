//! Account system:
//! - Persisted user records with unique username/email
//! - Password-based authentication (Argon2id)
//! - Signed, time-limited bearer tokens
//! - Token balance mutated by the reward and voting services

pub mod auth;
pub mod store;
pub mod types;

pub use auth::TokenSigner;
pub use store::AccountStore;
pub use types::{Account, AccountId, AccountProfile};
