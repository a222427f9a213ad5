//! Proposal type definitions

use serde::{Deserialize, Serialize};

use crate::account::types::AccountId;

/// Proposal identifier - UUID v4 string
pub type ProposalId = String;

/// Persisted proposal record. Created once, then mutated only by the voting
/// service, which keeps `votes == voters.len()` at all times.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: Option<String>,
    pub created_by: AccountId,
    pub votes: u64,
    /// Accounts that have already voted; an id appears at most once.
    pub voters: Vec<AccountId>,
    pub created_at: u64,
}

impl Proposal {
    pub fn has_voted(&self, account_id: &str) -> bool {
        self.voters.iter().any(|v| v == account_id)
    }
}
