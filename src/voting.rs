//! Proposal listing, creation, and token-gated voting.

use std::sync::Arc;

use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::Transactional;
use tracing::info;

use crate::account::store::AccountStore;
use crate::account::types::Account;
use crate::error::HubError;
use crate::proposal::store::ProposalStore;
use crate::proposal::types::Proposal;
use crate::storage::{self, Storage};

#[derive(Clone)]
pub struct VotingService {
    storage: Arc<Storage>,
    accounts: AccountStore,
    proposals: ProposalStore,
    vote_cost: u64,
}

impl VotingService {
    pub fn new(
        storage: Arc<Storage>,
        accounts: AccountStore,
        proposals: ProposalStore,
        vote_cost: u64,
    ) -> Self {
        Self {
            storage,
            accounts,
            proposals,
            vote_cost,
        }
    }

    pub fn list_proposals(&self) -> Result<Vec<Proposal>, HubError> {
        self.proposals.list()
    }

    /// The store enforces no relations, so the creator reference is checked
    /// here before the proposal is persisted.
    pub fn create_proposal(
        &self,
        account_id: &str,
        title: &str,
        description: Option<String>,
    ) -> Result<Proposal, HubError> {
        if self.accounts.get(account_id)?.is_none() {
            return Err(HubError::NotFound("User"));
        }
        self.proposals.create(account_id, title, description)
    }

    /// Cast a vote: one per (account, proposal) pair, costing `vote_cost`
    /// tokens. Returns the updated vote count.
    ///
    /// The whole check-then-act sequence runs as a single transaction across
    /// the accounts and proposals trees; conflicting concurrent votes re-run
    /// against the committed records, so the loser of a race sees the vote it
    /// lost to. Check order is fixed: already-voted, then balance.
    pub fn vote(&self, account_id: &str, proposal_id: &str) -> Result<u64, HubError> {
        let result = (&self.storage.accounts, &self.storage.proposals).transaction(
            |(accounts, proposals)| {
                let account_bytes = accounts.get(account_id.as_bytes())?.ok_or(
                    ConflictableTransactionError::Abort(HubError::NotFound("User")),
                )?;
                let mut account: Account = storage::decode(&account_bytes)
                    .map_err(ConflictableTransactionError::Abort)?;

                let proposal_bytes = proposals.get(proposal_id.as_bytes())?.ok_or(
                    ConflictableTransactionError::Abort(HubError::NotFound("Proposal")),
                )?;
                let mut proposal: Proposal = storage::decode(&proposal_bytes)
                    .map_err(ConflictableTransactionError::Abort)?;

                if proposal.has_voted(&account.id) {
                    return Err(ConflictableTransactionError::Abort(HubError::AlreadyVoted));
                }
                if account.token_balance < self.vote_cost {
                    return Err(ConflictableTransactionError::Abort(
                        HubError::InsufficientTokens,
                    ));
                }

                account.token_balance -= self.vote_cost;
                proposal.votes += 1;
                proposal.voters.push(account.id.clone());

                let account_encoded =
                    storage::encode(&account).map_err(ConflictableTransactionError::Abort)?;
                let proposal_encoded =
                    storage::encode(&proposal).map_err(ConflictableTransactionError::Abort)?;
                accounts.insert(account_id.as_bytes(), account_encoded)?;
                proposals.insert(proposal_id.as_bytes(), proposal_encoded)?;
                Ok(proposal.votes)
            },
        );

        match result {
            Ok(votes) => {
                info!(account = %account_id, proposal = %proposal_id, votes, "vote cast");
                Ok(votes)
            }
            Err(TransactionError::Abort(e)) => Err(e),
            Err(TransactionError::Storage(e)) => Err(HubError::Storage(e)),
        }
    }
}
