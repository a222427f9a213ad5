//! Proposal storage and listing

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::types::Proposal;
use crate::error::HubError;
use crate::storage::{self, Storage};
use crate::util::current_timestamp_ms;

#[derive(Clone)]
pub struct ProposalStore {
    storage: Arc<Storage>,
}

impl ProposalStore {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        created_by: &str,
        title: &str,
        description: Option<String>,
    ) -> Result<Proposal, HubError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(HubError::Validation("Title is required".to_string()));
        }

        let proposal = Proposal {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description,
            created_by: created_by.to_string(),
            votes: 0,
            voters: Vec::new(),
            created_at: current_timestamp_ms(),
        };
        storage::put(&self.storage.proposals, &proposal.id, &proposal)?;

        info!(proposal = %proposal.id, creator = %created_by, "created proposal");
        Ok(proposal)
    }

    pub fn get(&self, id: &str) -> Result<Option<Proposal>, HubError> {
        storage::get(&self.storage.proposals, id)
    }

    /// All proposals, newest first.
    pub fn list(&self) -> Result<Vec<Proposal>, HubError> {
        let mut proposals = Vec::new();
        for entry in self.storage.proposals.iter() {
            let (_, bytes) = entry?;
            proposals.push(storage::decode::<Proposal>(&bytes)?);
        }
        proposals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(proposals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_proposals() -> ProposalStore {
        ProposalStore::new(Arc::new(Storage::temporary().unwrap()))
    }

    #[test]
    fn test_create_proposal() {
        let store = test_proposals();
        let proposal = store
            .create("acct-1", "  More bike racks  ", Some("Near the gym".to_string()))
            .unwrap();

        assert_eq!(proposal.title, "More bike racks");
        assert_eq!(proposal.votes, 0);
        assert!(proposal.voters.is_empty());

        let loaded = store.get(&proposal.id).unwrap().unwrap();
        assert_eq!(loaded.title, "More bike racks");
    }

    #[test]
    fn blank_title_is_rejected() {
        let store = test_proposals();
        assert!(matches!(
            store.create("acct-1", "   ", None),
            Err(HubError::Validation(_))
        ));
        assert!(matches!(
            store.create("acct-1", "", None),
            Err(HubError::Validation(_))
        ));
    }

    #[test]
    fn list_is_newest_first() {
        let store = test_proposals();

        // Write records with hand-picked timestamps so the ordering does not
        // depend on the clock resolution of the test host.
        for (id, created_at) in [("p1", 100u64), ("p2", 300), ("p3", 200)] {
            let proposal = Proposal {
                id: id.to_string(),
                title: format!("Proposal {}", id),
                description: None,
                created_by: "acct-1".to_string(),
                votes: 0,
                voters: Vec::new(),
                created_at,
            };
            storage::put(&store.storage.proposals, id, &proposal).unwrap();
        }

        let listed = store.list().unwrap();
        let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3", "p1"]);
    }
}
