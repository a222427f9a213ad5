//! Daily token claims.

use std::sync::Arc;

use sled::transaction::{ConflictableTransactionError, TransactionError};
use tracing::info;

use crate::account::types::Account;
use crate::error::HubError;
use crate::storage::{self, Storage};
use crate::util::current_timestamp_ms;

const HOUR_MS: u64 = 60 * 60 * 1000;

#[derive(Clone)]
pub struct RewardService {
    storage: Arc<Storage>,
    reward_amount: u64,
    interval_hours: u64,
}

impl RewardService {
    pub fn new(storage: Arc<Storage>, reward_amount: u64, interval_hours: u64) -> Self {
        Self {
            storage,
            reward_amount,
            interval_hours,
        }
    }

    pub fn reward_amount(&self) -> u64 {
        self.reward_amount
    }

    /// Credit the daily reward if the claim interval has elapsed. Returns
    /// the new balance.
    pub fn claim_daily(&self, account_id: &str) -> Result<u64, HubError> {
        self.claim_daily_at(account_id, current_timestamp_ms())
    }

    /// The eligibility check and the credit run in one transaction on the
    /// account key. Conflicting concurrent claims re-run the closure against
    /// the committed record, so only one of them can pass the gate.
    ///
    /// A never-claimed account counts as last claimed at the epoch, i.e.
    /// always eligible. The remaining-hours figure uses whole elapsed hours
    /// (floor), matching the deployed behavior this service replaces.
    pub fn claim_daily_at(&self, account_id: &str, now_ms: u64) -> Result<u64, HubError> {
        let interval_ms = self.interval_hours * HOUR_MS;

        let result = self.storage.accounts.transaction(|accounts| {
            let bytes = accounts
                .get(account_id.as_bytes())?
                .ok_or(ConflictableTransactionError::Abort(HubError::NotFound(
                    "User",
                )))?;
            let mut account: Account =
                storage::decode(&bytes).map_err(ConflictableTransactionError::Abort)?;

            let last = account.last_claimed.unwrap_or(0);
            let elapsed_ms = now_ms.saturating_sub(last);
            if elapsed_ms < interval_ms {
                let hours = self.interval_hours - elapsed_ms / HOUR_MS;
                return Err(ConflictableTransactionError::Abort(HubError::TooSoon {
                    hours,
                }));
            }

            account.token_balance = account.token_balance.saturating_add(self.reward_amount);
            account.last_claimed = Some(now_ms);
            let encoded =
                storage::encode(&account).map_err(ConflictableTransactionError::Abort)?;
            accounts.insert(account_id.as_bytes(), encoded)?;
            Ok(account.token_balance)
        });

        match result {
            Ok(balance) => {
                info!(account = %account_id, balance, "daily reward claimed");
                Ok(balance)
            }
            Err(TransactionError::Abort(e)) => Err(e),
            Err(TransactionError::Storage(e)) => Err(HubError::Storage(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::store::AccountStore;

    const DAY_MS: u64 = 24 * HOUR_MS;

    fn setup() -> (AccountStore, RewardService, String) {
        let storage = Arc::new(Storage::temporary().unwrap());
        let accounts = AccountStore::new(storage.clone(), 100);
        let rewards = RewardService::new(storage, 10, 24);
        let profile = accounts
            .register("alice", "alice@example.com", "hunter2000")
            .unwrap();
        (accounts, rewards, profile.id)
    }

    #[test]
    fn first_claim_always_succeeds() {
        let (accounts, rewards, id) = setup();

        let balance = rewards.claim_daily_at(&id, 50 * DAY_MS).unwrap();
        assert_eq!(balance, 110);

        let account = accounts.get(&id).unwrap().unwrap();
        assert_eq!(account.token_balance, 110);
        assert_eq!(account.last_claimed, Some(50 * DAY_MS));
    }

    #[test]
    fn second_claim_within_24h_is_too_soon() {
        let (accounts, rewards, id) = setup();
        let t0 = 50 * DAY_MS;
        rewards.claim_daily_at(&id, t0).unwrap();

        // Immediately after: the full 24 hours remain.
        let err = rewards.claim_daily_at(&id, t0 + 1).unwrap_err();
        assert!(matches!(err, HubError::TooSoon { hours: 24 }));

        // 23h59m later: one whole hour short, reported as 1 (floor).
        let err = rewards
            .claim_daily_at(&id, t0 + 23 * HOUR_MS + 59 * 60 * 1000)
            .unwrap_err();
        assert!(matches!(err, HubError::TooSoon { hours: 1 }));

        // Balance untouched by failed claims.
        assert_eq!(accounts.get(&id).unwrap().unwrap().token_balance, 110);
    }

    #[test]
    fn claim_after_24h_credits_exactly_once() {
        let (accounts, rewards, id) = setup();
        let t0 = 50 * DAY_MS;
        rewards.claim_daily_at(&id, t0).unwrap();

        let balance = rewards.claim_daily_at(&id, t0 + DAY_MS).unwrap();
        assert_eq!(balance, 120);
        assert_eq!(
            accounts.get(&id).unwrap().unwrap().last_claimed,
            Some(t0 + DAY_MS)
        );
    }

    #[test]
    fn remaining_hours_uses_floor() {
        let (_, rewards, id) = setup();
        let t0 = 50 * DAY_MS;
        rewards.claim_daily_at(&id, t0).unwrap();

        // 30 minutes in: floor(0.5h) = 0 elapsed, 24 remain.
        let err = rewards.claim_daily_at(&id, t0 + 30 * 60 * 1000).unwrap_err();
        assert!(matches!(err, HubError::TooSoon { hours: 24 }));

        // 12.5 hours in: floor = 12 elapsed, 12 remain.
        let err = rewards
            .claim_daily_at(&id, t0 + 12 * HOUR_MS + 30 * 60 * 1000)
            .unwrap_err();
        assert!(matches!(err, HubError::TooSoon { hours: 12 }));
    }

    #[test]
    fn unknown_account_is_not_found() {
        let (_, rewards, _) = setup();
        assert!(matches!(
            rewards.claim_daily_at("missing", 0),
            Err(HubError::NotFound("User"))
        ));
    }

    #[test]
    fn concurrent_claims_credit_exactly_once() {
        let (accounts, rewards, id) = setup();
        let rewards = Arc::new(rewards);
        let now = 50 * DAY_MS;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let rewards = rewards.clone();
                let id = id.clone();
                std::thread::spawn(move || rewards.claim_daily_at(&id, now))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        for r in results.iter().filter(|r| r.is_err()) {
            assert!(matches!(r, Err(HubError::TooSoon { .. })));
        }

        assert_eq!(accounts.get(&id).unwrap().unwrap().token_balance, 110);
    }
}
