//! Server startup: config, logging, storage, services, HTTP.

use std::process;
use std::sync::Arc;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::account::auth::TokenSigner;
use crate::account::store::AccountStore;
use crate::api::{ApiServer, ApiState};
use crate::config::HubConfig;
use crate::proposal::store::ProposalStore;
use crate::rewards::RewardService;
use crate::storage::Storage;
use crate::voting::VotingService;

pub async fn run(config_path: &str) {
    let config = HubConfig::load_or_default(config_path);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // A storage failure here is the one fatal error; everything afterwards
    // surfaces per-request.
    let storage = match Storage::open(&config.server.db_path) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            error!("failed to open storage at {}: {}", config.server.db_path, e);
            process::exit(1);
        }
    };

    let secret = if config.auth.token_secret.is_empty() {
        warn!("auth.token_secret is not set; using a random secret, tokens will not survive a restart");
        TokenSigner::random_secret()
    } else {
        config.auth.token_secret.clone()
    };
    let tokens = Arc::new(TokenSigner::new(
        secret.into_bytes(),
        config.auth.token_ttl_hours,
    ));

    let accounts = AccountStore::new(storage.clone(), config.rewards.starting_balance);
    let proposals = ProposalStore::new(storage.clone());
    let rewards = RewardService::new(
        storage.clone(),
        config.rewards.daily_reward,
        config.rewards.claim_interval_hours,
    );
    let voting = VotingService::new(
        storage,
        accounts.clone(),
        proposals,
        config.rewards.vote_cost,
    );

    let state = ApiState {
        accounts,
        rewards,
        voting,
        tokens,
    };
    let server = ApiServer::new(
        state,
        config.server.port,
        config.server.allowed_origins.clone(),
    );
    if let Err(e) = server.start().await {
        error!("server exited: {}", e);
        process::exit(1);
    }
}
