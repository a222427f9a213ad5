use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use tracing::debug;

use super::types::{
    CreateProposalRequest, EarnResponse, LoginRequest, LoginResponse, ProposalResponse,
    RegisterRequest, VoteResponse,
};
use super::ApiState;
use crate::account::types::{AccountId, AccountProfile};
use crate::error::HubError;

pub async fn health() -> &'static str {
    "API is running"
}

/// Pull the bearer token out of the Authorization header and resolve the
/// account id it is bound to.
fn authenticate(state: &ApiState, headers: &HeaderMap) -> Result<AccountId, HubError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(HubError::MissingToken)?;
    let token = value.strip_prefix("Bearer ").ok_or(HubError::MissingToken)?;
    state.tokens.verify(token)
}

pub async fn register(
    State(state): State<ApiState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountProfile>), HubError> {
    debug!(username = %req.username, "register request");
    let profile = state
        .accounts
        .register(&req.username, &req.email, &req.password)?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn login(
    State(state): State<ApiState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HubError> {
    let account = state.accounts.login(&req.email, &req.password)?;
    let token = state.tokens.issue(&account.id)?;
    Ok(Json(LoginResponse {
        profile: account.profile(),
        token,
    }))
}

pub async fn earn(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<EarnResponse>, HubError> {
    let account_id = authenticate(&state, &headers)?;
    let token_balance = state.rewards.claim_daily(&account_id)?;
    Ok(Json(EarnResponse {
        message: format!("You earned {} tokens!", state.rewards.reward_amount()),
        token_balance,
    }))
}

pub async fn list_proposals(
    State(state): State<ApiState>,
) -> Result<Json<Vec<ProposalResponse>>, HubError> {
    let proposals = state.voting.list_proposals()?;
    Ok(Json(proposals.iter().map(ProposalResponse::from).collect()))
}

pub async fn create_proposal(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(req): Json<CreateProposalRequest>,
) -> Result<(StatusCode, Json<ProposalResponse>), HubError> {
    let account_id = authenticate(&state, &headers)?;
    let proposal = state
        .voting
        .create_proposal(&account_id, &req.title, req.description)?;
    Ok((StatusCode::CREATED, Json(ProposalResponse::from(&proposal))))
}

pub async fn vote(
    State(state): State<ApiState>,
    Path(proposal_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<VoteResponse>, HubError> {
    let account_id = authenticate(&state, &headers)?;
    let votes = state.voting.vote(&account_id, &proposal_id)?;
    Ok(Json(VoteResponse {
        message: "Vote cast successfully".to_string(),
        votes,
    }))
}
