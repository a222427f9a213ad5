// HTTP client for the Community Hub API
use std::fmt;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::account::types::AccountProfile;
use crate::api::types::{EarnResponse, ErrorBody, LoginResponse, ProposalResponse, VoteResponse};

/// Client-side failure: either a transport problem (no status) or the
/// server's `{message}` body plus the status it came with.
#[derive(Debug)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    /// The stored token was missing or rejected; the session should drop
    /// back to anonymous.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }

    fn transport(err: reqwest::Error) -> Self {
        Self {
            status: None,
            message: format!("Request failed: {}", err),
        }
    }
}

pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountProfile, ApiError> {
        let response = self
            .client
            .post(format!("{}/api/users/register", self.base_url))
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(ApiError::transport)?;
        Self::parse(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/api/users/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ApiError::transport)?;
        Self::parse(response).await
    }

    pub async fn earn(&self, token: &str) -> Result<EarnResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/api/users/earn", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::transport)?;
        Self::parse(response).await
    }

    pub async fn proposals(&self) -> Result<Vec<ProposalResponse>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/proposals", self.base_url))
            .send()
            .await
            .map_err(ApiError::transport)?;
        Self::parse(response).await
    }

    pub async fn create_proposal(
        &self,
        token: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<ProposalResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/api/proposals", self.base_url))
            .bearer_auth(token)
            .json(&json!({ "title": title, "description": description }))
            .send()
            .await
            .map_err(ApiError::transport)?;
        Self::parse(response).await
    }

    pub async fn vote(&self, token: &str, proposal_id: &str) -> Result<VoteResponse, ApiError> {
        let response = self
            .client
            .post(format!(
                "{}/api/proposals/{}/vote",
                self.base_url, proposal_id
            ))
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::transport)?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError {
                status: Some(status.as_u16()),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            let body: ErrorBody = response.json().await.unwrap_or_else(|_| ErrorBody {
                message: format!("HTTP {}", status),
            });
            Err(ApiError {
                status: Some(status.as_u16()),
                message: body.message,
            })
        }
    }
}
