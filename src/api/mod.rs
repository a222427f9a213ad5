//! HTTP API layer: routes, CORS, error-to-status mapping.

pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use crate::account::auth::TokenSigner;
use crate::account::store::AccountStore;
use crate::error::HubError;
use crate::rewards::RewardService;
use crate::voting::VotingService;

#[derive(Clone)]
pub struct ApiState {
    pub accounts: AccountStore,
    pub rewards: RewardService,
    pub voting: VotingService,
    pub tokens: Arc<TokenSigner>,
}

pub struct ApiServer {
    state: ApiState,
    bind_addr: String,
    allowed_origins: Vec<String>,
}

impl ApiServer {
    pub fn new(state: ApiState, port: u16, allowed_origins: Vec<String>) -> Self {
        Self {
            state,
            bind_addr: format!("0.0.0.0:{}", port),
            allowed_origins,
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::health))
            .route("/api/users/register", post(handlers::register))
            .route("/api/users/login", post(handlers::login))
            .route("/api/users/earn", post(handlers::earn))
            .route(
                "/api/proposals",
                get(handlers::list_proposals).post(handlers::create_proposal),
            )
            .route("/api/proposals/:id/vote", post(handlers::vote))
            .layer(cors_layer(&self.allowed_origins))
            .with_state(self.state.clone())
    }

    pub async fn start(self) -> Result<(), HubError> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| HubError::Internal(format!("bind {}: {}", self.bind_addr, e)))?;

        info!("API server listening on {}", self.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| HubError::Internal(format!("server: {}", e)))?;
        Ok(())
    }
}

/// Only the configured origins get a CORS grant; everything else is left
/// without one and the browser blocks the response.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring unparseable CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = match &self {
            HubError::Validation(_)
            | HubError::Conflict(_)
            | HubError::InvalidCredentials
            | HubError::AlreadyVoted
            | HubError::InsufficientTokens
            | HubError::TooSoon { .. } => StatusCode::BAD_REQUEST,
            HubError::MissingToken => StatusCode::UNAUTHORIZED,
            HubError::InvalidToken => StatusCode::FORBIDDEN,
            HubError::NotFound(_) => StatusCode::NOT_FOUND,
            HubError::Storage(_) | HubError::Serialization(_) | HubError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {}", self);
            "Server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(types::ErrorBody { message })).into_response()
    }
}
