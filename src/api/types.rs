// Request/response types for the HTTP JSON API
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::account::types::AccountProfile;
use crate::proposal::types::Proposal;

// Request fields default to empty rather than rejecting at the extractor,
// so a missing field reports the same 400 as an empty one.
#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub profile: AccountProfile,
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EarnResponse {
    pub message: String,
    pub token_balance: u64,
}

#[derive(Deserialize, Debug)]
pub struct CreateProposalRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub message: String,
    pub votes: u64,
}

/// Wire shape of a proposal. The id field is named `_id` for compatibility
/// with existing clients of the API.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_by: String,
    pub votes: u64,
    pub voters: Vec<String>,
    /// RFC 3339
    pub created_at: String,
}

impl From<&Proposal> for ProposalResponse {
    fn from(proposal: &Proposal) -> Self {
        Self {
            id: proposal.id.clone(),
            title: proposal.title.clone(),
            description: proposal.description.clone(),
            created_by: proposal.created_by.clone(),
            votes: proposal.votes,
            voters: proposal.voters.clone(),
            created_at: rfc3339_millis(proposal.created_at),
        }
    }
}

fn rfc3339_millis(timestamp_ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms as i64)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_wire_shape_uses_legacy_field_names() {
        let proposal = Proposal {
            id: "p1".to_string(),
            title: "Bike racks".to_string(),
            description: Some("Near the gym".to_string()),
            created_by: "a1".to_string(),
            votes: 2,
            voters: vec!["a1".to_string(), "a2".to_string()],
            created_at: 1_700_000_000_000,
        };

        let json = serde_json::to_value(ProposalResponse::from(&proposal)).unwrap();
        assert_eq!(json["_id"], "p1");
        assert_eq!(json["createdBy"], "a1");
        assert_eq!(json["votes"], 2);
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn login_response_flattens_the_profile() {
        let response = LoginResponse {
            profile: AccountProfile {
                id: "a1".to_string(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                token_balance: 100,
            },
            token: "tok".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], "a1");
        assert_eq!(json["tokenBalance"], 100);
        assert_eq!(json["token"], "tok");
    }
}
