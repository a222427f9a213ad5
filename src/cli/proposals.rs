//! Proposal-side client commands: list, propose, vote.

use crate::cli::account::handle_client_error;
use crate::cli::SESSION_FILE;
use crate::client::{ApiClient, ClientSession};

pub async fn handle_list(url: &str) {
    let client = ApiClient::new(url.to_string());
    match client.proposals().await {
        Ok(proposals) => {
            if proposals.is_empty() {
                println!("No proposals yet.");
                return;
            }
            for p in proposals {
                println!("[{} votes] {} ({})", p.votes, p.title, p.id);
                if let Some(description) = &p.description {
                    println!("    {}", description);
                }
                println!("    created {} by {}", p.created_at, p.created_by);
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

pub async fn handle_propose(url: &str, title: String, description: Option<String>) {
    let session = ClientSession::load(SESSION_FILE);
    let Some(token) = session.token() else {
        println!("Not logged in. Run: community-hub login");
        return;
    };

    let client = ApiClient::new(url.to_string());
    match client
        .create_proposal(token, &title, description.as_deref())
        .await
    {
        Ok(proposal) => println!("Created proposal '{}' ({})", proposal.title, proposal.id),
        Err(e) => handle_client_error(e),
    }
}

pub async fn handle_vote(url: &str, proposal_id: String) {
    let session = ClientSession::load(SESSION_FILE);
    let Some(token) = session.token() else {
        println!("Not logged in. Run: community-hub login");
        return;
    };

    let client = ApiClient::new(url.to_string());
    match client.vote(token, &proposal_id).await {
        Ok(response) => println!("{} Total votes: {}", response.message, response.votes),
        Err(e) => handle_client_error(e),
    }
}
