//! Account-side client commands: register, login, logout, whoami, claim.

use crate::cli::SESSION_FILE;
use crate::client::{ApiClient, ApiError, ClientSession};

pub async fn handle_register(url: &str, username: String, email: String, password: String) {
    let client = ApiClient::new(url.to_string());
    match client.register(&username, &email, &password).await {
        Ok(profile) => {
            println!("Registered '{}' <{}>", profile.username, profile.email);
            println!("Starting balance: {} tokens", profile.token_balance);
            println!("Log in with: community-hub login --email {} --password ...", profile.email);
        }
        Err(e) => println!("Error: {}", e),
    }
}

pub async fn handle_login(url: &str, email: String, password: String) {
    let client = ApiClient::new(url.to_string());
    match client.login(&email, &password).await {
        Ok(response) => {
            let mut session = ClientSession::load(SESSION_FILE);
            session.authenticate(response.profile.clone(), response.token);
            if let Err(e) = session.save(SESSION_FILE) {
                println!("Warning: could not save session: {}", e);
            }
            println!(
                "Logged in as '{}' ({} tokens)",
                response.profile.username, response.profile.token_balance
            );
        }
        Err(e) => println!("Error: {}", e),
    }
}

pub fn handle_logout() {
    let mut session = ClientSession::load(SESSION_FILE);
    if !session.is_authenticated() {
        println!("Not logged in.");
        return;
    }
    session.logout();
    match session.save(SESSION_FILE) {
        Ok(()) => println!("Logged out."),
        Err(e) => println!("Error: could not save session: {}", e),
    }
}

pub fn handle_whoami() {
    let session = ClientSession::load(SESSION_FILE);
    match session.profile() {
        Some(profile) => println!(
            "{} <{}> - {} tokens",
            profile.username, profile.email, profile.token_balance
        ),
        None => println!("Not logged in."),
    }
}

pub async fn handle_claim(url: &str) {
    let session = ClientSession::load(SESSION_FILE);
    let Some(token) = session.token() else {
        println!("Not logged in. Run: community-hub login");
        return;
    };

    let client = ApiClient::new(url.to_string());
    match client.earn(token).await {
        Ok(response) => {
            println!("{}", response.message);
            println!("Balance: {} tokens", response.token_balance);
        }
        Err(e) => handle_client_error(e),
    }
}

/// Shared error path for protected calls: an auth rejection invalidates the
/// stored session, so the state on disk transitions back to anonymous.
pub fn handle_client_error(e: ApiError) {
    if e.is_auth_failure() {
        let mut session = ClientSession::load(SESSION_FILE);
        session.logout();
        let _ = session.save(SESSION_FILE);
        println!("Session expired. Log in again with: community-hub login");
    } else {
        println!("Error: {}", e);
    }
}
