pub mod account;
pub mod proposals;
pub mod serve;

use clap::{Parser, Subcommand};

/// Where the client commands keep the logged-in session.
pub const SESSION_FILE: &str = "hub_session.json";

#[derive(Parser)]
#[command(name = "community-hub")]
#[command(about = "Community Hub server and client CLI", long_about = None)]
pub struct Cli {
    /// Server base URL for client commands
    #[arg(long, default_value = "http://localhost:5000", global = true)]
    pub url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    Serve {
        #[arg(long, default_value = "hub.toml")]
        config: String,
    },
    /// Register a new account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the session locally
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Claim the daily token reward
    Claim,
    /// List proposals, newest first
    Proposals,
    /// Submit a new proposal
    Propose {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Vote on a proposal (spends tokens)
    Vote {
        proposal_id: String,
    },
}
