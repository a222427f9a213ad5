use clap::Parser;

use community_hub::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => cli::serve::run(&config).await,
        Commands::Register {
            username,
            email,
            password,
        } => cli::account::handle_register(&cli.url, username, email, password).await,
        Commands::Login { email, password } => {
            cli::account::handle_login(&cli.url, email, password).await
        }
        Commands::Logout => cli::account::handle_logout(),
        Commands::Whoami => cli::account::handle_whoami(),
        Commands::Claim => cli::account::handle_claim(&cli.url).await,
        Commands::Proposals => cli::proposals::handle_list(&cli.url).await,
        Commands::Propose { title, description } => {
            cli::proposals::handle_propose(&cli.url, title, description).await
        }
        Commands::Vote { proposal_id } => cli::proposals::handle_vote(&cli.url, proposal_id).await,
    }
}
