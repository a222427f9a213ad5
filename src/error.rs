use thiserror::Error;

/// Failure taxonomy for the whole service. The API layer maps each variant
/// to an HTTP status; 500-class detail is logged, never sent to clients.
#[derive(Error, Debug)]
pub enum HubError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} already in use")]
    Conflict(&'static str),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("You already voted on this proposal")]
    AlreadyVoted,
    #[error("Not enough tokens to vote")]
    InsufficientTokens,
    #[error("You already claimed your reward. Come back in {} hour{}.", .hours, plural_s(.hours))]
    TooSoon { hours: u64 },
    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

fn plural_s(n: &u64) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}
