// Client module
pub mod http;
pub mod session;

pub use http::{ApiClient, ApiError};
pub use session::ClientSession;
