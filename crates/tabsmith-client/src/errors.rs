use thiserror::Error;

/// Failure of one call to the generation service.
///
/// The display text is the single message shown to the user.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Non-success status; `message` comes from the response body when it has one.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(#[from] tabsmith_core::Error),
    #[error("http client error: {0}")]
    Client(String),
}

/// Local rejection of a session transition. Never reaches the service.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("request {ticket} is still pending")]
    InFlight { ticket: u64 },
    #[error("ticket {ticket} is not the pending request")]
    StaleTicket { ticket: u64 },
    #[error("description rejected: {0}")]
    InvalidDescription(String),
}
