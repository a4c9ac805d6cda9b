//! Feed Errors
//!
//! One error type for every client-side failure. Nothing here is fatal to
//! the page: bindings turn each variant into a transient notice.

use thiserror::Error;

/// Common result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedError {
    /// Keyword was empty or whitespace only. No request is sent.
    #[error("search keyword is empty")]
    EmptyKeyword,

    /// A required form field was left blank. No request is sent.
    #[error("required field '{0}' is missing")]
    MissingField(String),

    /// A form value is present but unacceptable. No request is sent.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// The request never produced a response (offline, DNS, CORS...).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Status { status: u16 },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Durable client storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// The embedded page configuration is missing or malformed.
    #[error("invalid page config: {0}")]
    Config(String),
}

impl FeedError {
    /// Validation errors are blocked locally and never reach the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FeedError::EmptyKeyword | FeedError::MissingField(_) | FeedError::InvalidField { .. }
        )
    }

    /// Message shown to the user in a toast.
    pub fn user_message(&self) -> String {
        match self {
            FeedError::EmptyKeyword => "Please enter a search keyword.".to_string(),
            FeedError::MissingField(field) => format!("Please fill in {}.", field),
            FeedError::InvalidField { reason, .. } => reason.clone(),
            FeedError::Status { status } => format!("Request failed ({}).", status),
            FeedError::Network(_) | FeedError::Decode(_) => {
                "Something went wrong while talking to the server.".to_string()
            }
            FeedError::Storage(_) => "Could not save your favorites locally.".to_string(),
            FeedError::Config(_) => "This page failed to initialize.".to_string(),
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FeedError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FeedError::Status { status: status.as_u16() }
        } else {
            FeedError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Decode(err.to_string())
    }
}
