//! Auth errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account for {0} already exists")]
    EmailTaken(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("auth API rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("auth API request failed")]
    Remote(#[from] reqwest::Error),

    #[error("unexpected auth API response: {0}")]
    UnexpectedResponse(String),

    #[error("failed to save session")]
    Storage(#[from] StorageError),
}
