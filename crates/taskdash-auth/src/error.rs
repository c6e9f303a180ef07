//! Auth-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AuthError {
    /// The login endpoint answered with a non-success status.
    #[error("Login rejected with status {0}")]
    Rejected(u16),

    #[error("Login response did not contain an access token")]
    MissingToken,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Login failures are shown with one generic notice.
    pub fn user_message(&self) -> &'static str {
        "Login failed"
    }
}
