use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    /// 401/403: token missing, expired or rejected.
    #[error("Unauthorized ({0})")]
    Unauthorized(u16),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
