use thiserror::Error;

use sustindex_api::error::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("credential store error: {0}")]
    Store(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
