use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401/403: the caller is not (or no longer) logged in.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("response is missing {0}")]
    MissingField(&'static str),

    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}
