use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown history filter: {0}")]
    UnknownFilter(String),

    #[error("invalid id: {0}")]
    InvalidId(String),
}
