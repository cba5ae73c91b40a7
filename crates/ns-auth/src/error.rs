//! Auth errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedSnapshot(e.to_string())
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
