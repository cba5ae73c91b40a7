//! Error types for the Nage Show core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Insufficient funds: need {needed} diamonds, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

impl CoreError {
    /// True for the balance-check rejection
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_yml::Error> for CoreError {
    fn from(e: serde_yml::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type alias
pub type CoreResult<T> = Result<T, CoreError>;
