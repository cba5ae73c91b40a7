//! Lottery errors

use ns_catalog::CatalogError;
use ns_core::{CoreError, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LotteryError {
    /// Wallet and config failures, including `InsufficientFunds`
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Pool failures, including `EmptyBucket`
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Unknown player: {0}")]
    UnknownPlayer(UserId),
}

impl LotteryError {
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_insufficient_funds())
    }

    pub fn is_empty_bucket(&self) -> bool {
        matches!(self, Self::Catalog(CatalogError::EmptyBucket(_)))
    }
}

pub type Result<T, E = LotteryError> = std::result::Result<T, E>;
