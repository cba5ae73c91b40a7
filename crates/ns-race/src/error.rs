//! Race errors

use ns_core::{CoreError, Diamonds};
use thiserror::Error;

use crate::RoundState;

#[derive(Debug, Error)]
pub enum RaceError {
    /// Wallet and config failures, including `InsufficientFunds`
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Betting is closed (round is {0})")]
    BettingClosed(RoundState),

    #[error("Invalid bet selection: {0}")]
    InvalidBetSelection(String),

    #[error("Bet amount {amount} outside [{min}, {max}]")]
    InvalidAmount {
        amount: Diamonds,
        min: Diamonds,
        max: Diamonds,
    },

    #[error("Invalid finish order: {0}")]
    InvalidFinishOrder(String),

    #[error("Cannot go from {from} to {to}")]
    InvalidTransition { from: RoundState, to: RoundState },

    #[error("Round already settled")]
    AlreadySettled,

    #[error("Invalid horse field: {0}")]
    InvalidField(String),
}

impl RaceError {
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_insufficient_funds())
    }
}

pub type Result<T, E = RaceError> = std::result::Result<T, E>;
