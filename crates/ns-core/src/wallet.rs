//! Diamond wallet
//!
//! Balance is unsigned, so `diamonds >= 0` holds by construction; every
//! debit is checked against the balance before anything is mutated.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Diamonds};

/// Per-user diamond balance with running totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    diamonds: Diamonds,
    total_earned: Diamonds,
    total_spent: Diamonds,
}

impl Wallet {
    /// Create a wallet with an opening balance
    pub fn new(diamonds: Diamonds) -> Self {
        Self {
            diamonds,
            total_earned: 0,
            total_spent: 0,
        }
    }

    /// Current balance
    pub fn diamonds(&self) -> Diamonds {
        self.diamonds
    }

    /// Lifetime credits
    pub fn total_earned(&self) -> Diamonds {
        self.total_earned
    }

    /// Lifetime debits
    pub fn total_spent(&self) -> Diamonds {
        self.total_spent
    }

    pub fn can_afford(&self, amount: Diamonds) -> bool {
        self.diamonds >= amount
    }

    /// Remove `amount` from the balance.
    ///
    /// Fails with [`CoreError::InsufficientFunds`] and leaves the wallet
    /// untouched when the balance is too low.
    pub fn debit(&mut self, amount: Diamonds) -> CoreResult<()> {
        if !self.can_afford(amount) {
            return Err(CoreError::InsufficientFunds {
                needed: amount,
                available: self.diamonds,
            });
        }
        self.diamonds -= amount;
        self.total_spent = self.total_spent.saturating_add(amount);
        Ok(())
    }

    /// Add `amount` to the balance (payouts, top-ups)
    pub fn credit(&mut self, amount: Diamonds) {
        self.diamonds = self.diamonds.saturating_add(amount);
        self.total_earned = self.total_earned.saturating_add(amount);
    }
}
