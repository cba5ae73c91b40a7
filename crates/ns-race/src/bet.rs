//! Bets

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use ns_core::{Diamonds, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Horse, HorseId, RaceError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    /// Horse finishes 1st
    Win,
    /// Horse finishes in the top 3
    Place,
    /// 1st and 2nd in order
    Exacta,
    /// 1st and 2nd in any order
    Quinella,
    /// 1st, 2nd and 3rd in order
    Trifecta,
}

impl BetType {
    pub const ALL: [BetType; 5] = [
        BetType::Win,
        BetType::Place,
        BetType::Exacta,
        BetType::Quinella,
        BetType::Trifecta,
    ];

    /// Horses a selection must name
    pub fn selection_len(&self) -> usize {
        match self {
            Self::Win | Self::Place => 1,
            Self::Exacta | Self::Quinella => 2,
            Self::Trifecta => 3,
        }
    }

    /// Does `selection` win against `finish_order`?
    ///
    /// Assumes a validated selection and a full finish order.
    pub fn wins(&self, selection: &[HorseId], finish_order: &[HorseId]) -> bool {
        if selection.len() != self.selection_len() || finish_order.len() < self.selection_len() {
            return false;
        }
        match self {
            Self::Win => finish_order[0] == selection[0],
            Self::Place => finish_order.iter().take(3).any(|h| *h == selection[0]),
            Self::Exacta | Self::Trifecta => selection == &finish_order[..selection.len()],
            Self::Quinella => {
                let top: HashSet<_> = finish_order[..2].iter().collect();
                selection.iter().all(|h| top.contains(h))
            }
        }
    }

    /// Check cardinality, distinctness and field membership
    pub fn validate_selection(&self, selection: &[HorseId], field: &[Horse]) -> Result<()> {
        if selection.len() != self.selection_len() {
            return Err(RaceError::InvalidBetSelection(format!(
                "{} needs {} horse(s), got {}",
                self,
                self.selection_len(),
                selection.len()
            )));
        }
        let mut seen = HashSet::new();
        for horse in selection {
            if !seen.insert(horse) {
                return Err(RaceError::InvalidBetSelection(format!(
                    "horse {} picked twice",
                    horse
                )));
            }
            if !field.iter().any(|h| h.id == *horse) {
                return Err(RaceError::InvalidBetSelection(format!(
                    "horse {} is not running",
                    horse
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Win => "win",
            Self::Place => "place",
            Self::Exacta => "exacta",
            Self::Quinella => "quinella",
            Self::Trifecta => "trifecta",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
}

/// Wager as submitted, before odds are quoted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetSlip {
    pub user: UserId,
    pub bet_type: BetType,
    pub horses: Vec<HorseId>,
    pub amount: Diamonds,
}

impl BetSlip {
    pub fn new(
        user: impl Into<UserId>,
        bet_type: BetType,
        horses: impl Into<Vec<HorseId>>,
        amount: Diamonds,
    ) -> Self {
        Self {
            user: user.into(),
            bet_type,
            horses: horses.into(),
            amount,
        }
    }
}

/// Accepted wager. Only `status` and `win_amount` change, once, at settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceBet {
    pub id: Uuid,
    pub user: UserId,
    pub bet_type: BetType,
    pub horses: Vec<HorseId>,
    pub amount: Diamonds,
    pub odds: f64,
    pub status: BetStatus,
    pub win_amount: Option<Diamonds>,
    pub placed_at: DateTime<Utc>,
}

impl RaceBet {
    pub fn new(slip: BetSlip, odds: f64, placed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: slip.user,
            bet_type: slip.bet_type,
            horses: slip.horses,
            amount: slip.amount,
            odds,
            status: BetStatus::Pending,
            win_amount: None,
            placed_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == BetStatus::Pending
    }

    /// `floor(amount * odds)`
    pub fn potential_win(&self) -> Diamonds {
        (self.amount as f64 * self.odds).floor() as Diamonds
    }

    /// Resolve against `finish_order`. Returns the payout for a winning
    /// bet; a bet that is no longer pending is left alone and yields `None`.
    pub fn settle(&mut self, finish_order: &[HorseId]) -> Option<Diamonds> {
        if !self.is_pending() {
            return None;
        }
        if self.bet_type.wins(&self.horses, finish_order) {
            let amount = self.potential_win();
            self.status = BetStatus::Won;
            self.win_amount = Some(amount);
            Some(amount)
        } else {
            self.status = BetStatus::Lost;
            None
        }
    }
}
