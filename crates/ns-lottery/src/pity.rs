//! Pity counters

use ns_catalog::RarityTier;
use serde::{Deserialize, Serialize};

use crate::LotteryConfig;

/// Which guarantee forced a pull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PityTrigger {
    Rare,
    Epic,
}

impl PityTrigger {
    /// Lowest tier the forced pull may land on
    pub fn floor(&self) -> RarityTier {
        match self {
            Self::Rare => RarityTier::Rare,
            Self::Epic => RarityTier::Epic,
        }
    }
}

/// Per-user pull counters since the last qualifying result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PityContext {
    pub draws_since_rare: u32,
    pub draws_since_epic: u32,
}

impl PityContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guarantee that applies to the next pull, if any.
    ///
    /// The next pull is the `(draws_since_* + 1)`-th in the streak. Epic wins
    /// when both thresholds are reached on the same pull.
    pub fn pending_trigger(&self, config: &LotteryConfig) -> Option<PityTrigger> {
        let hits = |since: u32, threshold: u32| threshold > 0 && since.saturating_add(1) >= threshold;

        if hits(self.draws_since_epic, config.guaranteed_epic_draws) {
            Some(PityTrigger::Epic)
        } else if hits(self.draws_since_rare, config.guaranteed_rare_draws) {
            Some(PityTrigger::Rare)
        } else {
            None
        }
    }

    /// Advance the counters past a pull of `tier`
    pub fn record(&mut self, tier: RarityTier) {
        if tier.is_rare_or_above() {
            self.draws_since_rare = 0;
        } else {
            self.draws_since_rare = self.draws_since_rare.saturating_add(1);
        }

        if tier.is_epic_or_above() {
            self.draws_since_epic = 0;
        } else {
            self.draws_since_epic = self.draws_since_epic.saturating_add(1);
        }
    }
}
