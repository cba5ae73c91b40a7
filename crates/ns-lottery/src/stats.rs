//! Per-player draw statistics

use chrono::{DateTime, Utc};
use ns_catalog::RarityTier;
use ns_core::Diamonds;
use serde::{Deserialize, Serialize};

use crate::LotteryResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryStatistics {
    pub total_draws: u64,
    pub total_spent: Diamonds,
    pub common_count: u64,
    pub rare_count: u64,
    pub epic_count: u64,
    pub legendary_count: u64,
    /// Pulls since the last rare-or-above
    pub current_streak: u64,
    pub last_rare_draw: Option<DateTime<Utc>>,
    pub last_epic_draw: Option<DateTime<Utc>>,
    pub pity_triggers: u64,
}

impl LotteryStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a committed draw in
    pub fn record(&mut self, result: &LotteryResult) {
        self.total_spent = self.total_spent.saturating_add(result.cost());
        self.pity_triggers += result.pity_triggers() as u64;

        for item in result.items() {
            self.total_draws += 1;
            match item.rarity {
                RarityTier::Common => self.common_count += 1,
                RarityTier::Rare => self.rare_count += 1,
                RarityTier::Epic => self.epic_count += 1,
                RarityTier::Legendary => self.legendary_count += 1,
            }

            if item.rarity.is_rare_or_above() {
                self.current_streak = 0;
                self.last_rare_draw = Some(result.timestamp());
            } else {
                self.current_streak += 1;
            }
            if item.rarity.is_epic_or_above() {
                self.last_epic_draw = Some(result.timestamp());
            }
        }
    }

    pub fn count(&self, tier: RarityTier) -> u64 {
        match tier {
            RarityTier::Common => self.common_count,
            RarityTier::Rare => self.rare_count,
            RarityTier::Epic => self.epic_count,
            RarityTier::Legendary => self.legendary_count,
        }
    }

    /// Share of pulls that landed on `tier`
    pub fn rate(&self, tier: RarityTier) -> f64 {
        if self.total_draws == 0 {
            return 0.0;
        }
        self.count(tier) as f64 / self.total_draws as f64
    }

    pub fn rare_or_above_rate(&self) -> f64 {
        if self.total_draws == 0 {
            return 0.0;
        }
        let hits: u64 = RarityTier::Rare.and_above().map(|t| self.count(t)).sum();
        hits as f64 / self.total_draws as f64
    }

    /// Tier counts add up to the draw total
    pub fn is_consistent(&self) -> bool {
        RarityTier::ALL.iter().map(|t| self.count(*t)).sum::<u64>() == self.total_draws
    }
}
