//! Lottery configuration

use ns_catalog::RarityTier;
use ns_core::{CoreError, CoreResult, Diamonds, Validate};
use serde::{Deserialize, Serialize};

/// Relative tier probabilities (normalised at draw time)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierProbabilities {
    pub common: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
}

impl TierProbabilities {
    /// 70 / 25 / 4.5 / 0.5
    pub fn standard() -> Self {
        Self {
            common: 70.0,
            rare: 25.0,
            epic: 4.5,
            legendary: 0.5,
        }
    }

    pub fn get(&self, tier: RarityTier) -> f64 {
        match tier {
            RarityTier::Common => self.common,
            RarityTier::Rare => self.rare,
            RarityTier::Epic => self.epic,
            RarityTier::Legendary => self.legendary,
        }
    }

    pub fn total(&self) -> f64 {
        RarityTier::ALL.iter().map(|t| self.get(*t)).sum()
    }

    /// Probability mass of `floor` and every tier above it
    pub fn mass_at_or_above(&self, floor: RarityTier) -> f64 {
        floor.and_above().map(|t| self.get(t)).sum()
    }

    /// Share of a tier in `[0, 1]`
    pub fn normalized(&self, tier: RarityTier) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.get(tier) / total
        } else {
            0.0
        }
    }
}

impl Default for TierProbabilities {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lottery tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryConfig {
    /// Cost of one pull
    pub single_draw_cost: Diamonds,
    /// Cost of a ten-pull
    pub multi_draw_cost: Diamonds,
    /// Tier selection weights
    pub probabilities: TierProbabilities,
    /// The Nth consecutive pull without rare-or-above is forced rare-or-above
    pub guaranteed_rare_draws: u32,
    /// The Nth consecutive pull without epic-or-above is forced epic-or-above
    pub guaranteed_epic_draws: u32,
    /// Draw results kept per player
    pub history_capacity: usize,
}

impl LotteryConfig {
    pub fn standard() -> Self {
        Self {
            single_draw_cost: 100,
            multi_draw_cost: 900,
            probabilities: TierProbabilities::standard(),
            guaranteed_rare_draws: 30,
            guaranteed_epic_draws: 90,
            history_capacity: 100,
        }
    }

    /// Tiers that can come out of a draw and therefore need items
    pub fn required_tiers(&self) -> Vec<RarityTier> {
        RarityTier::ALL
            .into_iter()
            .filter(|t| self.probabilities.get(*t) > 0.0)
            .collect()
    }
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl Validate for LotteryConfig {
    fn validate(&self) -> CoreResult<()> {
        for tier in RarityTier::ALL {
            let p = self.probabilities.get(tier);
            if !p.is_finite() || p < 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "probability for {} must be a non-negative number, got {}",
                    tier, p
                )));
            }
        }
        if self.probabilities.total() <= 0.0 {
            return Err(CoreError::InvalidConfig(
                "tier probabilities sum to zero".into(),
            ));
        }
        if self.guaranteed_rare_draws > 0
            && self.probabilities.mass_at_or_above(RarityTier::Rare) <= 0.0
        {
            return Err(CoreError::InvalidConfig(
                "rare pity needs a rare-or-above tier with probability".into(),
            ));
        }
        if self.guaranteed_epic_draws > 0
            && self.probabilities.mass_at_or_above(RarityTier::Epic) <= 0.0
        {
            return Err(CoreError::InvalidConfig(
                "epic pity needs an epic-or-above tier with probability".into(),
            ));
        }
        if self.single_draw_cost == 0 || self.multi_draw_cost == 0 {
            return Err(CoreError::InvalidConfig("draw costs must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_probabilities() {
        let p = TierProbabilities::standard();
        assert!((p.total() - 100.0).abs() < 1e-9);
        assert!((p.mass_at_or_above(RarityTier::Rare) - 30.0).abs() < 1e-9);
        assert!((p.normalized(RarityTier::Epic) - 0.045).abs() < 1e-9);
    }

    #[test]
    fn test_standard_config_is_valid() {
        let config = LotteryConfig::standard();
        assert!(config.validate().is_ok());
        assert_eq!(config.required_tiers().len(), 4);
    }

    #[test]
    fn test_rejects_negative_probability() {
        let mut config = LotteryConfig::standard();
        config.probabilities.rare = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pity_requires_reachable_tier() {
        let mut config = LotteryConfig::standard();
        config.probabilities.epic = 0.0;
        config.probabilities.legendary = 0.0;
        assert!(config.validate().is_err());

        config.guaranteed_epic_draws = 0;
        assert!(config.validate().is_ok());
        assert_eq!(
            config.required_tiers(),
            vec![RarityTier::Common, RarityTier::Rare]
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LotteryConfig =
            serde_json::from_str(r#"{"single_draw_cost": 160}"#).unwrap();
        assert_eq!(config.single_draw_cost, 160);
        assert_eq!(config.guaranteed_rare_draws, 30);
    }
}
