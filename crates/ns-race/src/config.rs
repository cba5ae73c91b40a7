//! Race configuration

use ns_core::{CoreError, CoreResult, Diamonds, Validate};
use serde::{Deserialize, Serialize};

use crate::{BetType, RoundState};

/// Payout multiplier applied on top of the base odds per bet type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsMultipliers {
    pub win: f64,
    pub place: f64,
    pub exacta: f64,
    pub quinella: f64,
    pub trifecta: f64,
}

impl OddsMultipliers {
    pub fn get(&self, bet_type: BetType) -> f64 {
        match bet_type {
            BetType::Win => self.win,
            BetType::Place => self.place,
            BetType::Exacta => self.exacta,
            BetType::Quinella => self.quinella,
            BetType::Trifecta => self.trifecta,
        }
    }
}

impl Default for OddsMultipliers {
    fn default() -> Self {
        Self {
            win: 1.0,
            place: 0.35,
            exacta: 0.8,
            quinella: 0.4,
            trifecta: 0.6,
        }
    }
}

/// Seconds spent in each timed phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub preparing_secs: u32,
    pub betting_secs: u32,
    pub running_secs: u32,
    pub finished_secs: u32,
}

impl PhaseDurations {
    /// `None` for the terminal state
    pub fn for_state(&self, state: RoundState) -> Option<u32> {
        match state {
            RoundState::Preparing => Some(self.preparing_secs),
            RoundState::Betting => Some(self.betting_secs),
            RoundState::Running => Some(self.running_secs),
            RoundState::Finished => Some(self.finished_secs),
            RoundState::Result => None,
        }
    }

    pub fn total_secs(&self) -> u64 {
        [
            self.preparing_secs,
            self.betting_secs,
            self.running_secs,
            self.finished_secs,
        ]
        .iter()
        .map(|s| u64::from(*s))
        .sum()
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            preparing_secs: 10,
            betting_secs: 60,
            running_secs: 30,
            finished_secs: 10,
        }
    }
}

/// Race tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Share of every fair price kept by the house
    pub house_edge: f64,
    pub odds_multipliers: OddsMultipliers,
    pub min_bet: Diamonds,
    pub max_bet: Diamonds,
    pub horses_per_race: usize,
    pub phase_durations: PhaseDurations,
    /// Quoted odds are clamped into `[min_odds, max_odds]`
    pub min_odds: f64,
    pub max_odds: f64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            house_edge: 0.1,
            odds_multipliers: OddsMultipliers::default(),
            min_bet: 10,
            max_bet: 10_000,
            horses_per_race: 8,
            phase_durations: PhaseDurations::default(),
            min_odds: 1.1,
            max_odds: 999.0,
        }
    }
}

impl Validate for RaceConfig {
    fn validate(&self) -> CoreResult<()> {
        if !(0.0..1.0).contains(&self.house_edge) {
            return Err(CoreError::InvalidConfig(format!(
                "house_edge must be in [0, 1), got {}",
                self.house_edge
            )));
        }
        for bet_type in BetType::ALL {
            let m = self.odds_multipliers.get(bet_type);
            if !m.is_finite() || m <= 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "odds multiplier for {} must be positive, got {}",
                    bet_type, m
                )));
            }
        }
        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return Err(CoreError::InvalidConfig(format!(
                "bet limits must satisfy 0 < min <= max, got [{}, {}]",
                self.min_bet, self.max_bet
            )));
        }
        // Trifecta needs three runners
        if self.horses_per_race < 3 {
            return Err(CoreError::InvalidConfig(format!(
                "horses_per_race must be at least 3, got {}",
                self.horses_per_race
            )));
        }
        if !(self.min_odds.is_finite() && self.max_odds.is_finite())
            || self.min_odds < 1.0
            || self.min_odds > self.max_odds
        {
            return Err(CoreError::InvalidConfig(format!(
                "odds clamp must satisfy 1 <= min <= max, got [{}, {}]",
                self.min_odds, self.max_odds
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RaceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.phase_durations.total_secs(), 110);
        assert_eq!(config.phase_durations.for_state(RoundState::Result), None);
    }

    #[test]
    fn test_rejects_bad_edge() {
        let config = RaceConfig {
            house_edge: 1.0,
            ..RaceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let config = RaceConfig {
            min_bet: 500,
            max_bet: 100,
            ..RaceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_small_field() {
        let config = RaceConfig {
            horses_per_race: 2,
            ..RaceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_partial() {
        let config: RaceConfig = serde_yml::from_str("house_edge: 0.05\nodds_multipliers:\n  win: 1.2\n").unwrap();
        assert!((config.house_edge - 0.05).abs() < 0.001);
        assert!((config.odds_multipliers.win - 1.2).abs() < 0.001);
        assert!((config.odds_multipliers.place - 0.35).abs() < 0.001);
        assert_eq!(config.horses_per_race, 8);
    }
}
