//! Race track: runs rounds back to back and archives settled ones

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use ns_core::{Validate, Wallet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{generate_field, BetSlip, Payout, RaceBet, RaceConfig, RaceRound, Result, RoundState};

/// Settled rounds kept for history
pub const ARCHIVE_CAPACITY: usize = 20;

/// What one [`RaceTrack::tick`] did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub entered: Option<RoundState>,
    /// Payouts of a round that settled on this tick, to credit to wallets
    pub payouts: Vec<Payout>,
}

pub struct RaceTrack {
    config: RaceConfig,
    rng: ChaCha8Rng,
    current: RaceRound,
    archive: VecDeque<RaceRound>,
}

impl RaceTrack {
    pub fn new(config: RaceConfig, now: DateTime<Utc>) -> Result<Self> {
        Self::build(config, ChaCha8Rng::from_os_rng(), now)
    }

    pub fn with_seed(config: RaceConfig, seed: u64, now: DateTime<Utc>) -> Result<Self> {
        Self::build(config, ChaCha8Rng::seed_from_u64(seed), now)
    }

    fn build(config: RaceConfig, mut rng: ChaCha8Rng, now: DateTime<Utc>) -> Result<Self> {
        config.validate()?;
        let field = generate_field(config.horses_per_race, &mut rng);
        let current = RaceRound::new(1, field, now)?;
        Ok(Self {
            config,
            rng,
            current,
            archive: VecDeque::with_capacity(ARCHIVE_CAPACITY),
        })
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn current(&self) -> &RaceRound {
        &self.current
    }

    /// Settled rounds, newest first
    pub fn archive(&self) -> impl Iterator<Item = &RaceRound> {
        self.archive.iter()
    }

    pub fn place_bet(&mut self, wallet: &mut Wallet, slip: BetSlip, now: DateTime<Utc>) -> Result<RaceBet> {
        self.current.place_bet(wallet, slip, &self.config, now)
    }

    /// Advance the current round by at most one phase. A round that reaches
    /// `Result` is archived and a fresh one starts in `Preparing`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<TickOutcome> {
        let entered = self.current.tick(now, &self.config, &mut self.rng)?;

        let mut outcome = TickOutcome {
            entered,
            payouts: Vec::new(),
        };
        if entered == Some(RoundState::Result) {
            outcome.payouts = self.current.payouts().to_vec();
            self.start_next_round(now)?;
        }
        Ok(outcome)
    }

    fn start_next_round(&mut self, now: DateTime<Utc>) -> Result<()> {
        let field = generate_field(self.config.horses_per_race, &mut self.rng);
        let next = RaceRound::new(self.current.number() + 1, field, now)?;
        let settled = std::mem::replace(&mut self.current, next);

        self.archive.push_front(settled);
        self.archive.truncate(ARCHIVE_CAPACITY);
        Ok(())
    }
}
