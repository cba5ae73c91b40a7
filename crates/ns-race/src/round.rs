//! Race round state machine

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use ns_core::{Diamonds, UserId, Wallet};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    quote_odds, simulate_finish, validate_field, BetSlip, BetStatus, Horse, HorseId, RaceBet,
    RaceConfig, RaceError, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundState {
    Preparing,
    Betting,
    Running,
    Finished,
    Result,
}

impl RoundState {
    /// The only state this one may move to
    pub fn next(&self) -> Option<RoundState> {
        match self {
            Self::Preparing => Some(Self::Betting),
            Self::Betting => Some(Self::Running),
            Self::Running => Some(Self::Finished),
            Self::Finished => Some(Self::Result),
            Self::Result => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Preparing => "preparing",
            Self::Betting => "betting",
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Result => "result",
        };
        f.write_str(name)
    }
}

/// Diamonds owed to a winning bettor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub bet_id: Uuid,
    pub user: UserId,
    pub amount: Diamonds,
}

/// One betting cycle over a fixed field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRound {
    id: Uuid,
    number: u64,
    state: RoundState,
    horses: Vec<Horse>,
    bets: Vec<RaceBet>,
    finish_order: Option<Vec<HorseId>>,
    total_pool: Diamonds,
    payouts: Vec<Payout>,
    created_at: DateTime<Utc>,
    phase_started_at: DateTime<Utc>,
}

impl RaceRound {
    /// New round in `Preparing` with its field fixed
    pub fn new(number: u64, horses: Vec<Horse>, now: DateTime<Utc>) -> Result<Self> {
        validate_field(&horses)?;
        Ok(Self {
            id: Uuid::new_v4(),
            number,
            state: RoundState::Preparing,
            horses,
            bets: Vec::new(),
            finish_order: None,
            total_pool: 0,
            payouts: Vec::new(),
            created_at: now,
            phase_started_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn horses(&self) -> &[Horse] {
        &self.horses
    }

    pub fn bets(&self) -> &[RaceBet] {
        &self.bets
    }

    pub fn bets_for<'a>(&'a self, user: &'a UserId) -> impl Iterator<Item = &'a RaceBet> + 'a {
        self.bets.iter().filter(move |b| &b.user == user)
    }

    pub fn winning_bets(&self) -> impl Iterator<Item = &RaceBet> {
        self.bets.iter().filter(|b| b.status == BetStatus::Won)
    }

    pub fn finish_order(&self) -> Option<&[HorseId]> {
        self.finish_order.as_deref()
    }

    pub fn total_pool(&self) -> Diamonds {
        self.total_pool
    }

    pub fn payouts(&self) -> &[Payout] {
        &self.payouts
    }

    pub fn total_paid(&self) -> Diamonds {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    /// Stakes kept minus winnings paid; negative when the house lost
    pub fn house_take(&self) -> i64 {
        self.total_pool as i64 - self.total_paid() as i64
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn phase_started_at(&self) -> DateTime<Utc> {
        self.phase_started_at
    }

    /// When the current phase ends; `None` once the round is over
    pub fn phase_deadline(&self, config: &RaceConfig) -> Option<DateTime<Utc>> {
        let secs = config.phase_durations.for_state(self.state)?;
        Some(self.phase_started_at + TimeDelta::seconds(i64::from(secs)))
    }

    fn step(&mut self, to: RoundState, now: DateTime<Utc>) -> Result<()> {
        if self.state.next() != Some(to) {
            return Err(RaceError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        log::info!("Round {}: {} -> {}", self.number, self.state, to);
        self.state = to;
        self.phase_started_at = now;
        Ok(())
    }

    pub fn open_betting(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.step(RoundState::Betting, now)
    }

    pub fn close_betting(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.step(RoundState::Running, now)
    }

    /// Record the finish order (`Running -> Finished`)
    pub fn finish(&mut self, order: &[HorseId], now: DateTime<Utc>) -> Result<()> {
        if self.state != RoundState::Running {
            return Err(RaceError::InvalidTransition {
                from: self.state,
                to: RoundState::Finished,
            });
        }
        self.validate_finish_order(order)?;
        self.step(RoundState::Finished, now)?;
        self.finish_order = Some(order.to_vec());
        Ok(())
    }

    /// Resolve every pending bet (`Finished -> Result`) and return the
    /// payouts produced. A round already in `Result` gives `AlreadySettled`.
    pub fn settle(&mut self, now: DateTime<Utc>) -> Result<Vec<Payout>> {
        if self.state == RoundState::Result {
            return Err(RaceError::AlreadySettled);
        }
        if self.state != RoundState::Finished {
            return Err(RaceError::InvalidTransition {
                from: self.state,
                to: RoundState::Result,
            });
        }
        let order = self
            .finish_order
            .clone()
            .ok_or_else(|| RaceError::InvalidFinishOrder("round finished without an order".into()))?;

        let mut payouts = Vec::new();
        for bet in self.bets.iter_mut() {
            if let Some(amount) = bet.settle(&order) {
                payouts.push(Payout {
                    bet_id: bet.id,
                    user: bet.user.clone(),
                    amount,
                });
            }
        }

        self.step(RoundState::Result, now)?;
        self.payouts.extend(payouts.iter().cloned());

        log::info!(
            "Round {} settled: {} bet(s), {} winner(s), pool {}, paid {}",
            self.number,
            self.bets.len(),
            payouts.len(),
            self.total_pool,
            self.total_paid()
        );
        Ok(payouts)
    }

    /// Finish order must name every horse in the field exactly once
    pub fn validate_finish_order(&self, order: &[HorseId]) -> Result<()> {
        if order.len() != self.horses.len() {
            return Err(RaceError::InvalidFinishOrder(format!(
                "expected {} horses, got {}",
                self.horses.len(),
                order.len()
            )));
        }
        for (i, horse) in order.iter().enumerate() {
            if !self.horses.iter().any(|h| h.id == *horse) {
                return Err(RaceError::InvalidFinishOrder(format!("horse {} is not running", horse)));
            }
            if order[..i].contains(horse) {
                return Err(RaceError::InvalidFinishOrder(format!("horse {} listed twice", horse)));
            }
        }
        Ok(())
    }

    /// Accept a wager and debit its stake.
    ///
    /// Every check runs before the debit, so a rejected bet leaves the
    /// wallet and the round untouched.
    pub fn place_bet(
        &mut self,
        wallet: &mut Wallet,
        slip: BetSlip,
        config: &RaceConfig,
        now: DateTime<Utc>,
    ) -> Result<RaceBet> {
        if self.state != RoundState::Betting {
            return Err(RaceError::BettingClosed(self.state));
        }
        if slip.amount < config.min_bet || slip.amount > config.max_bet {
            return Err(RaceError::InvalidAmount {
                amount: slip.amount,
                min: config.min_bet,
                max: config.max_bet,
            });
        }
        let odds = quote_odds(slip.bet_type, &slip.horses, &self.horses, config)?;

        wallet.debit(slip.amount)?;

        let bet = RaceBet::new(slip, odds, now);
        log::debug!(
            "Round {}: {} bet {} on {:?} for {} at {:.2}",
            self.number,
            bet.user,
            bet.bet_type,
            bet.horses,
            bet.amount,
            bet.odds
        );
        self.total_pool = self.total_pool.saturating_add(bet.amount);
        self.bets.push(bet.clone());
        Ok(bet)
    }

    /// Take at most one time-driven step.
    ///
    /// When the running phase ends the race is simulated with `rng`; when the
    /// finished phase ends the round settles and its payouts become
    /// available from [`payouts`](Self::payouts). Returns the state entered,
    /// if any.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        config: &RaceConfig,
        rng: &mut R,
    ) -> Result<Option<RoundState>> {
        let Some(deadline) = self.phase_deadline(config) else {
            return Ok(None);
        };
        if now < deadline {
            return Ok(None);
        }

        match self.state {
            RoundState::Preparing => self.open_betting(now)?,
            RoundState::Betting => self.close_betting(now)?,
            RoundState::Running => {
                let order = simulate_finish(&self.horses, rng);
                self.finish(&order, now)?;
            }
            RoundState::Finished => {
                self.settle(now)?;
            }
            RoundState::Result => return Ok(None),
        }
        Ok(Some(self.state))
    }
}
