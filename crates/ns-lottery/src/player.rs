//! Per-player lottery session
//!
//! Owns the player's pity counters, statistics and history. A draw is
//! computed first, then paid for, then committed; if the debit fails the
//! computed outcome is dropped and nothing here changes.

use chrono::{DateTime, Utc};
use ns_catalog::LotteryPool;
use ns_core::{CoreError, Wallet};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    draw, DrawHistory, DrawType, LotteryConfig, LotteryResult, LotteryStatistics, PityContext,
    Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLottery {
    pity: PityContext,
    stats: LotteryStatistics,
    history: DrawHistory,
}

impl PlayerLottery {
    pub fn new(config: &LotteryConfig) -> Self {
        Self {
            pity: PityContext::new(),
            stats: LotteryStatistics::new(),
            history: DrawHistory::new(config.history_capacity),
        }
    }

    pub fn pity(&self) -> &PityContext {
        &self.pity
    }

    pub fn stats(&self) -> &LotteryStatistics {
        &self.stats
    }

    pub fn history(&self) -> &DrawHistory {
        &self.history
    }

    /// Pay for and run one draw.
    ///
    /// Fails with `InsufficientFunds` (wallet and session untouched) or
    /// `EmptyBucket` (likewise untouched).
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        wallet: &mut Wallet,
        pool: &LotteryPool,
        config: &LotteryConfig,
        draw_type: DrawType,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<LotteryResult> {
        let cost = draw_type.cost(config);
        if !wallet.can_afford(cost) {
            return Err(CoreError::InsufficientFunds {
                needed: cost,
                available: wallet.diamonds(),
            }
            .into());
        }

        let outcome = draw(pool, self.pity, draw_type, config, rng)?;
        wallet.debit(cost)?;

        let result = LotteryResult::new(&outcome, draw_type, cost, now);
        self.pity = outcome.context;
        self.stats.record(&result);
        self.history.push(result.clone());

        log::debug!(
            "{:?} draw for {} diamonds, rare={} epic={}, pity now {}/{}",
            draw_type,
            cost,
            result.has_rare_item(),
            result.has_epic_item(),
            self.pity.draws_since_rare,
            self.pity.draws_since_epic
        );

        Ok(result)
    }

    pub fn draw_single<R: Rng + ?Sized>(
        &mut self,
        wallet: &mut Wallet,
        pool: &LotteryPool,
        config: &LotteryConfig,
        rng: &mut R,
    ) -> Result<LotteryResult> {
        self.draw(wallet, pool, config, DrawType::Single, rng, Utc::now())
    }

    pub fn draw_multi<R: Rng + ?Sized>(
        &mut self,
        wallet: &mut Wallet,
        pool: &LotteryPool,
        config: &LotteryConfig,
        rng: &mut R,
    ) -> Result<LotteryResult> {
        self.draw(wallet, pool, config, DrawType::Multi, rng, Utc::now())
    }
}
