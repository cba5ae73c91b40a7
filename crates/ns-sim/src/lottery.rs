//! Lottery batch run

use anyhow::Result;
use chrono::Utc;
use ns_catalog::{LotteryPool, RarityTier};
use ns_core::Wallet;
use ns_lottery::{DrawType, LotteryConfig, PlayerLottery};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierLine {
    pub tier: RarityTier,
    pub count: u64,
    pub rate: f64,
    pub configured_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotterySummary {
    pub draws: u64,
    pub draw_type: DrawType,
    pub pulls: u64,
    pub diamonds_spent: u64,
    pub tiers: Vec<TierLine>,
    pub rare_or_above_rate: f64,
    pub pity_triggers: u64,
    /// Longest run of pulls without rare-or-above
    pub longest_drought: u64,
}

pub fn run<R: Rng + ?Sized>(
    draws: u64,
    draw_type: DrawType,
    config: &LotteryConfig,
    pool: &LotteryPool,
    rng: &mut R,
) -> Result<LotterySummary> {
    let mut wallet = Wallet::new(draw_type.cost(config).saturating_mul(draws));
    let mut player = PlayerLottery::new(config);
    let mut longest_drought = 0;

    for n in 0..draws {
        player.draw(&mut wallet, pool, config, draw_type, rng, Utc::now())?;
        longest_drought = longest_drought.max(player.stats().current_streak);

        if (n + 1) % 10_000 == 0 {
            log::info!("{} / {} draws", n + 1, draws);
        }
    }

    let stats = player.stats();
    let tiers = RarityTier::ALL
        .into_iter()
        .map(|tier| TierLine {
            tier,
            count: stats.count(tier),
            rate: stats.rate(tier),
            configured_rate: config.probabilities.normalized(tier),
        })
        .collect();

    Ok(LotterySummary {
        draws,
        draw_type,
        pulls: stats.total_draws,
        diamonds_spent: stats.total_spent,
        tiers,
        rare_or_above_rate: stats.rare_or_above_rate(),
        pity_triggers: stats.pity_triggers,
        longest_drought,
    })
}
