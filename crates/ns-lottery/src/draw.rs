//! Draw engine
//!
//! Pure over its inputs: takes a pool, a pity context and an RNG, returns
//! the pulls and the advanced context. Nothing is committed here; the
//! caller decides whether to keep the outcome (see [`crate::PlayerLottery`]).

use ns_catalog::{CatalogError, LotteryItem, LotteryPool, RarityTier};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{LotteryConfig, PityContext, PityTrigger, Result, TierProbabilities};

/// Single pull or ten-pull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawType {
    Single,
    Multi,
}

impl DrawType {
    pub fn count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::Multi => 10,
        }
    }

    pub fn cost(&self, config: &LotteryConfig) -> u64 {
        match self {
            Self::Single => config.single_draw_cost,
            Self::Multi => config.multi_draw_cost,
        }
    }
}

/// One pulled item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pull {
    pub item: LotteryItem,
    /// Guarantee that forced this pull
    pub pity: Option<PityTrigger>,
}

impl Pull {
    pub fn tier(&self) -> RarityTier {
        self.item.rarity
    }
}

/// Pulls of one draw plus the context to carry forward
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    pub pulls: Vec<Pull>,
    pub context: PityContext,
}

impl DrawOutcome {
    pub fn items(&self) -> Vec<LotteryItem> {
        self.pulls.iter().map(|p| p.item.clone()).collect()
    }

    pub fn pity_triggers(&self) -> usize {
        self.pulls.iter().filter(|p| p.pity.is_some()).count()
    }
}

/// Pick a tier at or above `floor` over the cumulative probability ranges
pub fn sample_tier<R: Rng + ?Sized>(
    probabilities: &TierProbabilities,
    floor: RarityTier,
    rng: &mut R,
) -> RarityTier {
    let candidates: Vec<(RarityTier, f64)> = floor
        .and_above()
        .map(|t| (t, probabilities.get(t)))
        .filter(|(_, p)| *p > 0.0)
        .collect();

    let total: f64 = candidates.iter().map(|(_, p)| p).sum();
    if total <= 0.0 {
        return floor;
    }

    let mut roll = rng.random::<f64>() * total;
    for (tier, p) in &candidates {
        if roll < *p {
            return *tier;
        }
        roll -= p;
    }
    // Float rounding can leave roll a hair past the last range
    candidates.last().map(|(t, _)| *t).unwrap_or(floor)
}

/// Pick an item from a tier's bucket weighted by item `weight`
pub fn sample_item<'a, R: Rng + ?Sized>(
    pool: &'a LotteryPool,
    tier: RarityTier,
    rng: &mut R,
) -> Result<&'a LotteryItem> {
    let bucket = pool.bucket(tier);
    let total = pool.weight(tier)?;

    let mut roll = rng.random::<f64>() * total;
    for item in bucket {
        if roll < item.weight {
            return Ok(item);
        }
        roll -= item.weight;
    }
    bucket
        .last()
        .ok_or_else(|| CatalogError::EmptyBucket(tier).into())
}

/// Run one draw of `draw_type` against `pool`, threading `pity` through
/// every pull in order.
///
/// Fails with `EmptyBucket` before any pull when a tier that can come out
/// of the configured probabilities has no items.
pub fn draw<R: Rng + ?Sized>(
    pool: &LotteryPool,
    pity: PityContext,
    draw_type: DrawType,
    config: &LotteryConfig,
    rng: &mut R,
) -> Result<DrawOutcome> {
    pool.require_tiers(config.required_tiers())?;

    let mut context = pity;
    let mut pulls = Vec::with_capacity(draw_type.count());

    for index in 0..draw_type.count() {
        let trigger = context.pending_trigger(config);
        let floor = trigger.map(|t| t.floor()).unwrap_or(RarityTier::Common);
        let tier = sample_tier(&config.probabilities, floor, rng);
        let item = sample_item(pool, tier, rng)?;

        if let Some(trigger) = trigger {
            log::info!(
                "Pity {:?} forced pull {} to {} ({})",
                trigger,
                index + 1,
                tier,
                item.name()
            );
        } else {
            log::debug!("Pull {}: {} ({})", index + 1, tier, item.name());
        }

        context.record(tier);
        pulls.push(Pull {
            item: item.clone(),
            pity: trigger,
        });
    }

    Ok(DrawOutcome { pulls, context })
}
