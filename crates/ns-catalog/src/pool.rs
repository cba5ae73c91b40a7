//! Lottery items and the rarity-bucketed pool

use serde::{Deserialize, Serialize};

use crate::{CatalogError, CatalogResult, Item, RarityTier};

/// A catalog item that can be drawn from the lottery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryItem {
    #[serde(flatten)]
    pub item: Item,
    pub rarity: RarityTier,
    /// Relative weight within the rarity bucket (> 0)
    pub weight: f64,
    #[serde(default)]
    pub category: String,
}

impl LotteryItem {
    pub fn new(item: Item, rarity: RarityTier, weight: f64) -> Self {
        Self {
            item,
            rarity,
            weight,
            category: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }
}

/// Tier of a lottery item. Reads the stored field only.
pub fn resolve_rarity(item: &LotteryItem) -> RarityTier {
    item.rarity
}

/// Sum of item weights in a tier's bucket
pub fn pool_weight(pool: &LotteryPool, tier: RarityTier) -> CatalogResult<f64> {
    pool.weight(tier)
}

/// Lottery items partitioned into one bucket per rarity tier
#[derive(Debug, Clone, Default)]
pub struct LotteryPool {
    buckets: [Vec<LotteryItem>; 4],
}

impl LotteryPool {
    /// Build a pool, placing each item in the bucket of its own rarity.
    ///
    /// Rejects non-finite or non-positive weights.
    pub fn new(items: impl IntoIterator<Item = LotteryItem>) -> CatalogResult<Self> {
        let mut pool = Self::default();
        for item in items {
            pool.insert(item)?;
        }
        Ok(pool)
    }

    /// Parse a JSON array of lottery items
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let items: Vec<LotteryItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn insert(&mut self, item: LotteryItem) -> CatalogResult<()> {
        if !item.weight.is_finite() || item.weight <= 0.0 {
            return Err(CatalogError::InvalidWeight {
                name: item.item.name,
                weight: item.weight,
            });
        }
        let tier = resolve_rarity(&item);
        self.buckets[tier.index()].push(item);
        Ok(())
    }

    pub fn bucket(&self, tier: RarityTier) -> &[LotteryItem] {
        &self.buckets[tier.index()]
    }

    /// Total item weight of a tier; `EmptyBucket` when it has no items
    pub fn weight(&self, tier: RarityTier) -> CatalogResult<f64> {
        let bucket = self.bucket(tier);
        if bucket.is_empty() {
            return Err(CatalogError::EmptyBucket(tier));
        }
        Ok(bucket.iter().map(|i| i.weight).sum())
    }

    /// Fail on the first of `tiers` that has no items
    pub fn require_tiers(&self, tiers: impl IntoIterator<Item = RarityTier>) -> CatalogResult<()> {
        for tier in tiers {
            if self.bucket(tier).is_empty() {
                return Err(CatalogError::EmptyBucket(tier));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &LotteryItem> {
        self.buckets.iter().flatten()
    }
}
