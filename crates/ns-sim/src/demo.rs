//! Built-in demo pool

use ns_catalog::{CatalogResult, Item, LotteryItem, LotteryPool, RarityTier};

const COMMON: &[&str] = &["Red Potion", "Blue Potion", "Bandage", "Iron Ore", "Old Coin", "Feather"];
const RARE: &[&str] = &["Silver Ring", "Jade Charm", "Hunter Cape", "Spirit Ink"];
const EPIC: &[&str] = &["Phoenix Plume", "Dragon Scale", "Moon Blade"];
const LEGENDARY: &[&str] = &["Crown of Nage", "Starforged Armor"];

/// Small pool covering every tier; earlier names in a tier weigh more
pub fn demo_pool() -> CatalogResult<LotteryPool> {
    let tiers = [
        (RarityTier::Common, COMMON),
        (RarityTier::Rare, RARE),
        (RarityTier::Epic, EPIC),
        (RarityTier::Legendary, LEGENDARY),
    ];

    let items = tiers.iter().flat_map(|(tier, names)| {
        names.iter().enumerate().map(move |(i, name)| {
            let weight = (names.len() - i) as f64;
            LotteryItem::new(Item::normal(*name, "demo", i as i32, tier.index() as i32), *tier, weight)
                .with_category("demo")
        })
    });
    LotteryPool::new(items)
}
