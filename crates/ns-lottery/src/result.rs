//! Draw result record

use chrono::{DateTime, Utc};
use ns_catalog::{LotteryItem, RarityTier};
use ns_core::Diamonds;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DrawOutcome, DrawType};

/// One committed draw. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryResult {
    id: Uuid,
    items: Vec<LotteryItem>,
    draw_type: DrawType,
    cost: Diamonds,
    timestamp: DateTime<Utc>,
    has_rare_item: bool,
    has_epic_item: bool,
    pity_triggers: usize,
}

impl LotteryResult {
    pub fn new(
        outcome: &DrawOutcome,
        draw_type: DrawType,
        cost: Diamonds,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let items = outcome.items();
        let has_rare_item = items.iter().any(|i| i.rarity.is_rare_or_above());
        let has_epic_item = items.iter().any(|i| i.rarity.is_epic_or_above());

        Self {
            id: Uuid::new_v4(),
            items,
            draw_type,
            cost,
            timestamp,
            has_rare_item,
            has_epic_item,
            pity_triggers: outcome.pity_triggers(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn items(&self) -> &[LotteryItem] {
        &self.items
    }

    pub fn draw_type(&self) -> DrawType {
        self.draw_type
    }

    pub fn cost(&self) -> Diamonds {
        self.cost
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn has_rare_item(&self) -> bool {
        self.has_rare_item
    }

    pub fn has_epic_item(&self) -> bool {
        self.has_epic_item
    }

    /// Pulls in this draw that a guarantee forced
    pub fn pity_triggers(&self) -> usize {
        self.pity_triggers
    }

    /// Best tier pulled
    pub fn best_tier(&self) -> Option<RarityTier> {
        self.items.iter().map(|i| i.rarity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PityContext, PityTrigger, Pull};
    use ns_catalog::Item;

    fn pull(name: &str, tier: RarityTier, pity: Option<PityTrigger>) -> Pull {
        Pull {
            item: LotteryItem::new(Item::normal(name, "s", 0, 0), tier, 1.0),
            pity,
        }
    }

    #[test]
    fn test_flags_from_items() {
        let outcome = DrawOutcome {
            pulls: vec![
                pull("a", RarityTier::Common, None),
                pull("b", RarityTier::Rare, Some(PityTrigger::Rare)),
            ],
            context: PityContext::new(),
        };
        let result = LotteryResult::new(&outcome, DrawType::Multi, 900, Utc::now());

        assert!(result.has_rare_item());
        assert!(!result.has_epic_item());
        assert_eq!(result.pity_triggers(), 1);
        assert_eq!(result.best_tier(), Some(RarityTier::Rare));
        assert_eq!(result.cost(), 900);
    }

    #[test]
    fn test_legendary_sets_both_flags() {
        let outcome = DrawOutcome {
            pulls: vec![pull("x", RarityTier::Legendary, None)],
            context: PityContext::new(),
        };
        let result = LotteryResult::new(&outcome, DrawType::Single, 100, Utc::now());
        assert!(result.has_rare_item());
        assert!(result.has_epic_item());
    }

    #[test]
    fn test_serializes_camel_case() {
        let outcome = DrawOutcome {
            pulls: vec![pull("a", RarityTier::Common, None)],
            context: PityContext::new(),
        };
        let result = LotteryResult::new(&outcome, DrawType::Single, 100, Utc::now());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["drawType"], "single");
        assert_eq!(json["hasRareItem"], false);
    }
}
