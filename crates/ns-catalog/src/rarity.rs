//! Rarity tiers

use serde::{Deserialize, Serialize};

/// Lottery rarity classification, ordered low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl RarityTier {
    pub const ALL: [RarityTier; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    /// Bucket index (0 = common)
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_rare_or_above(&self) -> bool {
        *self >= Self::Rare
    }

    pub fn is_epic_or_above(&self) -> bool {
        *self >= Self::Epic
    }

    /// Tiers at or above `self`
    pub fn and_above(&self) -> impl Iterator<Item = RarityTier> + use<> {
        let floor = *self;
        Self::ALL.into_iter().filter(move |t| *t >= floor)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

impl std::fmt::Display for RarityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
