//! Catalog errors

use thiserror::Error;

use crate::RarityTier;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("Unknown item type {item_type} for item '{name}'")]
    UnknownItemType { name: String, item_type: u8 },

    #[error("Equipment item '{0}' has no Equip attributes")]
    MissingEquipment(String),

    #[error("Unknown equip slot: {0}")]
    UnknownSlot(u8),

    #[error("Unknown class requirement: {0}")]
    UnknownClass(u16),

    #[error("Invalid weight {weight} for item '{name}'")]
    InvalidWeight { name: String, weight: f64 },

    #[error("Rarity tier '{0}' has no items")]
    EmptyBucket(RarityTier),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonError(e.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
