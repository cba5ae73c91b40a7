//! Catalog items
//!
//! The data tables store every item in one flat shape with a numeric `Type`
//! discriminant (1 normal, 2 gift pack, 3 equipment). Parsing lifts that
//! into [`ItemKind`] so equipment attributes only exist on equipment.

use serde::{Deserialize, Serialize};

use crate::{CatalogError, EquipSlot, EquipmentAttributes};

/// Item type discriminant as stored in the tables
pub const TYPE_NORMAL: u8 = 1;
pub const TYPE_GIFT_PACK: u8 = 2;
pub const TYPE_EQUIPMENT: u8 = 3;

/// Variant payload of an item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Normal,
    GiftPack { gifts: Vec<String> },
    Equipment(Box<EquipmentAttributes>),
}

impl ItemKind {
    pub fn type_code(&self) -> u8 {
        match self {
            Self::Normal => TYPE_NORMAL,
            Self::GiftPack { .. } => TYPE_GIFT_PACK,
            Self::Equipment(_) => TYPE_EQUIPMENT,
        }
    }
}

/// Item identity: name + sprite sheet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub name: String,
    pub sheet: String,
}

impl ItemKey {
    pub fn new(name: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sheet: sheet.into(),
        }
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawItem", into = "RawItem")]
pub struct Item {
    pub name: String,
    /// Sprite sheet reference
    pub sheet: String,
    /// Grid cell on the sprite sheet
    pub x: i32,
    pub y: i32,
    pub kind: ItemKind,
}

impl Item {
    pub fn normal(name: impl Into<String>, sheet: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            sheet: sheet.into(),
            x,
            y,
            kind: ItemKind::Normal,
        }
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.name.clone(), self.sheet.clone())
    }

    pub fn is_equipment(&self) -> bool {
        matches!(self.kind, ItemKind::Equipment(_))
    }

    pub fn equipment(&self) -> Option<&EquipmentAttributes> {
        match &self.kind {
            ItemKind::Equipment(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn slot(&self) -> Option<EquipSlot> {
        self.equipment().map(|e| e.part)
    }

    /// Contents of a gift pack (empty for other kinds)
    pub fn gifts(&self) -> &[String] {
        match &self.kind {
            ItemKind::GiftPack { gifts } => gifts,
            _ => &[],
        }
    }
}

/// On-disk shape of an item row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawItem {
    pub name: String,
    #[serde(rename = "Type")]
    pub item_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gifts: Option<Vec<String>>,
    pub sheet: String,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equip: Option<EquipmentAttributes>,
}

impl TryFrom<RawItem> for Item {
    type Error = CatalogError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let kind = match raw.item_type {
            TYPE_NORMAL | TYPE_GIFT_PACK => {
                if raw.equip.is_some() {
                    log::warn!("Ignoring Equip on non-equipment item '{}'", raw.name);
                }
                if raw.item_type == TYPE_NORMAL {
                    ItemKind::Normal
                } else {
                    ItemKind::GiftPack {
                        gifts: raw.gifts.unwrap_or_default(),
                    }
                }
            }
            TYPE_EQUIPMENT => match raw.equip {
                Some(attrs) => ItemKind::Equipment(Box::new(attrs)),
                None => return Err(CatalogError::MissingEquipment(raw.name)),
            },
            other => {
                return Err(CatalogError::UnknownItemType {
                    name: raw.name,
                    item_type: other,
                });
            }
        };

        Ok(Self {
            name: raw.name,
            sheet: raw.sheet,
            x: raw.x,
            y: raw.y,
            kind,
        })
    }
}

impl From<Item> for RawItem {
    fn from(item: Item) -> Self {
        let item_type = item.kind.type_code();
        let (gifts, equip) = match item.kind {
            ItemKind::Normal => (None, None),
            ItemKind::GiftPack { gifts } => (Some(gifts), None),
            ItemKind::Equipment(attrs) => (None, Some(*attrs)),
        };
        Self {
            name: item.name,
            item_type,
            gifts,
            sheet: item.sheet,
            x: item.x,
            y: item.y,
            equip,
        }
    }
}
