//! # ns-catalog — Item catalog and lottery pool
//!
//! Static reference data for the companion site: the drop, crafting and
//! equipment tables, plus the rarity-bucketed pool the gacha draws from.
//!
//! ## Architecture
//!
//! ```text
//! JSON table ──> Item { name, sheet, x, y, kind }
//!                   │
//!                   ├── ItemKind::Normal
//!                   ├── ItemKind::GiftPack { gifts }
//!                   └── ItemKind::Equipment(EquipmentAttributes)
//!
//! LotteryItem (Item + rarity + weight) ──> LotteryPool [common|rare|epic|legendary]
//! ```

pub mod catalog;
pub mod equipment;
pub mod error;
pub mod item;
pub mod pool;
pub mod rarity;

pub use catalog::*;
pub use equipment::*;
pub use error::*;
pub use item::*;
pub use pool::*;
pub use rarity::*;
