//! # ns-lottery — Gacha draw engine
//!
//! Single and ten-pull draws over a rarity-bucketed [`LotteryPool`], with
//! hard pity guarantees for rare and epic tiers.
//!
//! ## Architecture
//!
//! ```text
//! LotteryDesk (per-user Mutex<PlayerAccount>)
//!     │
//!     ├── Wallet          (debit before commit)
//!     └── PlayerLottery
//!           ├── PityContext      { draws_since_rare, draws_since_epic }
//!           ├── LotteryStatistics
//!           └── DrawHistory ──> LotteryResult
//!                 ^
//!                 │
//!     draw(pool, pity, DrawType, config, rng) -> DrawOutcome
//! ```
//!
//! [`LotteryPool`]: ns_catalog::LotteryPool

pub mod config;
pub mod desk;
pub mod draw;
pub mod error;
pub mod history;
pub mod pity;
pub mod player;
pub mod result;
pub mod stats;

pub use config::*;
pub use desk::*;
pub use draw::*;
pub use error::*;
pub use history::*;
pub use pity::*;
pub use player::*;
pub use result::*;
pub use stats::*;
