//! ns-core: Shared types for the Nage Show companion core
//!
//! Wallet accounting, user identity, the common error type and the
//! JSON/YAML config loader used by the lottery and race crates.

mod config;
mod error;
mod user;
mod wallet;

pub use config::*;
pub use error::*;
pub use user::*;
pub use wallet::*;

/// In-game premium currency unit
pub type Diamonds = u64;
