//! # ns-race — Horse-race betting
//!
//! A [`RaceRound`] fixes its horse field, takes bets while betting is open,
//! runs the race and settles every pending bet exactly once.
//!
//! ## Round lifecycle
//!
//! ```text
//! Preparing ──> Betting ──> Running ──> Finished ──> Result
//!   (field)    (place_bet)  (simulate)  (order)     (settle, archive)
//! ```
//!
//! Transitions are monotonic: one step at a time, never backwards.
//! [`RaceRound::tick`] drives them from wall-clock phase durations;
//! [`settle_round`] is the idempotent settlement entry point.

pub mod bet;
pub mod config;
pub mod error;
pub mod horse;
pub mod odds;
pub mod round;
pub mod settlement;
pub mod simulation;
pub mod track;

pub use bet::*;
pub use config::*;
pub use error::*;
pub use horse::*;
pub use odds::*;
pub use round::*;
pub use settlement::*;
pub use simulation::*;
pub use track::*;
