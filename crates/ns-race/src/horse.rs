//! Horses and field generation

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{RaceError, Result};

/// Horse number within a field (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HorseId(pub u32);

impl fmt::Display for HorseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Race participant. Fixed for the round once the field is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    pub id: HorseId,
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub stamina: u32,
    pub speed: u32,
    pub power: u32,
    /// Chance of winning, normalised over the field
    pub win_rate: f64,
}

impl Horse {
    /// Weighted stat rating the win-rate is derived from
    pub fn rating(&self) -> f64 {
        self.speed as f64 * 0.4
            + self.stamina as f64 * 0.25
            + self.power as f64 * 0.25
            + self.health as f64 * 0.1
            + self.level as f64 * 2.0
    }
}

const NAMES: &[&str] = &[
    "Thunder Hoof",
    "Silver Comet",
    "Midnight Dash",
    "Crimson Gale",
    "Golden Arrow",
    "Storm Chaser",
    "Jade Runner",
    "Iron Mane",
    "Blue Lantern",
    "Desert Wind",
    "Lucky Clover",
    "Night Falcon",
];

/// Roll a field of `count` horses with random stats and normalised
/// win-rates
pub fn generate_field<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Horse> {
    let mut horses: Vec<Horse> = (0..count)
        .map(|i| {
            let name = match NAMES.get(i) {
                Some(n) => (*n).to_string(),
                None => format!("Runner {}", i + 1),
            };
            Horse {
                id: HorseId(i as u32 + 1),
                name,
                level: rng.random_range(1..=10),
                health: rng.random_range(60..=100),
                stamina: rng.random_range(40..=100),
                speed: rng.random_range(40..=100),
                power: rng.random_range(40..=100),
                win_rate: 0.0,
            }
        })
        .collect();

    normalize_win_rates(&mut horses);
    horses
}

/// Set each horse's win-rate to its share of the field's total rating
pub fn normalize_win_rates(horses: &mut [Horse]) {
    let total: f64 = horses.iter().map(Horse::rating).sum();
    if total <= 0.0 {
        let even = 1.0 / horses.len().max(1) as f64;
        horses.iter_mut().for_each(|h| h.win_rate = even);
        return;
    }
    for horse in horses.iter_mut() {
        horse.win_rate = horse.rating() / total;
    }
}

/// Field must be non-empty with distinct ids and positive finite win-rates
pub fn validate_field(horses: &[Horse]) -> Result<()> {
    if horses.is_empty() {
        return Err(RaceError::InvalidField("no horses".into()));
    }
    let mut seen = HashSet::new();
    for horse in horses {
        if !seen.insert(horse.id) {
            return Err(RaceError::InvalidField(format!("duplicate horse {}", horse.id)));
        }
        if !horse.win_rate.is_finite() || horse.win_rate <= 0.0 {
            return Err(RaceError::InvalidField(format!(
                "horse {} has win rate {}",
                horse.id, horse.win_rate
            )));
        }
    }
    Ok(())
}
