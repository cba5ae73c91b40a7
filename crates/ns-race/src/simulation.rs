//! Race simulation
//!
//! Finish order is drawn position by position: each remaining horse is
//! picked with probability proportional to its win-rate, then removed.

use rand::Rng;

use crate::{Horse, HorseId};

/// Full finish order for `horses`, strongest most likely first
pub fn simulate_finish<R: Rng + ?Sized>(horses: &[Horse], rng: &mut R) -> Vec<HorseId> {
    let mut remaining: Vec<(HorseId, f64)> = horses.iter().map(|h| (h.id, h.win_rate.max(0.0))).collect();
    let mut order = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let total: f64 = remaining.iter().map(|(_, w)| w).sum();
        let index = if total > 0.0 {
            let mut roll = rng.random::<f64>() * total;
            remaining
                .iter()
                .position(|(_, w)| {
                    if roll < *w {
                        true
                    } else {
                        roll -= w;
                        false
                    }
                })
                .unwrap_or(remaining.len() - 1)
        } else {
            rng.random_range(0..remaining.len())
        };
        order.push(remaining.remove(index).0);
    }

    order
}
