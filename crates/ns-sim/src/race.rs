//! Race batch run

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use chrono::Utc;
use ns_core::{UserId, Wallet};
use ns_race::{
    credit_payouts, generate_field, settle_round, simulate_finish, BetSlip, BetType, RaceConfig,
    RaceRound,
};
use rand::seq::index::sample;
use rand::Rng;
use serde::Serialize;

/// Simulated bettors per round
const BETTORS: usize = 6;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetTypeLine {
    pub bets: u64,
    pub won: u64,
    pub staked: u64,
    pub paid: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceSummary {
    pub rounds: u64,
    pub bets: u64,
    pub total_staked: u64,
    pub total_paid: u64,
    pub house_take: i64,
    /// Paid out per diamond staked
    pub payout_ratio: f64,
    pub by_bet_type: BTreeMap<String, BetTypeLine>,
}

pub fn run<R: Rng + ?Sized>(rounds: u64, config: &RaceConfig, rng: &mut R) -> Result<RaceSummary> {
    // Fixed bettor order keeps seeded runs reproducible
    let users: Vec<UserId> = (0..BETTORS)
        .map(|i| UserId::new(format!("bettor-{}", i + 1)))
        .collect();
    let mut wallets: HashMap<UserId, Wallet> = users
        .iter()
        .map(|u| (u.clone(), Wallet::new(u64::MAX / 4)))
        .collect();

    let mut by_bet_type: BTreeMap<String, BetTypeLine> = BTreeMap::new();
    let mut total_staked = 0u64;
    let mut total_paid = 0u64;
    let mut bets = 0u64;

    for number in 1..=rounds {
        let now = Utc::now();
        let field = generate_field(config.horses_per_race, rng);
        let mut round = RaceRound::new(number, field, now)?;
        round.open_betting(now)?;

        for user in &users {
            let bet_type = BetType::ALL[rng.random_range(0..BetType::ALL.len())];
            let picks = sample(rng, round.horses().len(), bet_type.selection_len());
            let horses = picks.iter().map(|i| round.horses()[i].id).collect::<Vec<_>>();
            let ceiling = config.max_bet.min(config.min_bet.saturating_mul(100));
            let amount = rng.random_range(config.min_bet..=ceiling);

            let Some(wallet) = wallets.get_mut(user) else {
                continue;
            };
            round.place_bet(wallet, BetSlip::new(user.clone(), bet_type, horses, amount), config, now)?;
        }

        round.close_betting(now)?;
        let order = simulate_finish(round.horses(), rng);
        let payouts = settle_round(&mut round, &order)?;
        credit_payouts(&payouts, &mut wallets);

        for bet in round.bets() {
            let line = by_bet_type.entry(bet.bet_type.to_string()).or_default();
            line.bets += 1;
            line.staked += bet.amount;
            if let Some(win) = bet.win_amount {
                line.won += 1;
                line.paid += win;
            }
        }
        bets += round.bets().len() as u64;
        total_staked += round.total_pool();
        total_paid += round.total_paid();

        log::debug!("Round {} order {:?}, house take {}", number, order, round.house_take());
    }

    let payout_ratio = if total_staked > 0 {
        total_paid as f64 / total_staked as f64
    } else {
        0.0
    };

    Ok(RaceSummary {
        rounds,
        bets,
        total_staked,
        total_paid,
        house_take: total_staked as i64 - total_paid as i64,
        payout_ratio,
        by_bet_type,
    })
}
