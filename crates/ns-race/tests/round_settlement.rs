//! Round Settlement Integration Tests
//!
//! Full rounds through the public API:
//! - Bet evaluation per bet type
//! - Idempotent settlement
//! - Wallet untouched by rejected bets
//! - Payout accounting

use std::collections::HashMap;

use chrono::Utc;
use ns_core::{UserId, Wallet};
use ns_race::{
    credit_payouts, settle_round, BetSlip, BetStatus, BetType, Horse, HorseId, RaceConfig,
    RaceError, RaceRound, RoundState,
};

// ═══════════════════════════════════════════════════════════════════════════════
// TEST FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

const A: HorseId = HorseId(1);
const B: HorseId = HorseId(2);
const C: HorseId = HorseId(3);
const D: HorseId = HorseId(4);

fn field() -> Vec<Horse> {
    [(A, "Alpha", 0.4), (B, "Bravo", 0.3), (C, "Charlie", 0.2), (D, "Delta", 0.1)]
        .into_iter()
        .map(|(id, name, win_rate)| Horse {
            id,
            name: name.to_string(),
            level: 5,
            health: 90,
            stamina: 80,
            speed: 80,
            power: 80,
            win_rate,
        })
        .collect()
}

fn betting_round() -> RaceRound {
    let now = Utc::now();
    let mut round = RaceRound::new(1, field(), now).unwrap();
    round.open_betting(now).unwrap();
    round
}

fn bet(round: &mut RaceRound, wallet: &mut Wallet, user: &str, bet_type: BetType, horses: &[HorseId]) {
    round
        .place_bet(
            wallet,
            BetSlip::new(user, bet_type, horses.to_vec(), 100),
            &RaceConfig::default(),
            Utc::now(),
        )
        .unwrap();
}

fn status_of(round: &RaceRound, user: &str) -> BetStatus {
    let user = UserId::new(user);
    round.bets_for(&user).next().unwrap().status
}

// ═══════════════════════════════════════════════════════════════════════════════
// BET EVALUATION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_exacta_wins_in_order() {
    let mut round = betting_round();
    let mut wallet = Wallet::new(1_000);
    bet(&mut round, &mut wallet, "x", BetType::Exacta, &[A, B]);
    round.close_betting(Utc::now()).unwrap();

    let payouts = settle_round(&mut round, &[A, B, C, D]).unwrap();
    assert_eq!(status_of(&round, "x"), BetStatus::Won);
    assert_eq!(payouts.len(), 1);

    let placed = &round.bets()[0];
    assert_eq!(placed.win_amount, Some((100.0 * placed.odds).floor() as u64));
}

#[test]
fn test_exacta_loses_out_of_order() {
    let mut round = betting_round();
    let mut wallet = Wallet::new(1_000);
    bet(&mut round, &mut wallet, "x", BetType::Exacta, &[A, B]);
    round.close_betting(Utc::now()).unwrap();

    let payouts = settle_round(&mut round, &[B, A, C, D]).unwrap();
    assert_eq!(status_of(&round, "x"), BetStatus::Lost);
    assert!(payouts.is_empty());
    assert_eq!(round.bets()[0].win_amount, None);
}

#[test]
fn test_every_bet_type_against_one_order() {
    let mut round = betting_round();
    let mut wallet = Wallet::new(10_000);
    bet(&mut round, &mut wallet, "win", BetType::Win, &[C]);
    bet(&mut round, &mut wallet, "place", BetType::Place, &[B]);
    bet(&mut round, &mut wallet, "place-miss", BetType::Place, &[D]);
    bet(&mut round, &mut wallet, "quinella", BetType::Quinella, &[A, C]);
    bet(&mut round, &mut wallet, "trifecta", BetType::Trifecta, &[C, A, B]);
    bet(&mut round, &mut wallet, "trifecta-miss", BetType::Trifecta, &[C, B, A]);
    round.close_betting(Utc::now()).unwrap();

    settle_round(&mut round, &[C, A, B, D]).unwrap();

    assert_eq!(status_of(&round, "win"), BetStatus::Won);
    assert_eq!(status_of(&round, "place"), BetStatus::Won);
    assert_eq!(status_of(&round, "place-miss"), BetStatus::Lost);
    assert_eq!(status_of(&round, "quinella"), BetStatus::Won);
    assert_eq!(status_of(&round, "trifecta"), BetStatus::Won);
    assert_eq!(status_of(&round, "trifecta-miss"), BetStatus::Lost);
    assert_eq!(round.winning_bets().count(), 4);
    assert!(round.bets().iter().all(|b| !b.is_pending()));
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDEMPOTENCE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_settling_twice_changes_nothing() {
    let mut round = betting_round();
    let mut wallet = Wallet::new(1_000);
    bet(&mut round, &mut wallet, "x", BetType::Win, &[A]);
    bet(&mut round, &mut wallet, "y", BetType::Win, &[B]);
    round.close_betting(Utc::now()).unwrap();

    let order = [A, B, C, D];
    let first = settle_round(&mut round, &order).unwrap();
    let after_first = round.clone();

    let second = settle_round(&mut round, &order).unwrap();
    assert_eq!(round, after_first);
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(round.payouts().len(), 1);
    assert_eq!(round.state(), RoundState::Result);
}

// ═══════════════════════════════════════════════════════════════════════════════
// REJECTED BETS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_rejected_bets_leave_wallet_unchanged() {
    let mut round = betting_round();
    let config = RaceConfig::default();
    let mut wallet = Wallet::new(500);
    let now = Utc::now();

    let cases = [
        BetSlip::new("u", BetType::Exacta, vec![A], 100),
        BetSlip::new("u", BetType::Quinella, vec![A, A], 100),
        BetSlip::new("u", BetType::Win, vec![HorseId(42)], 100),
        BetSlip::new("u", BetType::Win, vec![A], 600),
        BetSlip::new("u", BetType::Win, vec![A], 5),
    ];
    for slip in cases {
        assert!(round.place_bet(&mut wallet, slip, &config, now).is_err());
        assert_eq!(wallet.diamonds(), 500);
    }

    let err = round
        .place_bet(&mut wallet, BetSlip::new("u", BetType::Win, vec![A], 600), &config, now)
        .unwrap_err();
    assert!(err.is_insufficient_funds());
    assert!(matches!(
        round
            .place_bet(&mut wallet, BetSlip::new("u", BetType::Exacta, vec![A], 100), &config, now)
            .unwrap_err(),
        RaceError::InvalidBetSelection(_)
    ));

    assert!(round.bets().is_empty());
    assert_eq!(round.total_pool(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// ACCOUNTING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_house_take_balances() {
    let mut round = betting_round();
    let mut wallets: HashMap<UserId, Wallet> = ["p1", "p2", "p3"]
        .into_iter()
        .map(|u| (UserId::new(u), Wallet::new(1_000)))
        .collect();

    for (user, horse) in [("p1", A), ("p2", B), ("p3", D)] {
        let wallet = wallets.get_mut(&UserId::new(user)).unwrap();
        bet(&mut round, wallet, user, BetType::Win, &[horse]);
    }
    round.close_betting(Utc::now()).unwrap();

    let payouts = settle_round(&mut round, &[D, C, B, A]).unwrap();
    let credited = credit_payouts(&payouts, &mut wallets);

    assert_eq!(round.total_pool(), 300);
    assert_eq!(round.house_take(), 300 - credited as i64);
    let total: u64 = wallets.values().map(|w| w.diamonds()).sum();
    assert_eq!(total, 3_000 - 300 + credited);
    assert!(wallets[&UserId::new("p3")].diamonds() > 900);
}
