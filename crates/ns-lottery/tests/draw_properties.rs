//! Draw Engine Property Tests
//!
//! Long seeded runs over the public API:
//! - Pity guarantees (rare at 30, epic at 90, epic beats rare)
//! - Tier frequency against configured probabilities
//! - Wallet atomicity on rejected draws
//! - Statistics consistency
//! - Per-player serialisation on the desk

use std::sync::Arc;
use std::thread;

use ns_catalog::{Item, LotteryItem, LotteryPool, RarityTier};
use ns_core::{UserId, Wallet};
use ns_lottery::{
    draw, DrawType, LotteryConfig, LotteryDesk, PityContext, PityTrigger, PlayerLottery,
    TierProbabilities,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ═══════════════════════════════════════════════════════════════════════════════
// TEST FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

fn demo_pool() -> LotteryPool {
    let mut items = Vec::new();
    for tier in RarityTier::ALL {
        for n in 0..4 {
            items.push(LotteryItem::new(
                Item::normal(format!("{} #{}", tier.display_name(), n), "drops", n, 0),
                tier,
                1.0 + n as f64,
            ));
        }
    }
    LotteryPool::new(items).unwrap()
}

/// Rare+ so unlikely that only pity produces it
fn stingy_config() -> LotteryConfig {
    LotteryConfig {
        probabilities: TierProbabilities {
            common: 1_000_000.0,
            rare: 0.001,
            epic: 0.001,
            legendary: 0.0,
        },
        ..LotteryConfig::standard()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PITY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_thirtieth_non_rare_draw_is_forced() {
    let pool = demo_pool();
    let config = stingy_config();
    let mut rng = ChaCha8Rng::seed_from_u64(30);
    let mut pity = PityContext::new();

    for n in 1..=30 {
        let outcome = draw(&pool, pity, DrawType::Single, &config, &mut rng).unwrap();
        let pull = &outcome.pulls[0];
        if n < 30 {
            assert_eq!(pull.tier(), RarityTier::Common, "draw {}", n);
            assert!(pull.pity.is_none());
        } else {
            assert!(pull.tier().is_rare_or_above());
            assert_eq!(pull.pity, Some(PityTrigger::Rare));
        }
        pity = outcome.context;
    }
    assert_eq!(pity.draws_since_rare, 0);
}

#[test]
fn test_ninetieth_draw_is_forced_epic_over_rare() {
    let pool = demo_pool();
    let mut config = stingy_config();
    config.guaranteed_rare_draws = 90;
    let mut rng = ChaCha8Rng::seed_from_u64(90);
    let mut pity = PityContext::new();

    for _ in 0..89 {
        let outcome = draw(&pool, pity, DrawType::Single, &config, &mut rng).unwrap();
        assert_eq!(outcome.pulls[0].tier(), RarityTier::Common);
        pity = outcome.context;
    }
    // Both thresholds hit on the 90th pull
    let outcome = draw(&pool, pity, DrawType::Single, &config, &mut rng).unwrap();
    assert!(outcome.pulls[0].tier().is_epic_or_above());
    assert_eq!(outcome.pulls[0].pity, Some(PityTrigger::Epic));
    assert_eq!(outcome.context, PityContext::new());
}

#[test]
fn test_streaks_never_exceed_thresholds() {
    let pool = demo_pool();
    let config = stingy_config();
    let mut rng = ChaCha8Rng::seed_from_u64(4242);
    let mut pity = PityContext::new();

    let mut since_rare = 0u32;
    let mut since_epic = 0u32;
    for _ in 0..300 {
        let outcome = draw(&pool, pity, DrawType::Multi, &config, &mut rng).unwrap();
        for pull in &outcome.pulls {
            since_rare = if pull.tier().is_rare_or_above() { 0 } else { since_rare + 1 };
            since_epic = if pull.tier().is_epic_or_above() { 0 } else { since_epic + 1 };
            assert!(since_rare < 30);
            assert!(since_epic < 90);
        }
        pity = outcome.context;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FREQUENCY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_rare_plus_frequency_without_pity() {
    let pool = demo_pool();
    let config = LotteryConfig {
        guaranteed_rare_draws: 0,
        guaranteed_epic_draws: 0,
        ..LotteryConfig::standard()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(10_000);
    let mut pity = PityContext::new();

    let mut rare_plus = 0;
    for _ in 0..10_000 {
        let outcome = draw(&pool, pity, DrawType::Single, &config, &mut rng).unwrap();
        assert!(outcome.pulls[0].pity.is_none());
        if outcome.pulls[0].tier().is_rare_or_above() {
            rare_plus += 1;
        }
        pity = outcome.context;
    }

    let rate = rare_plus as f64 / 10_000.0;
    assert!((rate - 0.30).abs() < 0.02, "rare+ rate {}", rate);
}

// ═══════════════════════════════════════════════════════════════════════════════
// WALLET AND STATISTICS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_wallet_fifty_cannot_single_draw() {
    let pool = demo_pool();
    let config = LotteryConfig::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(50);
    let mut wallet = Wallet::new(50);
    let mut player = PlayerLottery::new(&config);

    let err = player
        .draw_single(&mut wallet, &pool, &config, &mut rng)
        .unwrap_err();
    assert!(err.is_insufficient_funds());
    assert_eq!(wallet.diamonds(), 50);
    assert_eq!(wallet.total_spent(), 0);
    assert!(player.history().is_empty());
    assert_eq!(*player.pity(), PityContext::new());
}

#[test]
fn test_statistics_stay_consistent() {
    let pool = demo_pool();
    let config = LotteryConfig::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut wallet = Wallet::new(100_000);
    let mut player = PlayerLottery::new(&config);

    for n in 0..60 {
        if n % 3 == 0 {
            player.draw_multi(&mut wallet, &pool, &config, &mut rng).unwrap();
        } else {
            player.draw_single(&mut wallet, &pool, &config, &mut rng).unwrap();
        }
        assert!(player.stats().is_consistent());
    }

    let stats = player.stats();
    assert_eq!(stats.total_draws, 20 * 10 + 40);
    assert_eq!(stats.total_spent, 20 * 900 + 40 * 100);
    assert_eq!(wallet.diamonds(), 100_000 - stats.total_spent);
    assert_eq!(player.history().len(), 60);
    assert_eq!(stats.current_streak, player.pity().draws_since_rare as u64);
}

// ═══════════════════════════════════════════════════════════════════════════════
// DESK
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_concurrent_draws_by_one_player_never_overspend() {
    let desk = Arc::new(
        LotteryDesk::with_seed(LotteryConfig::standard(), Arc::new(demo_pool()), 9).unwrap(),
    );
    let user = UserId::new("racer");
    desk.register(user.clone(), 1_050);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let desk = Arc::clone(&desk);
            let user = user.clone();
            thread::spawn(move || {
                (0..5)
                    .filter(|_| desk.draw_single(&user).is_ok())
                    .count()
            })
        })
        .collect();

    let successes: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(successes, 10);
    assert_eq!(desk.balance(&user).unwrap(), 50);

    let stats = desk.statistics(&user).unwrap();
    assert_eq!(stats.total_draws, 10);
    assert!(stats.is_consistent());
}
