//! Lottery desk: player registry
//!
//! The pool and config are shared read-only. Each player's account sits
//! behind its own mutex, held for the whole draw, so two draws by the same
//! player never interleave while different players draw in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use ns_catalog::LotteryPool;
use ns_core::{Diamonds, UserId, Validate, Wallet};
use parking_lot::{Mutex, RwLock};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{DrawType, LotteryConfig, LotteryError, LotteryResult, LotteryStatistics, PlayerLottery, Result};

/// Wallet, lottery session and RNG of one player
#[derive(Debug)]
pub struct PlayerAccount {
    pub wallet: Wallet,
    pub lottery: PlayerLottery,
    rng: ChaCha8Rng,
}

impl PlayerAccount {
    fn new(opening_balance: Diamonds, config: &LotteryConfig, seed: u64) -> Self {
        Self {
            wallet: Wallet::new(opening_balance),
            lottery: PlayerLottery::new(config),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn draw(
        &mut self,
        pool: &LotteryPool,
        config: &LotteryConfig,
        draw_type: DrawType,
    ) -> Result<LotteryResult> {
        self.lottery
            .draw(&mut self.wallet, pool, config, draw_type, &mut self.rng, Utc::now())
    }
}

pub struct LotteryDesk {
    config: LotteryConfig,
    pool: Arc<LotteryPool>,
    players: RwLock<HashMap<UserId, Arc<Mutex<PlayerAccount>>>>,
    /// Seeds per-player generators
    seeder: Mutex<ChaCha8Rng>,
}

impl LotteryDesk {
    /// Validate config and pool, seeding from the OS
    pub fn new(config: LotteryConfig, pool: Arc<LotteryPool>) -> Result<Self> {
        Self::build(config, pool, ChaCha8Rng::from_os_rng())
    }

    /// Reproducible desk: every player's draws follow from `seed` and
    /// registration order
    pub fn with_seed(config: LotteryConfig, pool: Arc<LotteryPool>, seed: u64) -> Result<Self> {
        Self::build(config, pool, ChaCha8Rng::seed_from_u64(seed))
    }

    fn build(config: LotteryConfig, pool: Arc<LotteryPool>, seeder: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        pool.require_tiers(config.required_tiers())?;

        log::info!(
            "Lottery desk ready: {} items, costs {}/{}, pity {}/{}",
            pool.len(),
            config.single_draw_cost,
            config.multi_draw_cost,
            config.guaranteed_rare_draws,
            config.guaranteed_epic_draws
        );

        Ok(Self {
            config,
            pool,
            players: RwLock::new(HashMap::new()),
            seeder: Mutex::new(seeder),
        })
    }

    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    pub fn pool(&self) -> &Arc<LotteryPool> {
        &self.pool
    }

    /// Add a player, or return the existing account unchanged
    pub fn register(&self, user: UserId, opening_balance: Diamonds) -> Arc<Mutex<PlayerAccount>> {
        let mut players = self.players.write();
        players
            .entry(user)
            .or_insert_with_key(|id| {
                let seed = self.seeder.lock().random::<u64>();
                log::debug!("Registered lottery player {} with {} diamonds", id, opening_balance);
                Arc::new(Mutex::new(PlayerAccount::new(opening_balance, &self.config, seed)))
            })
            .clone()
    }

    pub fn account(&self, user: &UserId) -> Result<Arc<Mutex<PlayerAccount>>> {
        self.players
            .read()
            .get(user)
            .cloned()
            .ok_or_else(|| LotteryError::UnknownPlayer(user.clone()))
    }

    pub fn draw(&self, user: &UserId, draw_type: DrawType) -> Result<LotteryResult> {
        let account = self.account(user)?;
        let mut account = account.lock();
        account.draw(&self.pool, &self.config, draw_type)
    }

    pub fn draw_single(&self, user: &UserId) -> Result<LotteryResult> {
        self.draw(user, DrawType::Single)
    }

    pub fn draw_multi(&self, user: &UserId) -> Result<LotteryResult> {
        self.draw(user, DrawType::Multi)
    }

    pub fn balance(&self, user: &UserId) -> Result<Diamonds> {
        Ok(self.account(user)?.lock().wallet.diamonds())
    }

    pub fn top_up(&self, user: &UserId, amount: Diamonds) -> Result<Diamonds> {
        let account = self.account(user)?;
        let mut account = account.lock();
        account.wallet.credit(amount);
        Ok(account.wallet.diamonds())
    }

    pub fn statistics(&self, user: &UserId) -> Result<LotteryStatistics> {
        Ok(self.account(user)?.lock().lottery.stats().clone())
    }

    pub fn player_count(&self) -> usize {
        self.players.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_catalog::{Item, LotteryItem, RarityTier};

    fn pool() -> Arc<LotteryPool> {
        Arc::new(
            LotteryPool::new(RarityTier::ALL.into_iter().map(|t| {
                LotteryItem::new(Item::normal(t.display_name(), "s", 0, 0), t, 1.0)
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = LotteryConfig::standard();
        config.single_draw_cost = 0;
        assert!(LotteryDesk::new(config, pool()).is_err());
    }

    #[test]
    fn test_rejects_pool_missing_tier() {
        let pool = Arc::new(
            LotteryPool::new([LotteryItem::new(
                Item::normal("c", "s", 0, 0),
                RarityTier::Common,
                1.0,
            )])
            .unwrap(),
        );
        let err = LotteryDesk::new(LotteryConfig::standard(), pool).err().unwrap();
        assert!(err.is_empty_bucket());
    }

    #[test]
    fn test_unknown_player() {
        let desk = LotteryDesk::with_seed(LotteryConfig::standard(), pool(), 1).unwrap();
        let err = desk.draw_single(&UserId::new("ghost")).unwrap_err();
        assert!(matches!(err, LotteryError::UnknownPlayer(_)));
    }

    #[test]
    fn test_register_is_idempotent() {
        let desk = LotteryDesk::with_seed(LotteryConfig::standard(), pool(), 1).unwrap();
        let user = UserId::new("u1");
        desk.register(user.clone(), 500);
        desk.draw_single(&user).unwrap();
        desk.register(user.clone(), 10_000);

        assert_eq!(desk.player_count(), 1);
        assert_eq!(desk.balance(&user).unwrap(), 400);
    }

    #[test]
    fn test_top_up_then_draw() {
        let desk = LotteryDesk::with_seed(LotteryConfig::standard(), pool(), 2).unwrap();
        let user = UserId::new("u2");
        desk.register(user.clone(), 0);
        assert!(desk.draw_single(&user).unwrap_err().is_insufficient_funds());

        assert_eq!(desk.top_up(&user, 900).unwrap(), 900);
        desk.draw_multi(&user).unwrap();
        assert_eq!(desk.balance(&user).unwrap(), 0);
        assert_eq!(desk.statistics(&user).unwrap().total_draws, 10);
    }
}
