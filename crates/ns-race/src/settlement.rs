//! Settlement entry point

use std::collections::HashMap;

use chrono::Utc;
use ns_core::{Diamonds, UserId, Wallet};

use crate::{HorseId, Payout, RaceError, RaceRound, Result, RoundState};

/// Settle `round` against `finish_order` and return the payouts produced.
///
/// A running round is finished first. Settling a round that is already in
/// `Result` changes nothing and returns no payouts, so calling this twice
/// never pays twice.
pub fn settle_round(round: &mut RaceRound, finish_order: &[HorseId]) -> Result<Vec<Payout>> {
    let now = Utc::now();
    let settled = match round.state() {
        RoundState::Result => round.settle(now),
        RoundState::Finished => {
            if round.finish_order() != Some(finish_order) {
                return Err(RaceError::InvalidFinishOrder(
                    "round already finished with a different order".into(),
                ));
            }
            round.settle(now)
        }
        RoundState::Running => {
            round.finish(finish_order, now)?;
            round.settle(now)
        }
        state => Err(RaceError::InvalidTransition {
            from: state,
            to: RoundState::Finished,
        }),
    };

    match settled {
        Err(RaceError::AlreadySettled) => {
            log::warn!("Round {}: {}, ignoring", round.number(), RaceError::AlreadySettled);
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Credit payouts to the matching wallets. Returns the total credited;
/// payouts for users without a wallet here are skipped with a warning.
pub fn credit_payouts(payouts: &[Payout], wallets: &mut HashMap<UserId, Wallet>) -> Diamonds {
    let mut credited = 0;
    for payout in payouts {
        match wallets.get_mut(&payout.user) {
            Some(wallet) => {
                wallet.credit(payout.amount);
                credited += payout.amount;
            }
            None => log::warn!(
                "No wallet for {}, payout {} of {} not credited",
                payout.user,
                payout.bet_id,
                payout.amount
            ),
        }
    }
    credited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_field, BetSlip, BetType, RaceConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn running_round() -> RaceRound {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        let now = Utc::now();
        let mut round = RaceRound::new(7, generate_field(4, &mut rng), now).unwrap();
        round.open_betting(now).unwrap();
        round.close_betting(now).unwrap();
        round
    }

    #[test]
    fn test_settle_from_running() {
        let mut round = running_round();
        let order = [HorseId(2), HorseId(1), HorseId(4), HorseId(3)];
        let payouts = settle_round(&mut round, &order).unwrap();
        assert!(payouts.is_empty());
        assert_eq!(round.state(), RoundState::Result);
        assert_eq!(round.finish_order(), Some(&order[..]));
    }

    #[test]
    fn test_settle_before_betting_closes_fails() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let now = Utc::now();
        let mut round = RaceRound::new(1, generate_field(4, &mut rng), now).unwrap();
        round.open_betting(now).unwrap();

        let order = [HorseId(1), HorseId(2), HorseId(3), HorseId(4)];
        assert!(settle_round(&mut round, &order).is_err());
        assert_eq!(round.state(), RoundState::Betting);
    }

    #[test]
    fn test_finished_round_needs_same_order() {
        let mut round = running_round();
        let order = [HorseId(1), HorseId(2), HorseId(3), HorseId(4)];
        round.finish(&order, Utc::now()).unwrap();

        let other = [HorseId(2), HorseId(1), HorseId(3), HorseId(4)];
        assert!(settle_round(&mut round, &other).is_err());
        assert!(settle_round(&mut round, &order).is_ok());
    }

    #[test]
    fn test_resettle_swallows_already_settled() {
        let mut round = running_round();
        let order = [HorseId(3), HorseId(4), HorseId(1), HorseId(2)];
        settle_round(&mut round, &order).unwrap();

        assert!(matches!(round.settle(Utc::now()), Err(RaceError::AlreadySettled)));
        assert!(settle_round(&mut round, &order).unwrap().is_empty());
        assert_eq!(round.state(), RoundState::Result);
    }

    #[test]
    fn test_credit_payouts() {
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        let now = Utc::now();
        let config = RaceConfig::default();
        let mut round = RaceRound::new(1, generate_field(4, &mut rng), now).unwrap();
        round.open_betting(now).unwrap();

        let mut wallets = HashMap::new();
        wallets.insert(UserId::new("a"), Wallet::new(1000));
        let wallet = wallets.get_mut(&UserId::new("a")).unwrap();
        round
            .place_bet(wallet, BetSlip::new("a", BetType::Win, vec![HorseId(3)], 100), &config, now)
            .unwrap();
        round.close_betting(now).unwrap();

        let payouts = settle_round(&mut round, &[HorseId(3), HorseId(1), HorseId(2), HorseId(4)]).unwrap();
        assert_eq!(payouts.len(), 1);

        let credited = credit_payouts(&payouts, &mut wallets);
        assert_eq!(credited, payouts[0].amount);
        assert_eq!(wallets[&UserId::new("a")].diamonds(), 900 + credited);
    }
}
