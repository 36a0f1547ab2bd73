//! Win-rate estimation - repeated Monte-Carlo fights

use super::battle::Battle;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Trials per estimate used by the searches unless configured otherwise
pub const DEFAULT_FIGHTS: u32 = 5000;

/// z-score of a two-sided 95% interval
const Z_95: f64 = 1.96;

/// Outcome counts of a batch of fights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRateEstimate {
    pub wins: u32,
    pub trials: u32,
    /// Losses caused by the round limit, already counted as mob wins
    pub timeouts: u32,
}

impl WinRateEstimate {
    /// Fraction of trials the squad won (0 for an empty batch)
    pub fn win_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.wins as f64 / self.trials as f64
    }

    /// Standard error sqrt(p(1-p)/n)
    pub fn standard_error(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        let p = self.win_rate();
        (p * (1.0 - p) / self.trials as f64).sqrt()
    }

    /// Normal-approximation 95% confidence interval, clamped to [0, 1]
    pub fn confidence_interval_95(&self) -> (f64, f64) {
        let p = self.win_rate();
        let half = Z_95 * self.standard_error();
        ((p - half).max(0.0), (p + half).min(1.0))
    }
}

/// Fight `trials` times from the battle's start state with a provided RNG
pub fn estimate_win_rate_with_rng(battle: &mut Battle, trials: u32, rng: &mut impl Rng) -> WinRateEstimate {
    let mut estimate = WinRateEstimate {
        trials,
        ..Default::default()
    };

    battle.reset();
    for _ in 0..trials {
        let outcome = battle.fight_with_rng(rng);
        if outcome.clones_won() {
            estimate.wins += 1;
        } else if outcome.timed_out() {
            estimate.timeouts += 1;
        }
        battle.reset();
    }

    estimate
}

/// Empirical win fraction over `trials` fights with a provided RNG
pub fn repeated_fights_with_rng(battle: &mut Battle, trials: u32, rng: &mut impl Rng) -> f64 {
    estimate_win_rate_with_rng(battle, trials, rng).win_rate()
}

/// Empirical win fraction over `trials` fights using the thread RNG
pub fn repeated_fights(battle: &mut Battle, trials: u32) -> f64 {
    let mut rng = rand::thread_rng();
    repeated_fights_with_rng(battle, trials, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{Mob, Player};
    use crate::types::Build;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// One clone against a mob, each side one-shots the other.
    /// Mob lands 1/3 of attacks, clone lands 1/2, mob strikes first:
    /// P(win) = (2/3 * 1/2) / (1 - 2/3 * 1/2) = 0.5
    fn coin_flip_battle() -> Battle {
        let player = Player::new(Build::new(0, 10, 20, 0), 100.0, 10.0, 1);
        let mob = Mob::new(100.0, 10.0, 10.0, 50.0, 1);
        Battle::new(player, mob, &[])
    }

    #[test]
    fn test_estimate_counts() {
        let mut battle = coin_flip_battle();
        let mut rng = StdRng::seed_from_u64(42);
        let estimate = estimate_win_rate_with_rng(&mut battle, 1000, &mut rng);

        assert_eq!(estimate.trials, 1000);
        assert!(estimate.wins <= 1000);
        assert_eq!(estimate.timeouts, 0);
        // battle is left reset
        assert_eq!(battle.current_round(), 0);
    }

    #[test]
    fn test_estimate_near_analytic_value() {
        let mut battle = coin_flip_battle();
        let mut rng = StdRng::seed_from_u64(7);
        let estimate = estimate_win_rate_with_rng(&mut battle, 20_000, &mut rng);

        // five standard errors of 0.5 at n = 20000 is ~0.018
        assert!((estimate.win_rate() - 0.5).abs() < 0.02, "{}", estimate.win_rate());
    }

    #[test]
    fn test_zero_trials() {
        let mut battle = coin_flip_battle();
        let mut rng = StdRng::seed_from_u64(1);
        let estimate = estimate_win_rate_with_rng(&mut battle, 0, &mut rng);

        assert_eq!(estimate.win_rate(), 0.0);
        assert_eq!(estimate.standard_error(), 0.0);
    }

    #[test]
    fn test_same_seed_same_estimate() {
        let mut a = coin_flip_battle();
        let mut b = coin_flip_battle();
        let first = repeated_fights_with_rng(&mut a, 500, &mut StdRng::seed_from_u64(99));
        let second = repeated_fights_with_rng(&mut b, 500, &mut StdRng::seed_from_u64(99));
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_interval_narrows_with_more_trials() {
        let mut widths = Vec::new();
        for trials in [100, 1_000, 10_000, 100_000] {
            let mut battle = coin_flip_battle();
            let mut rng = StdRng::seed_from_u64(2024);
            let (low, high) = estimate_win_rate_with_rng(&mut battle, trials, &mut rng).confidence_interval_95();
            widths.push(high - low);
        }

        for pair in widths.windows(2) {
            assert!(pair[1] <= pair[0], "{:?}", widths);
        }
    }

    #[test]
    fn test_timeouts_are_losses() {
        let player = Player::new(Build::new(1, 0, 10, 1), 1.0, 10.0, 1);
        let mob = Mob::new(100.0, 0.0, 10.0, 10.0, 1);
        let mut battle = Battle::new(player, mob, &[]);
        let mut rng = StdRng::seed_from_u64(3);

        let estimate = estimate_win_rate_with_rng(&mut battle, 5, &mut rng);
        assert_eq!(estimate.wins, 0);
        assert_eq!(estimate.timeouts, 5);
    }
}
