//! Yield calculation - credits and experience per hour/day

use crate::combatant::{Mob, Player};
use crate::config::CombatConstants;
use serde::{Deserialize, Serialize};

/// Time span a yield is reported over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldPeriod {
    Hourly,
    Daily,
}

impl YieldPeriod {
    /// Parse "hourly" / "daily"; anything else is `None`
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "hourly" => Some(YieldPeriod::Hourly),
            "daily" => Some(YieldPeriod::Daily),
            _ => None,
        }
    }
}

/// Hourly and daily credits for one win chance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueReport {
    pub hourly: f64,
    pub daily: f64,
}

/// Per-fight rewards of a mob, cached once per battle
#[derive(Debug, Clone, PartialEq)]
pub struct YieldCalculator {
    credits_base: f64,
    exp_base: f64,
    fights_per_hour: f64,
    fights_per_day: f64,
}

impl YieldCalculator {
    pub fn new(player: &Player, mob: &Mob, constants: &CombatConstants) -> Self {
        let vip = if player.vip_status {
            constants.vip_multiplier
        } else {
            1.0
        };
        let level = mob.level as f64;

        YieldCalculator {
            credits_base: constants.credits_base * (1.0 + 0.1 * level) * vip,
            exp_base: ((constants.exp_base + (0.1 * level).floor()) * vip).floor(),
            fights_per_hour: constants.fights_per_hour(),
            fights_per_day: constants.fights_per_day(),
        }
    }

    /// Credits per won fight before boosts
    pub fn credits_base(&self) -> f64 {
        self.credits_base
    }

    /// Experience per won fight before reputation
    pub fn exp_base(&self) -> f64 {
        self.exp_base
    }

    fn fights(&self, period: YieldPeriod) -> f64 {
        match period {
            YieldPeriod::Hourly => self.fights_per_hour,
            YieldPeriod::Daily => self.fights_per_day,
        }
    }

    /// Credits earned over `period` at the given win chance
    pub fn revenue(&self, period: YieldPeriod, win_chance: f64, income_boost: f64, reputation: f64) -> f64 {
        self.credits_base * (1.0 + income_boost + reputation) * self.fights(period) * win_chance
    }

    /// Experience earned over `period`; per-fight experience is floored
    /// after the reputation bonus
    pub fn experience(&self, period: YieldPeriod, win_chance: f64, reputation: f64) -> f64 {
        let per_fight = (self.exp_base * (1.0 + reputation)).floor();
        per_fight * self.fights(period) * win_chance
    }

    /// String-keyed [`revenue`](Self::revenue); unknown kinds yield 0
    pub fn revenue_for(&self, kind: &str, win_chance: f64, income_boost: f64, reputation: f64) -> f64 {
        YieldPeriod::parse(kind)
            .map_or(0.0, |period| self.revenue(period, win_chance, income_boost, reputation))
    }

    /// String-keyed [`experience`](Self::experience); unknown kinds yield 0
    pub fn experience_for(&self, kind: &str, win_chance: f64, reputation: f64) -> f64 {
        YieldPeriod::parse(kind).map_or(0.0, |period| self.experience(period, win_chance, reputation))
    }

    /// Hourly and daily credits without boosts
    pub fn revenue_report(&self, win_chance: f64) -> RevenueReport {
        RevenueReport {
            hourly: self.revenue(YieldPeriod::Hourly, win_chance, 0.0, 0.0),
            daily: self.revenue(YieldPeriod::Daily, win_chance, 0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Build;

    fn calculator(level: u32, vip: bool) -> YieldCalculator {
        let player = Player::new(Build::new(1, 1, 1, 1), 1.0, 1.0, 1).with_vip(vip);
        let mob = Mob::new(100.0, 1.0, 1.0, 1.0, level);
        YieldCalculator::new(&player, &mob, &CombatConstants::default())
    }

    #[test]
    fn test_credits_base() {
        // 300 * (1 + 1.0)
        assert!((calculator(10, false).credits_base() - 600.0).abs() < 1e-9);
        // 300 * 2 * 1.1
        assert!((calculator(10, true).credits_base() - 660.0).abs() < 1e-9);
    }

    #[test]
    fn test_exp_base_is_floored() {
        // 20 + floor(1.5) = 21
        assert_eq!(calculator(15, false).exp_base(), 21.0);
        // floor(21 * 1.1) = 23
        assert_eq!(calculator(15, true).exp_base(), 23.0);
    }

    #[test]
    fn test_hourly_and_daily_revenue() {
        let calc = calculator(10, false);
        let hourly = calc.revenue(YieldPeriod::Hourly, 0.5, 0.0, 0.0);
        let daily = calc.revenue(YieldPeriod::Daily, 0.5, 0.0, 0.0);

        assert!((hourly - 600.0 * 600.0 * 0.5).abs() < 1e-6);
        assert!((daily - 600.0 * 14400.0 * 0.5).abs() < 1e-6);
        assert!((daily / hourly - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_boosts_are_additive() {
        let calc = calculator(0, false);
        let boosted = calc.revenue(YieldPeriod::Hourly, 1.0, 0.2, 0.1);
        assert!((boosted - 300.0 * 1.3 * 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_experience_with_reputation() {
        let calc = calculator(10, false);
        // exp_base 21, floor(21 * 1.25) = 26
        let hourly = calc.experience(YieldPeriod::Hourly, 1.0, 0.25);
        assert!((hourly - 26.0 * 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_kind_yields_zero() {
        let calc = calculator(10, false);
        assert_eq!(calc.revenue_for("weekly", 1.0, 0.0, 0.0), 0.0);
        assert_eq!(calc.experience_for("", 1.0, 0.0), 0.0);
        assert!(calc.revenue_for("daily", 1.0, 0.0, 0.0) > 0.0);
    }

    #[test]
    fn test_revenue_report() {
        let report = calculator(10, false).revenue_report(1.0);
        assert!((report.daily - report.hourly * 24.0).abs() < 1e-6);
    }
}
