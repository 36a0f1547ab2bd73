//! Combat and economy constants

use serde::{Deserialize, Serialize};

/// Tunable combat constants
///
/// The defaults reproduce the modeled game rules; every field can be
/// overridden from a `[constants]` table in a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Rounds after which an unfinished fight is resolved as a mob win
    #[serde(default = "default_round_limit")]
    pub round_limit: u32,
    /// Damage bonus per equipment element matching a mob weakness
    #[serde(default = "default_elemental_bonus")]
    pub elemental_bonus: f64,
    /// Clone HP gained per hull point
    #[serde(default = "default_points_scale")]
    pub hp_per_hull: f64,
    /// Clone damage gained per power point
    #[serde(default = "default_points_scale")]
    pub damage_per_power: f64,
    /// Critical chance of an unmodified clone (0.0 - 1.0)
    #[serde(default)]
    pub base_crit_chance: f64,
    /// Bonus damage fraction of a critical hit (0.5 = +50%)
    #[serde(default = "default_crit_damage")]
    pub base_crit_damage: f64,
    /// Dual shot chance of an unmodified clone (0.0 - 1.0)
    #[serde(default)]
    pub base_dual_shot_chance: f64,
    /// Fights completed per minute, used to scale yields
    #[serde(default = "default_fights_per_minute")]
    pub fights_per_minute: f64,
    /// Credits per fight before level and VIP scaling
    #[serde(default = "default_credits_base")]
    pub credits_base: f64,
    /// Experience per fight before level and VIP scaling
    #[serde(default = "default_exp_base")]
    pub exp_base: f64,
    /// Yield multiplier for VIP players
    #[serde(default = "default_vip_multiplier")]
    pub vip_multiplier: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            round_limit: default_round_limit(),
            elemental_bonus: default_elemental_bonus(),
            hp_per_hull: default_points_scale(),
            damage_per_power: default_points_scale(),
            base_crit_chance: 0.0,
            base_crit_damage: default_crit_damage(),
            base_dual_shot_chance: 0.0,
            fights_per_minute: default_fights_per_minute(),
            credits_base: default_credits_base(),
            exp_base: default_exp_base(),
            vip_multiplier: default_vip_multiplier(),
        }
    }
}

impl CombatConstants {
    /// Fights completed in one hour
    pub fn fights_per_hour(&self) -> f64 {
        self.fights_per_minute * 60.0
    }

    /// Fights completed in one day
    pub fn fights_per_day(&self) -> f64 {
        self.fights_per_hour() * 24.0
    }
}

fn default_round_limit() -> u32 {
    500
}
fn default_elemental_bonus() -> f64 {
    0.15
}
fn default_points_scale() -> f64 {
    7.0
}
fn default_crit_damage() -> f64 {
    0.5
}
fn default_fights_per_minute() -> f64 {
    10.0
}
fn default_credits_base() -> f64 {
    300.0
}
fn default_exp_base() -> f64 {
    20.0
}
fn default_vip_multiplier() -> f64 {
    1.1
}

/// Get the bundled default constants
pub fn default_constants() -> CombatConstants {
    let toml = include_str!("../../config/constants.toml");
    super::parse_toml(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = CombatConstants::default();
        assert_eq!(constants.round_limit, 500);
        assert!((constants.elemental_bonus - 0.15).abs() < f64::EPSILON);
        assert!((constants.fights_per_hour() - 600.0).abs() < f64::EPSILON);
        assert!((constants.fights_per_day() - 14400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bundled_file_matches_defaults() {
        assert_eq!(default_constants(), CombatConstants::default());
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
round_limit = 50
base_crit_chance = 0.25
"#;

        let constants: CombatConstants = toml::from_str(toml).unwrap();
        assert_eq!(constants.round_limit, 50);
        assert!((constants.base_crit_chance - 0.25).abs() < f64::EPSILON);
        assert!((constants.hp_per_hull - 7.0).abs() < f64::EPSILON);
        assert!((constants.vip_multiplier - 1.1).abs() < f64::EPSILON);
    }
}
