//! CloneUnit - One squad member derived from player stats

use super::{Combatant, Player};
use crate::config::CombatConstants;
use serde::{Deserialize, Serialize};

/// Per-clone bonuses applied on top of the player-derived stats
///
/// Chances and crit damage are additive; the `*_increased` fields are
/// fractional multipliers (0.2 = +20%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneModifier {
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub dual_shot_chance: f64,
    pub hp_increased: f64,
    pub damage_increased: f64,
    pub precision_increased: f64,
    pub evasion_increased: f64,
}

impl CloneModifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_crit(mut self, chance: f64, damage: f64) -> Self {
        self.crit_chance = chance;
        self.crit_damage = damage;
        self
    }

    pub fn with_dual_shot(mut self, chance: f64) -> Self {
        self.dual_shot_chance = chance;
        self
    }

    pub fn with_hp_increased(mut self, increased: f64) -> Self {
        self.hp_increased = increased;
        self
    }

    pub fn with_damage_increased(mut self, increased: f64) -> Self {
        self.damage_increased = increased;
        self
    }
}

/// A squad member
#[derive(Debug, Clone, PartialEq)]
pub struct CloneUnit {
    pub name: String,
    pub max_hp: f64,
    pub damage: f64,
    pub evasion: f64,
    pub precision: f64,
    /// Chance for a landed hit to be critical (0.0 - 1.0)
    pub crit_chance: f64,
    /// Bonus damage fraction of a critical hit
    pub crit_damage: f64,
    /// Chance to follow up with an independent second attack (0.0 - 1.0)
    pub dual_shot_chance: f64,
    current_hp: f64,
    hit_counter: u32,
}

impl CloneUnit {
    /// Derive a clone from player stats
    ///
    /// HP = shield defense + hull points x `hp_per_hull`,
    /// damage = weapon damage + power points x `damage_per_power`.
    pub fn from_player(
        index: usize,
        player: &Player,
        modifier: Option<&CloneModifier>,
        constants: &CombatConstants,
    ) -> Self {
        let base_hp = player.shield_defense + player.hull as f64 * constants.hp_per_hull;
        let base_damage = player.weapon_damage + player.power as f64 * constants.damage_per_power;

        let mut clone = CloneUnit {
            name: format!("Clone {}", index + 1),
            max_hp: base_hp,
            damage: base_damage,
            evasion: player.evasion as f64,
            precision: player.precision as f64,
            crit_chance: constants.base_crit_chance,
            crit_damage: constants.base_crit_damage,
            dual_shot_chance: constants.base_dual_shot_chance,
            current_hp: base_hp,
            hit_counter: 0,
        };

        if let Some(m) = modifier {
            clone.apply_modifier(m);
        }
        clone
    }

    fn apply_modifier(&mut self, modifier: &CloneModifier) {
        self.max_hp *= 1.0 + modifier.hp_increased;
        self.damage *= 1.0 + modifier.damage_increased;
        self.precision *= 1.0 + modifier.precision_increased;
        self.evasion *= 1.0 + modifier.evasion_increased;
        self.crit_chance = (self.crit_chance + modifier.crit_chance).clamp(0.0, 1.0);
        self.crit_damage += modifier.crit_damage;
        self.dual_shot_chance = (self.dual_shot_chance + modifier.dual_shot_chance).clamp(0.0, 1.0);
        self.current_hp = self.max_hp;
    }
}

impl Combatant for CloneUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn precision(&self) -> f64 {
        self.precision
    }

    fn evasion(&self) -> f64 {
        self.evasion
    }

    fn damage(&self) -> f64 {
        self.damage
    }

    fn max_hp(&self) -> f64 {
        self.max_hp
    }

    fn current_hp(&self) -> f64 {
        self.current_hp
    }

    fn hit_counter(&self) -> u32 {
        self.hit_counter
    }

    fn take_damage(&mut self, amount: f64) {
        self.current_hp = (self.current_hp - amount).max(0.0);
    }

    fn register_hit(&mut self) {
        self.hit_counter += 1;
    }

    fn reset(&mut self) {
        self.current_hp = self.max_hp;
        self.hit_counter = 0;
    }
}
