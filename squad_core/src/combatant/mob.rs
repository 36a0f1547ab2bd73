//! Mob - The single hostile target

use super::Combatant;
use serde::{Deserialize, Serialize};

const MOB_NAME: &str = "Mob";

/// Hostile entity fought by the squad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mob {
    pub max_hp: f64,
    pub precision: f64,
    pub evasion: f64,
    pub damage: f64,
    pub level: u32,
    /// Elemental tags this mob takes bonus damage from
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(skip)]
    current_hp: f64,
    #[serde(skip)]
    hit_counter: u32,
}

impl Mob {
    /// Create a mob at full HP with no weaknesses
    pub fn new(max_hp: f64, precision: f64, evasion: f64, damage: f64, level: u32) -> Self {
        Mob {
            max_hp,
            precision,
            evasion,
            damage,
            level,
            weaknesses: Vec::new(),
            current_hp: max_hp,
            hit_counter: 0,
        }
    }

    /// Add elemental weaknesses
    pub fn with_weaknesses<I, S>(mut self, weaknesses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weaknesses.extend(weaknesses.into_iter().map(Into::into));
        self
    }

    /// Whether the given element is one of this mob's weaknesses
    pub fn is_weak_to(&self, element: &str) -> bool {
        self.weaknesses.iter().any(|w| w == element)
    }
}

impl Combatant for Mob {
    fn name(&self) -> &str {
        MOB_NAME
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
