//! Player - Raw squad configuration

use crate::types::Build;
use serde::{Deserialize, Serialize};

/// Player configuration a squad is derived from
///
/// A new instance is created for every candidate build a search evaluates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub power: u32,
    pub precision: u32,
    pub evasion: u32,
    pub hull: u32,
    /// Unallocated stat points
    #[serde(default)]
    pub available_points: u32,
    pub weapon_damage: f64,
    pub shield_defense: f64,
    pub clone_count: u32,
    #[serde(default)]
    pub vip_status: bool,
    #[serde(default)]
    pub weapon_element1: Option<String>,
    #[serde(default)]
    pub weapon_element2: Option<String>,
    #[serde(default)]
    pub shield_element1: Option<String>,
    #[serde(default)]
    pub shield_element2: Option<String>,
    /// Reputation yield bonus as a fraction (0.1 = +10%)
    #[serde(default)]
    pub reputation: f64,
}

impl Player {
    /// Create a player with no elements, no spare points and no VIP status
    pub fn new(
        build: Build,
        weapon_damage: f64,
        shield_defense: f64,
        clone_count: u32,
    ) -> Self {
        Player {
            power: build.power(),
            precision: build.precision(),
            evasion: build.evasion(),
            hull: build.hull(),
            available_points: 0,
            weapon_damage,
            shield_defense,
            clone_count,
            vip_status: false,
            weapon_element1: None,
            weapon_element2: None,
            shield_element1: None,
            shield_element2: None,
            reputation: 0.0,
        }
    }

    pub fn with_available_points(mut self, points: u32) -> Self {
        self.available_points = points;
        self
    }

    pub fn with_vip(mut self, vip_status: bool) -> Self {
        self.vip_status = vip_status;
        self
    }

    pub fn with_weapon_elements(mut self, first: Option<&str>, second: Option<&str>) -> Self {
        self.weapon_element1 = first.map(str::to_string);
        self.weapon_element2 = second.map(str::to_string);
        self
    }

    pub fn with_shield_elements(mut self, first: Option<&str>, second: Option<&str>) -> Self {
        self.shield_element1 = first.map(str::to_string);
        self.shield_element2 = second.map(str::to_string);
        self
    }

    /// Currently allocated stats
    pub fn build(&self) -> Build {
        Build::new(self.power, self.precision, self.evasion, self.hull)
    }

    /// Allocated plus unallocated points
    pub fn total_points(&self) -> u32 {
        self.build().total() + self.available_points
    }

    /// Copy of this player with a different allocation, equipment unchanged
    pub fn with_build(&self, build: Build) -> Self {
        Player {
            power: build.power(),
            precision: build.precision(),
            evasion: build.evasion(),
            hull: build.hull(),
            ..self.clone()
        }
    }
}
