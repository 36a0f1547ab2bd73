//! Scenario loading - One player against one mob, with search settings

use super::{CombatConstants, ConfigError};
use crate::combatant::{CloneModifier, Mob, Player};
use crate::optimizer::{Optimizer, OptimizerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete description of a fight to simulate or optimize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub player: Player,
    pub mob: Mob,
    /// Per-clone modifiers, applied in order
    #[serde(default)]
    pub modifiers: Vec<CloneModifier>,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub constants: CombatConstants,
}

impl Scenario {
    /// Reject inputs the combat engine cannot simulate meaningfully
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.clone_count == 0 {
            return Err(ConfigError::ValidationError(
                "player.clone_count must be at least 1".to_string(),
            ));
        }
        if !(self.mob.max_hp.is_finite() && self.mob.max_hp > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "mob.max_hp must be positive, got {}",
                self.mob.max_hp
            )));
        }
        if self.player.weapon_damage < 0.0 || self.player.shield_defense < 0.0 || self.mob.damage < 0.0 {
            return Err(ConfigError::ValidationError(
                "damage and defense values must not be negative".to_string(),
            ));
        }
        if self.constants.hp_per_hull <= 0.0 || self.constants.damage_per_power <= 0.0 {
            return Err(ConfigError::ValidationError(
                "hp_per_hull and damage_per_power must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Optimizer over this scenario's player, mob and settings
    pub fn optimizer(&self) -> Optimizer {
        Optimizer::new(self.player.clone(), self.mob.clone())
            .with_modifiers(self.modifiers.clone())
            .with_constants(self.constants.clone())
            .with_config(self.optimizer.clone())
    }
}

/// Load and validate a scenario from a TOML file
pub fn load_scenario(path: &Path) -> Result<Scenario, ConfigError> {
    let scenario: Scenario = super::load_toml(path)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Load and validate a scenario from a TOML string
pub fn parse_scenario(content: &str) -> Result<Scenario, ConfigError> {
    let scenario: Scenario = super::parse_toml(content)?;
    scenario.validate()?;
    Ok(scenario)
}
