//! squad_core - Clone squad combat simulation and stat-point optimization
//!
//! This library provides:
//! - Combatants: Player configuration, derived clone squad and the mob
//! - Battle: Round-based fight resolution with hit, crit and dual shot rolls
//! - Win-rate estimation: Monte-Carlo repeated fights
//! - Yields: Hourly and daily credits and experience from a win chance
//! - Optimizer: Exhaustive hit-policy search and an evolutionary search

pub mod combat;
pub mod combatant;
pub mod config;
pub mod optimizer;
pub mod prelude;
pub mod types;

// Re-export core types for convenience
pub use combat::{
    repeated_fights, repeated_fights_with_rng, Battle, BattleStatus, FightOutcome, WinRateEstimate, YieldPeriod,
};
pub use combatant::{CloneModifier, CloneSquad, CloneUnit, Combatant, Mob, Player};
pub use config::{default_constants, load_scenario, parse_scenario, CombatConstants, ConfigError, Scenario};
pub use optimizer::{BuildEvaluation, Optimizer, OptimizerConfig, Resource, SearchError, YieldBonus, YieldTarget};
pub use types::{Build, StatCategory};
