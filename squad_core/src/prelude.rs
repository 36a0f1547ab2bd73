//! Prelude module for convenient imports
//!
//! ```rust
//! use squad_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Build, StatCategory};

// Combatants
pub use crate::combatant::{CloneModifier, Combatant, Mob, Player};

// Combat
pub use crate::combat::{repeated_fights, Battle, BattleStatus, FightOutcome, YieldPeriod};

// Optimizer
pub use crate::optimizer::{BuildEvaluation, GenerationProgress, Optimizer, OptimizerConfig, SearchError, YieldTarget};

// Config
pub use crate::config::{load_scenario, CombatConstants, Scenario};
