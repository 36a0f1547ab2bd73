//! Build optimizer - Searches stat-point allocations for the best yield
//!
//! Every candidate build is scored by constructing a fresh [`Battle`],
//! estimating its win chance with repeated fights and converting that into
//! hourly credits or experience.
//!
//! Two strategies are provided:
//! - Exhaustive: back-derive power and hull from hits-to-kill/hits-to-die
//!   targets and sweep the remaining points across precision and evasion
//! - Evolutionary: genetic search with simulated-annealing acceptance and
//!   a tabu list, for spending unallocated points on top of a fixed build

mod config;
mod distribute;
mod exhaustive;
mod metaheuristic;
mod tabu;

pub use config::OptimizerConfig;
pub use distribute::{distribute_points, DEFAULT_RATIO, DEFAULT_TOLERANCE};
pub use exhaustive::{ExhaustiveResult, SweepResult, HITS_TO_DIE_RANGE, HITS_TO_KILL_RANGE};
pub use metaheuristic::GenerationProgress;
pub use tabu::TabuList;

use crate::combat::{repeated_fights_with_rng, Battle, YieldPeriod};
use crate::combatant::{CloneModifier, Mob, Player};
use crate::config::CombatConstants;
use crate::types::Build;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Search error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Invalid target {0}")]
    InvalidTarget(String),
    #[error("Search cancelled after generation {generation} of {total}")]
    Cancelled { generation: usize, total: usize },
}

/// Which yield a search maximizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldTarget {
    Credits,
    Exp,
}

impl FromStr for YieldTarget {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credits" => Ok(YieldTarget::Credits),
            "exp" => Ok(YieldTarget::Exp),
            other => Err(SearchError::InvalidTarget(other.to_string())),
        }
    }
}

impl fmt::Display for YieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YieldTarget::Credits => write!(f, "credits"),
            YieldTarget::Exp => write!(f, "exp"),
        }
    }
}

/// Bonuses applied when turning a win chance into yields
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YieldBonus {
    /// Credits income boost as a fraction
    pub income_boost: f64,
    /// Reputation bonus on credits
    pub credits_reputation: f64,
    /// Reputation bonus on experience
    pub exp_reputation: f64,
}

impl YieldBonus {
    /// Same reputation for credits and experience
    pub fn new(income_boost: f64, reputation: f64) -> Self {
        YieldBonus {
            income_boost,
            credits_reputation: reputation,
            exp_reputation: reputation,
        }
    }
}

/// All yields of one evaluated build
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub credits_hourly: f64,
    pub credits_daily: f64,
    pub exp_hourly: f64,
    pub exp_daily: f64,
}

impl Resource {
    pub fn from_battle(battle: &Battle, win_chance: f64, bonus: YieldBonus) -> Self {
        let credits = |period| battle.revenue(period, win_chance, bonus.income_boost, bonus.credits_reputation);
        let exp = |period| battle.experience(period, win_chance, bonus.exp_reputation);
        Resource {
            credits_hourly: credits(YieldPeriod::Hourly),
            credits_daily: credits(YieldPeriod::Daily),
            exp_hourly: exp(YieldPeriod::Hourly),
            exp_daily: exp(YieldPeriod::Daily),
        }
    }

    /// Hourly yield a search maximizes
    pub fn fitness(&self, target: YieldTarget) -> f64 {
        match target {
            YieldTarget::Credits => self.credits_hourly,
            YieldTarget::Exp => self.exp_hourly,
        }
    }
}

/// A scored candidate build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildEvaluation {
    pub build: Build,
    pub win_chance: f64,
    pub resource: Resource,
    pub fitness: f64,
}

/// Stat-point optimizer for one player against one mob
#[derive(Debug, Clone)]
pub struct Optimizer {
    player: Player,
    mob: Mob,
    modifiers: Vec<CloneModifier>,
    constants: CombatConstants,
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(player: Player, mob: Mob) -> Self {
        Optimizer {
            player,
            mob,
            modifiers: Vec::new(),
            constants: CombatConstants::default(),
            config: OptimizerConfig::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<CloneModifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_constants(mut self, constants: CombatConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn mob(&self) -> &Mob {
        &self.mob
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Reputation used for yields
    pub fn reputation(&self) -> f64 {
        self.config.reputation.unwrap_or(self.player.reputation)
    }

    /// Bonuses of the evolutionary search and single evaluations:
    /// configured income boost, reputation on both yields
    pub fn search_bonus(&self) -> YieldBonus {
        YieldBonus::new(self.config.income_boost, self.reputation())
    }

    /// Bonuses of the hit-policy searches: unboosted credits, player
    /// reputation on experience only
    pub fn policy_bonus(&self) -> YieldBonus {
        YieldBonus {
            exp_reputation: self.player.reputation,
            ..YieldBonus::default()
        }
    }

    /// RNG for one search invocation: seeded when configured
    fn search_rng(&self) -> ChaCha8Rng {
        match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::thread_rng().gen()),
        }
    }

    /// Fresh battle for a candidate build
    pub fn battle_for(&self, build: Build) -> Battle {
        Battle::with_constants(
            self.player.with_build(build),
            self.mob.clone(),
            &self.modifiers,
            self.constants.clone(),
        )
    }

    /// Score a single build
    pub fn evaluate(&self, build: Build, target: YieldTarget) -> BuildEvaluation {
        let mut rng = self.search_rng();
        self.evaluate_with_rng(build, target, &mut rng)
    }

    /// Score a build with a provided RNG
    pub fn evaluate_with_rng(&self, build: Build, target: YieldTarget, rng: &mut impl Rng) -> BuildEvaluation {
        self.evaluate_with_bonus(build, target, self.search_bonus(), rng)
    }

    fn evaluate_with_bonus(
        &self,
        build: Build,
        target: YieldTarget,
        bonus: YieldBonus,
        rng: &mut impl Rng,
    ) -> BuildEvaluation {
        let mut battle = self.battle_for(build);
        let win_chance = repeated_fights_with_rng(&mut battle, self.config.n_fights, rng);
        let resource = Resource::from_battle(&battle, win_chance, bonus);
        let fitness = resource.fitness(target);

        debug!(build = %build, win_chance, fitness, "evaluated build");

        BuildEvaluation {
            build,
            win_chance,
            resource,
            fitness,
        }
    }

    fn evaluate_seeded(&self, build: Build, target: YieldTarget, bonus: YieldBonus, seed: u64) -> BuildEvaluation {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.evaluate_with_bonus(build, target, bonus, &mut rng)
    }

    /// Score independent builds, in input order
    ///
    /// One seed per build is drawn from `rng` before any evaluation runs, so
    /// the results do not depend on whether the pool is used.
    fn evaluate_all(
        &self,
        builds: &[Build],
        target: YieldTarget,
        bonus: YieldBonus,
        rng: &mut impl Rng,
    ) -> Vec<BuildEvaluation> {
        let jobs: Vec<(Build, u64)> = builds.iter().map(|&build| (build, rng.gen())).collect();

        if self.config.parallel {
            jobs.into_par_iter()
                .map(|(build, seed)| self.evaluate_seeded(build, target, bonus, seed))
                .collect()
        } else {
            jobs.into_iter()
                .map(|(build, seed)| self.evaluate_seeded(build, target, bonus, seed))
                .collect()
        }
    }

    /// Every way to split `n_points` near the default 1:4:4:3 ratio
    pub fn distribute_points(&self, n_points: u32) -> Vec<Vec<u32>> {
        distribute_points(n_points, &DEFAULT_RATIO, DEFAULT_TOLERANCE)
    }
}
