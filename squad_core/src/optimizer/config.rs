//! Search configuration

use crate::combat::DEFAULT_FIGHTS;
use serde::{Deserialize, Serialize};

/// Settings shared by the exhaustive and evolutionary searches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Fights simulated per candidate build
    pub n_fights: u32,
    /// Credits income boost as a fraction (0.1 = +10%)
    pub income_boost: f64,
    /// Reputation bonus; falls back to the player's reputation when unset
    pub reputation: Option<f64>,
    pub population_size: usize,
    pub generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    /// Most recent candidate builds remembered to avoid re-evaluation
    pub max_tabu_size: usize,
    pub initial_temperature: f64,
    /// Temperature multiplier applied after every generation
    pub cooling_rate: f64,
    /// Point amounts a mutation may move between categories
    pub mutation_jumps: Vec<u32>,
    /// Evaluate candidates of a generation on the rayon pool
    pub parallel: bool,
    /// Seed for reproducible searches; thread RNG when unset
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            n_fights: DEFAULT_FIGHTS,
            income_boost: 0.0,
            reputation: None,
            population_size: 10,
            generations: 100,
            crossover_rate: 0.7,
            mutation_rate: 0.2,
            max_tabu_size: 200,
            initial_temperature: 1.0,
            cooling_rate: 0.98,
            mutation_jumps: vec![1, 2, 5, 10],
            parallel: true,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    pub fn with_fights(mut self, n_fights: u32) -> Self {
        self.n_fights = n_fights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
