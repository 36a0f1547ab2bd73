//! Evolutionary search - Spend unallocated points on top of a fixed build
//!
//! Candidates are produced by single-point crossover and point-moving
//! mutation, normalized back onto the point budget, filtered through a
//! [`TabuList`] and scored in parallel. The running best is replaced by
//! simulated-annealing acceptance, so it may move to a worse build while
//! the temperature is still high.

use super::{BuildEvaluation, Optimizer, SearchError, TabuList, YieldTarget};
use crate::types::Build;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Consecutive tabu hits per population slot before repeats are admitted
const TABU_GUARD_FACTOR: usize = 50;

/// Snapshot passed to the progress callback after each generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationProgress {
    /// 1-based index of the completed generation
    pub generation: usize,
    pub total_generations: usize,
    pub best_fitness: f64,
    pub best_win_chance: f64,
    pub tabu_len: usize,
}

/// Raise every category to its base, then add or remove random points
/// until the build spends exactly `total` points.
///
/// `base.total()` must not exceed `total`.
fn normalize(build: Build, base: Build, total: u32, rng: &mut impl Rng) -> Build {
    let mut parts = build.0;
    for (part, floor) in parts.iter_mut().zip(base.0) {
        *part = (*part).max(floor);
    }

    let mut diff = total as i64 - parts.iter().map(|&p| p as i64).sum::<i64>();
    while diff != 0 {
        let idx = rng.gen_range(0..4);
        if diff > 0 {
            parts[idx] += 1;
            diff -= 1;
        } else if parts[idx] > base.0[idx] {
            parts[idx] -= 1;
            diff += 1;
        }
    }

    Build(parts)
}

/// Even split of the spare points, remainder going to power, precision, evasion
fn initial_solution(base: Build, available: u32, rng: &mut impl Rng) -> Build {
    let share = available / 4;
    let remainder = available % 4;
    let build = Build::new(
        base.power() + share + u32::from(remainder > 0),
        base.precision() + share + u32::from(remainder > 1),
        base.evasion() + share + u32::from(remainder > 2),
        base.hull() + share,
    );
    normalize(build, base, base.total() + available, rng)
}

impl Optimizer {
    /// Evolve a build for the player's unallocated points
    pub fn optimize(&self, target: YieldTarget) -> Result<BuildEvaluation, SearchError> {
        self.optimize_with_progress(target, |_| Ok(()))
    }

    /// [`optimize`](Self::optimize) reporting every generation
    ///
    /// Returning an error from `progress` stops the search and propagates it.
    pub fn optimize_with_progress<F>(&self, target: YieldTarget, progress: F) -> Result<BuildEvaluation, SearchError>
    where
        F: FnMut(&GenerationProgress) -> Result<(), SearchError>,
    {
        let mut rng = self.search_rng();
        self.optimize_with_rng(target, &mut rng, progress)
    }

    /// [`optimize_with_progress`](Self::optimize_with_progress) with a provided RNG
    pub fn optimize_with_rng<F>(
        &self,
        target: YieldTarget,
        rng: &mut impl Rng,
        mut progress: F,
    ) -> Result<BuildEvaluation, SearchError>
    where
        F: FnMut(&GenerationProgress) -> Result<(), SearchError>,
    {
        let base = self.player.build();
        let available = self.player.available_points;

        if available == 0 {
            let evaluation = self.evaluate_with_rng(base, target, rng);
            info!(%target, build = %base, fitness = evaluation.fitness, "no spare points, evaluated base build");
            return Ok(evaluation);
        }

        let total = base.total() + available;
        let config = &self.config;
        let population_size = config.population_size.max(1);
        let guard_limit = population_size * TABU_GUARD_FACTOR;
        let mut tabu = TabuList::new(config.max_tabu_size);

        let initial: Vec<Build> = (0..population_size)
            .map(|_| {
                let mut parts = initial_solution(base, available, rng).0;
                for _ in 0..available {
                    let from = rng.gen_range(0..4);
                    let to = rng.gen_range(0..4);
                    if from != to && parts[from] > base.0[from] {
                        parts[from] -= 1;
                        parts[to] += 1;
                    }
                }
                normalize(Build(parts), base, total, rng)
            })
            .collect();

        let bonus = self.search_bonus();
        let mut population = self.evaluate_all(&initial, target, bonus, rng);
        let mut best = population[0];
        for evaluation in &population[1..] {
            if evaluation.fitness > best.fitness {
                best = *evaluation;
            }
        }

        let mut temperature = config.initial_temperature;

        for generation in 0..config.generations {
            let mut candidates = Vec::with_capacity(population_size);
            let mut consecutive_tabu = 0;
            let mut admit_repeats = false;

            while candidates.len() < population_size {
                let first = population[rng.gen_range(0..population.len())].build;
                let second = population[rng.gen_range(0..population.len())].build;

                let mut child = first.0;
                if rng.gen::<f64>() < config.crossover_rate {
                    let split = rng.gen_range(0..4);
                    child[split..].copy_from_slice(&second.0[split..]);
                }

                if rng.gen::<f64>() < config.mutation_rate {
                    let from = rng.gen_range(0..4);
                    let to = rng.gen_range(0..4);
                    if from != to && child[from] > base.0[from] {
                        if let Some(&jump) = config.mutation_jumps.choose(rng) {
                            let delta = jump.min(child[from] - base.0[from]);
                            child[from] -= delta;
                            child[to] += delta;
                        }
                    }
                }

                let child = normalize(Build(child), base, total, rng);

                if !admit_repeats && tabu.contains(&child) {
                    consecutive_tabu += 1;
                    if consecutive_tabu < guard_limit {
                        continue;
                    }
                    warn!(
                        generation = generation + 1,
                        tabu_len = tabu.len(),
                        "search space exhausted by tabu list, admitting repeated builds"
                    );
                    admit_repeats = true;
                }
                consecutive_tabu = 0;

                tabu.insert(child);
                candidates.push(child);
            }

            let evaluated = self.evaluate_all(&candidates, target, bonus, rng);
            for evaluation in &evaluated {
                if evaluation.fitness > best.fitness
                    || rng.gen::<f64>() < ((evaluation.fitness - best.fitness) / temperature).exp()
                {
                    best = *evaluation;
                }
            }

            population = evaluated;
            temperature *= config.cooling_rate;

            let report = GenerationProgress {
                generation: generation + 1,
                total_generations: config.generations,
                best_fitness: best.fitness,
                best_win_chance: best.win_chance,
                tabu_len: tabu.len(),
            };
            info!(
                generation = report.generation,
                total = report.total_generations,
                best = %best.build,
                fitness = best.fitness,
                win_chance = best.win_chance,
                "generation finished"
            );
            progress(&report)?;
        }

        info!(%target, build = %best.build, fitness = best.fitness, "evolutionary search finished");
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{Mob, Player};
    use crate::optimizer::OptimizerConfig;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn optimizer(available: u32, config: OptimizerConfig) -> Optimizer {
        let player = Player::new(Build::new(6, 10, 10, 26), 10.0, 20.0, 3).with_available_points(available);
        let mob = Mob::new(1000.0, 10.0, 5.0, 50.0, 10);
        Optimizer::new(player, mob).with_config(config)
    }

    fn small_config() -> OptimizerConfig {
        OptimizerConfig::default().with_fights(10).with_generations(5)
    }

    #[test]
    fn test_initial_solution_spreads_points() {
        let mut rng = StdRng::seed_from_u64(0);
        let base = Build::new(1, 2, 3, 4);
        assert_eq!(initial_solution(base, 7, &mut rng), Build::new(3, 4, 5, 5));
        assert_eq!(initial_solution(base, 8, &mut rng), Build::new(3, 4, 5, 6));
    }

    #[test]
    fn test_no_spare_points_evaluates_base() {
        let optimizer = optimizer(0, small_config());
        let mut calls = 0;
        let result = optimizer
            .optimize_with_rng(YieldTarget::Credits, &mut StdRng::seed_from_u64(1), |_| {
                calls += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(result.build, Build::new(6, 10, 10, 26));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_result_respects_budget() {
        let optimizer = optimizer(20, small_config());
        let result = optimizer
            .optimize_with_rng(YieldTarget::Credits, &mut StdRng::seed_from_u64(2), |_| Ok(()))
            .unwrap();

        assert_eq!(result.build.total(), 52 + 20);
        for (value, floor) in result.build.0.iter().zip([6, 10, 10, 26]) {
            assert!(*value >= floor);
        }
        assert!((0.0..=1.0).contains(&result.win_chance));
    }

    #[test]
    fn test_seeded_search_is_reproducible() {
        let config = small_config().with_seed(42);
        let a = optimizer(15, config.clone()).optimize(YieldTarget::Exp).unwrap();
        let b = optimizer(15, config.clone().with_parallel(false)).optimize(YieldTarget::Exp).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_progress_reports_every_generation() {
        let optimizer = optimizer(30, OptimizerConfig::default().with_fights(5).with_generations(30));
        let mut seen = Vec::new();
        optimizer
            .optimize_with_rng(YieldTarget::Credits, &mut StdRng::seed_from_u64(3), |report| {
                assert!(report.tabu_len <= 200);
                seen.push(report.generation);
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn test_tabu_size_is_bounded() {
        let config = OptimizerConfig {
            max_tabu_size: 15,
            ..small_config().with_generations(10)
        };
        let optimizer = optimizer(40, config);
        optimizer
            .optimize_with_rng(YieldTarget::Credits, &mut StdRng::seed_from_u64(4), |report| {
                assert!(report.tabu_len <= 15);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_cancellation_propagates() {
        let optimizer = optimizer(10, small_config());
        let mut calls = 0;
        let result = optimizer.optimize_with_rng(YieldTarget::Credits, &mut StdRng::seed_from_u64(5), |report| {
            calls += 1;
            if report.generation == 3 {
                return Err(SearchError::Cancelled {
                    generation: report.generation,
                    total: report.total_generations,
                });
            }
            Ok(())
        });

        assert_eq!(result, Err(SearchError::Cancelled { generation: 3, total: 5 }));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_tiny_search_space_terminates() {
        // one spare point leaves only four distinct builds for ten slots
        let optimizer = optimizer(1, small_config().with_generations(3));
        let result = optimizer
            .optimize_with_rng(YieldTarget::Credits, &mut StdRng::seed_from_u64(6), |_| Ok(()))
            .unwrap();
        assert_eq!(result.build.total(), 53);
    }

    proptest! {
        #[test]
        fn prop_normalize_meets_budget(
            build in proptest::array::uniform4(0u32..60),
            base in proptest::array::uniform4(0u32..30),
            available in 0u32..40,
            seed in any::<u64>(),
        ) {
            let base = Build(base);
            let total = base.total() + available;
            let mut rng = StdRng::seed_from_u64(seed);
            let normalized = normalize(Build(build), base, total, &mut rng);

            prop_assert_eq!(normalized.total(), total);
            for (value, floor) in normalized.0.iter().zip(base.0) {
                prop_assert!(*value >= floor);
            }
        }
    }
}
