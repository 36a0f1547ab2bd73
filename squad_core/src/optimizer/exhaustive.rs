//! Exhaustive search - Sweep precision/evasion splits under hit policies
//!
//! A policy fixes how many mob hits a clone should survive (hits-to-die)
//! and how many squad volleys should kill the mob (hits-to-kill). Hull and
//! power are back-derived from those targets; whatever points remain are
//! swept linearly from all-evasion to all-precision.

use super::{BuildEvaluation, Optimizer, YieldTarget};
use crate::combatant::total_damage_modifier;
use crate::types::Build;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, info};

/// Hits-to-kill values tried by [`Optimizer::iterate_through_builds`]
pub const HITS_TO_KILL_RANGE: RangeInclusive<u32> = 4..=10;

/// Hits-to-die values tried by [`Optimizer::iterate_through_builds`]
pub const HITS_TO_DIE_RANGE: RangeInclusive<u32> = 3..=6;

/// Best split for one hit policy
///
/// An infeasible policy reports the zero build with zero yield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExhaustiveResult {
    pub build: Build,
    pub best_yield: f64,
    pub win_chance: f64,
}

impl ExhaustiveResult {
    /// Zero yield means no feasible build beat nothing
    pub fn is_infeasible(&self) -> bool {
        self.best_yield <= 0.0
    }
}

/// Best split across every hit policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub build: Build,
    pub best_yield: f64,
    pub win_chance: f64,
    pub hits_to_kill: u32,
    pub hits_to_die: u32,
}

impl Optimizer {
    fn damage_multiplier(&self) -> f64 {
        1.0 + total_damage_modifier(&self.player, &self.mob, self.constants.elemental_bonus)
    }

    /// Hull points for a clone to survive `hits_to_die - 1` mob hits
    pub fn required_hull(&self, hits_to_die: u32) -> u32 {
        let total_hp = (hits_to_die as f64 - 1.0) * self.mob.damage + 1.0;
        let remaining = (total_hp - self.player.shield_defense).max(0.0);
        (remaining / self.constants.hp_per_hull).ceil() as u32
    }

    /// Power points for the squad to kill the mob in `hits_to_kill` volleys
    pub fn required_power(&self, hits_to_kill: u32) -> u32 {
        let clones = self.player.clone_count as f64;
        let multiplier = self.damage_multiplier();
        let total_attack = self.mob.max_hp / hits_to_kill as f64 + 1.0;
        let squad_damage = clones * self.player.weapon_damage * multiplier;

        ((total_attack - squad_damage) / (self.constants.damage_per_power * clones * multiplier))
            .max(0.0)
            .ceil() as u32
    }

    /// Candidate builds for a policy, or `None` when the point pool is too small
    fn policy_builds(&self, hits_to_die: u32, hits_to_kill: u32) -> Option<Vec<Build>> {
        let power = self.required_power(hits_to_kill);
        let hull = self.required_hull(hits_to_die);
        let available = self.player.total_points() as i64 - power as i64 - hull as i64;

        if available < 0 {
            debug!(hits_to_die, hits_to_kill, power, hull, "policy needs more points than available");
            return None;
        }

        let available = available as u32;
        Some(
            (0..=available)
                .map(|precision| Build::new(power, precision, available - precision, hull))
                .collect(),
        )
    }

    /// Best precision/evasion split for one hit policy
    pub fn find_best_build(&self, hits_to_die: u32, hits_to_kill: u32, target: YieldTarget) -> ExhaustiveResult {
        let mut rng = self.search_rng();
        self.find_best_build_with_rng(hits_to_die, hits_to_kill, target, &mut rng)
    }

    /// [`find_best_build`](Self::find_best_build) with a provided RNG
    pub fn find_best_build_with_rng(
        &self,
        hits_to_die: u32,
        hits_to_kill: u32,
        target: YieldTarget,
        rng: &mut impl Rng,
    ) -> ExhaustiveResult {
        let mut best = ExhaustiveResult::default();
        let Some(builds) = self.policy_builds(hits_to_die, hits_to_kill) else {
            return best;
        };

        for evaluation in self.evaluate_all(&builds, target, self.policy_bonus(), rng) {
            if evaluation.fitness > best.best_yield {
                best = ExhaustiveResult {
                    build: evaluation.build,
                    best_yield: evaluation.fitness,
                    win_chance: evaluation.win_chance,
                };
            }
        }

        debug!(
            hits_to_die,
            hits_to_kill,
            build = %best.build,
            best_yield = best.best_yield,
            "policy searched"
        );
        best
    }

    /// Try every hit policy and keep the overall best build
    pub fn iterate_through_builds(&self, target: YieldTarget) -> SweepResult {
        let mut rng = self.search_rng();
        self.iterate_through_builds_with_rng(target, &mut rng)
    }

    /// [`iterate_through_builds`](Self::iterate_through_builds) with a provided RNG
    pub fn iterate_through_builds_with_rng(&self, target: YieldTarget, rng: &mut impl Rng) -> SweepResult {
        let mut best = SweepResult::default();

        for hits_to_kill in HITS_TO_KILL_RANGE {
            for hits_to_die in HITS_TO_DIE_RANGE {
                let result = self.find_best_build_with_rng(hits_to_die, hits_to_kill, target, rng);
                if result.best_yield > best.best_yield {
                    best = SweepResult {
                        build: result.build,
                        best_yield: result.best_yield,
                        win_chance: result.win_chance,
                        hits_to_kill,
                        hits_to_die,
                    };
                }
            }
        }

        info!(
            %target,
            build = %best.build,
            best_yield = best.best_yield,
            hits_to_kill = best.hits_to_kill,
            hits_to_die = best.hits_to_die,
            "policy sweep finished"
        );
        best
    }

    /// Split with the highest win chance under the squad-size default policy
    ///
    /// Squads under five clones aim for 5 hits-to-die / 7 hits-to-kill,
    /// larger squads for 4 / 8. Returns `None` when no split is feasible.
    pub fn max_win_build(&self) -> Option<BuildEvaluation> {
        let mut rng = self.search_rng();
        self.max_win_build_with_rng(&mut rng)
    }

    /// [`max_win_build`](Self::max_win_build) with a provided RNG
    pub fn max_win_build_with_rng(&self, rng: &mut impl Rng) -> Option<BuildEvaluation> {
        let (hits_to_die, hits_to_kill) = if self.player.clone_count < 5 { (5, 7) } else { (4, 8) };
        let builds = self.policy_builds(hits_to_die, hits_to_kill)?;

        self.evaluate_all(&builds, YieldTarget::Credits, self.policy_bonus(), rng)
            .into_iter()
            .fold(None, |best: Option<BuildEvaluation>, evaluation| match best {
                Some(b) if b.win_chance >= evaluation.win_chance => Some(b),
                _ => Some(evaluation),
            })
    }
}
