//! Battle - Round-based fight between a clone squad and a mob

use super::result::{AttackResult, BattleStatus, FightOutcome};
use super::yields::{YieldCalculator, YieldPeriod};
use crate::combatant::{total_damage_modifier, CloneModifier, CloneSquad, Combatant, Mob, Player};
use crate::config::CombatConstants;
use rand::Rng;
use tracing::trace;

/// Offensive extras of an attacker that can crit (clones only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeBonus {
    pub crit_chance: f64,
    pub crit_damage: f64,
    /// Elemental damage modifier applied to every landed hit
    pub damage_modifier: f64,
}

/// Chance for an attack to land
pub fn hit_chance(precision: f64, evasion: f64) -> f64 {
    let total = precision + evasion;
    if total <= 0.0 {
        return 0.0;
    }
    precision / total
}

/// Resolve one attack roll with a provided RNG
///
/// Draws the hit roll, then (for a landed hit with a [`StrikeBonus`]) the
/// crit roll. A landed hit increments the attacker's hit counter and
/// subtracts damage from the target, flooring its HP at zero.
pub fn resolve_attack_with_rng<A, T>(
    attacker: &mut A,
    target: &mut T,
    bonus: Option<StrikeBonus>,
    rng: &mut impl Rng,
) -> AttackResult
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    let chance = hit_chance(attacker.precision(), target.evasion());
    if rng.gen::<f64>() >= chance {
        return AttackResult::Miss;
    }

    let mut damage = attacker.damage();
    let mut critical = false;
    if let Some(bonus) = bonus {
        if rng.gen::<f64>() < bonus.crit_chance {
            damage *= 1.0 + bonus.crit_damage;
            critical = true;
        }
        damage *= 1.0 + bonus.damage_modifier;
    }

    attacker.register_hit();
    target.take_damage(damage);
    AttackResult::Hit { damage, critical }
}

/// One squad-versus-mob encounter
///
/// Constructed once per candidate build, then fought and reset repeatedly.
#[derive(Debug, Clone)]
pub struct Battle {
    player: Player,
    squad: CloneSquad,
    mob: Mob,
    constants: CombatConstants,
    total_damage_modifier: f64,
    yields: YieldCalculator,
    current_round: u32,
    is_over: bool,
    /// Emit every attack through `tracing::trace!`
    pub verbose: bool,
}

impl Battle {
    /// Create a battle with the default combat constants
    pub fn new(player: Player, mob: Mob, modifiers: &[CloneModifier]) -> Self {
        Self::with_constants(player, mob, modifiers, CombatConstants::default())
    }

    pub fn with_constants(
        player: Player,
        mut mob: Mob,
        modifiers: &[CloneModifier],
        constants: CombatConstants,
    ) -> Self {
        let squad = CloneSquad::new(&player, modifiers, &constants);
        let total_damage_modifier = total_damage_modifier(&player, &mob, constants.elemental_bonus);
        let yields = YieldCalculator::new(&player, &mob, &constants);
        mob.reset();

        Battle {
            player,
            squad,
            mob,
            constants,
            total_damage_modifier,
            yields,
            current_round: 0,
            is_over: false,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn squad(&self) -> &CloneSquad {
        &self.squad
    }

    pub fn mob(&self) -> &Mob {
        &self.mob
    }

    pub fn constants(&self) -> &CombatConstants {
        &self.constants
    }

    /// Elemental bonus summed over matching equipment slots
    pub fn total_damage_modifier(&self) -> f64 {
        self.total_damage_modifier
    }

    pub fn yields(&self) -> &YieldCalculator {
        &self.yields
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn round_limit(&self) -> u32 {
        self.constants.round_limit
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Current state of the fight
    pub fn status(&self) -> BattleStatus {
        if self.current_round > self.constants.round_limit {
            BattleStatus::Timeout
        } else if !self.is_over {
            BattleStatus::InProgress
        } else if !self.mob.is_alive() {
            BattleStatus::CloneWon
        } else {
            BattleStatus::MobWon
        }
    }

    /// Fight to a terminal state using the thread RNG
    pub fn fight(&mut self) -> FightOutcome {
        let mut rng = rand::thread_rng();
        self.fight_with_rng(&mut rng)
    }

    /// Fight to a terminal state with a provided RNG (for deterministic testing)
    ///
    /// A fight still running after the round limit is resolved as a mob win.
    pub fn fight_with_rng(&mut self, rng: &mut impl Rng) -> FightOutcome {
        while !self.is_over {
            self.do_one_round_with_rng(rng);
            if self.current_round > self.constants.round_limit {
                break;
            }
        }

        FightOutcome {
            status: self.status(),
            rounds: self.current_round,
            round_limit: self.constants.round_limit,
        }
    }

    /// Play a single round: the mob attacks every living clone, then every
    /// living clone attacks the mob until it drops.
    pub fn do_one_round_with_rng(&mut self, rng: &mut impl Rng) {
        if self.verbose {
            trace!(round = self.current_round, "round start");
        }

        for index in 0..self.squad.len() {
            if !self.squad.clones[index].is_alive() {
                continue;
            }
            self.mob_attack(index, rng);
        }

        for index in 0..self.squad.len() {
            if !self.squad.clones[index].is_alive() {
                if self.verbose {
                    trace!(clone = %self.squad.clones[index].name, "exhausted");
                }
                continue;
            }
            if !self.mob.is_alive() {
                break;
            }
            self.clone_attack(index, rng);
        }

        self.is_over = !self.mob.is_alive() || self.squad.is_wiped();
        if self.verbose {
            trace!(
                round = self.current_round,
                clones_alive = self.squad.alive_count(),
                mob_hp = self.mob.current_hp(),
                "round end"
            );
        }
        self.current_round += 1;
    }

    fn mob_attack(&mut self, index: usize, rng: &mut impl Rng) -> AttackResult {
        let clone = &mut self.squad.clones[index];
        let result = resolve_attack_with_rng(&mut self.mob, clone, None, rng);
        log_attack(self.verbose, self.mob.name(), &*clone, result, false);
        result
    }

    /// Primary attack plus an optional independent dual shot
    fn clone_attack(&mut self, index: usize, rng: &mut impl Rng) -> (AttackResult, Option<AttackResult>) {
        let clone = &mut self.squad.clones[index];
        let bonus = StrikeBonus {
            crit_chance: clone.crit_chance,
            crit_damage: clone.crit_damage,
            damage_modifier: self.total_damage_modifier,
        };

        let primary = resolve_attack_with_rng(clone, &mut self.mob, Some(bonus), rng);
        log_attack(self.verbose, clone.name(), &self.mob, primary, false);

        let dual_shot_chance = clone.dual_shot_chance;
        let dual = if dual_shot_chance > 0.0 && rng.gen::<f64>() < dual_shot_chance {
            let result = resolve_attack_with_rng(clone, &mut self.mob, Some(bonus), rng);
            log_attack(self.verbose, clone.name(), &self.mob, result, true);
            Some(result)
        } else {
            None
        };

        (primary, dual)
    }

    /// Restore the mob and every clone, and rewind the round counter
    pub fn reset(&mut self) {
        self.mob.reset();
        self.squad.reset();
        self.is_over = false;
        self.current_round = 0;
    }

    /// Credits yield for this battle's mob and player
    pub fn revenue(&self, period: YieldPeriod, win_chance: f64, income_boost: f64, reputation: f64) -> f64 {
        self.yields.revenue(period, win_chance, income_boost, reputation)
    }

    /// Experience yield for this battle's mob and player
    pub fn experience(&self, period: YieldPeriod, win_chance: f64, reputation: f64) -> f64 {
        self.yields.experience(period, win_chance, reputation)
    }
}

fn log_attack<T: Combatant + ?Sized>(
    verbose: bool,
    attacker: &str,
    target: &T,
    result: AttackResult,
    dual: bool,
) {
    if !verbose {
        return;
    }
    match result {
        AttackResult::Hit { damage, critical } => trace!(
            attacker,
            target = target.name(),
            damage,
            critical,
            dual,
            hp_left = target.current_hp(),
            "hit"
        ),
        AttackResult::Miss => trace!(attacker, target = target.name(), dual, "missed"),
    }
}
