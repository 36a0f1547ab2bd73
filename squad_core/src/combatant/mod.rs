//! Combatants - Squad clones and the hostile mob
//!
//! Clones are derived from a [`Player`] configuration plus optional per-clone
//! [`CloneModifier`]s. The [`Combatant`] trait is what the combat engine
//! needs from either side of a fight.

mod clone_unit;
mod elements;
mod mob;
mod player;
mod squad;

pub use clone_unit::{CloneModifier, CloneUnit};
pub use elements::{is_unset_element, resolve_element_pair, total_damage_modifier};
pub use mob::Mob;
pub use player::Player;
pub use squad::CloneSquad;

/// Anything that can attack and be attacked in a battle
pub trait Combatant {
    /// Display name used in battle logs
    fn name(&self) -> &str;

    fn precision(&self) -> f64;

    fn evasion(&self) -> f64;

    /// Damage dealt by a landed, non-critical hit
    fn damage(&self) -> f64;

    fn max_hp(&self) -> f64;

    fn current_hp(&self) -> f64;

    /// Number of landed attacks this fight
    fn hit_counter(&self) -> u32;

    /// Subtract damage, flooring HP at zero
    fn take_damage(&mut self, amount: f64);

    /// Record a landed attack
    fn register_hit(&mut self);

    /// Restore HP and clear the hit counter
    fn reset(&mut self);

    fn is_alive(&self) -> bool {
        self.current_hp() > 0.0
    }
}
