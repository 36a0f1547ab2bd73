//! CloneSquad - Ordered collection of clones

use super::{CloneModifier, CloneUnit, Combatant, Player};
use crate::config::CombatConstants;

/// The player's squad, in attack order
#[derive(Debug, Clone, PartialEq)]
pub struct CloneSquad {
    pub clones: Vec<CloneUnit>,
}

impl CloneSquad {
    /// Derive one clone per `player.clone_count`
    ///
    /// Modifiers are positional: entry `i` applies to clone `i`. Clones past
    /// the end of the list are unmodified and surplus entries are ignored.
    pub fn new(player: &Player, modifiers: &[CloneModifier], constants: &CombatConstants) -> Self {
        let clones = (0..player.clone_count as usize)
            .map(|i| CloneUnit::from_player(i, player, modifiers.get(i), constants))
            .collect();
        CloneSquad { clones }
    }

    pub fn len(&self) -> usize {
        self.clones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }

    /// True once every clone is at zero HP (vacuously true for an empty squad)
    pub fn is_wiped(&self) -> bool {
        self.clones.iter().all(|c| !c.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.clones.iter().filter(|c| c.is_alive()).count()
    }

    pub fn reset(&mut self) {
        for clone in &mut self.clones {
            clone.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Build;

    #[test]
    fn test_one_clone_per_count() {
        let player = Player::new(Build::new(1, 1, 1, 1), 5.0, 5.0, 4);
        let squad = CloneSquad::new(&player, &[], &CombatConstants::default());

        assert_eq!(squad.len(), 4);
        assert_eq!(squad.alive_count(), 4);
        assert_eq!(squad.clones[3].name, "Clone 4");
    }

    #[test]
    fn test_positional_modifiers() {
        let player = Player::new(Build::new(1, 1, 1, 1), 5.0, 5.0, 3);
        let modifiers = vec![
            CloneModifier::default(),
            CloneModifier::new().with_dual_shot(0.5),
        ];
        let squad = CloneSquad::new(&player, &modifiers, &CombatConstants::default());

        assert_eq!(squad.clones[0].dual_shot_chance, 0.0);
        assert!((squad.clones[1].dual_shot_chance - 0.5).abs() < f64::EPSILON);
        assert_eq!(squad.clones[2].dual_shot_chance, 0.0);
    }

    #[test]
    fn test_wiped_and_reset() {
        let player = Player::new(Build::new(1, 1, 1, 1), 5.0, 5.0, 2);
        let mut squad = CloneSquad::new(&player, &[], &CombatConstants::default());

        for clone in &mut squad.clones {
            clone.take_damage(1_000.0);
        }
        assert!(squad.is_wiped());

        squad.reset();
        assert!(!squad.is_wiped());
        assert_eq!(squad.alive_count(), 2);
    }

    #[test]
    fn test_empty_squad_is_wiped() {
        let player = Player::new(Build::new(1, 1, 1, 1), 5.0, 5.0, 0);
        let squad = CloneSquad::new(&player, &[], &CombatConstants::default());
        assert!(squad.is_empty());
        assert!(squad.is_wiped());
    }
}
