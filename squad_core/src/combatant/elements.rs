//! Elemental weakness bonus

use super::{Mob, Player};

/// An element slot holding nothing, an empty tag or "none" counts as unset
pub fn is_unset_element(element: Option<&str>) -> bool {
    match element {
        None => true,
        Some(e) => e.is_empty() || e.eq_ignore_ascii_case("none"),
    }
}

/// Resolve a weapon or shield element pair
///
/// When exactly one slot is set, the unset slot inherits its sibling.
pub fn resolve_element_pair<'a>(
    first: Option<&'a str>,
    second: Option<&'a str>,
) -> [Option<&'a str>; 2] {
    let first = if is_unset_element(first) { None } else { first };
    let second = if is_unset_element(second) { None } else { second };

    match (first, second) {
        (Some(e), None) | (None, Some(e)) => [Some(e), Some(e)],
        pair => [pair.0, pair.1],
    }
}

/// Total damage modifier of a player's equipment against a mob
///
/// `bonus` per resolved weapon/shield slot that matches a mob weakness.
pub fn total_damage_modifier(player: &Player, mob: &Mob, bonus: f64) -> f64 {
    let weapon = resolve_element_pair(
        player.weapon_element1.as_deref(),
        player.weapon_element2.as_deref(),
    );
    let shield = resolve_element_pair(
        player.shield_element1.as_deref(),
        player.shield_element2.as_deref(),
    );

    weapon
        .iter()
        .chain(shield.iter())
        .flatten()
        .filter(|element| mob.is_weak_to(element))
        .count() as f64
        * bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Build;

    fn player() -> Player {
        Player::new(Build::new(1, 1, 1, 1), 10.0, 10.0, 1)
    }

    #[test]
    fn test_unset_elements() {
        assert!(is_unset_element(None));
        assert!(is_unset_element(Some("None")));
        assert!(is_unset_element(Some("none")));
        assert!(is_unset_element(Some("")));
        assert!(!is_unset_element(Some("fire")));
    }

    #[test]
    fn test_pair_fallback_both_directions() {
        assert_eq!(resolve_element_pair(Some("fire"), None), [Some("fire"), Some("fire")]);
        assert_eq!(resolve_element_pair(Some("None"), Some("ice")), [Some("ice"), Some("ice")]);
        assert_eq!(resolve_element_pair(Some("fire"), Some("ice")), [Some("fire"), Some("ice")]);
        assert_eq!(resolve_element_pair(None, Some("none")), [None, None]);
    }

    #[test]
    fn test_single_weapon_element_counts_twice() {
        let player = player().with_weapon_elements(Some("fire"), Some("None"));
        let mob = Mob::new(100.0, 1.0, 1.0, 1.0, 1).with_weaknesses(["fire"]);

        let modifier = total_damage_modifier(&player, &mob, 0.15);
        assert!((modifier - 0.30).abs() < 1e-12);
    }

    #[test]
    fn test_all_slots_matching() {
        let player = player()
            .with_weapon_elements(Some("fire"), Some("ice"))
            .with_shield_elements(None, Some("ice"));
        let mob = Mob::new(100.0, 1.0, 1.0, 1.0, 1).with_weaknesses(["fire", "ice"]);

        let modifier = total_damage_modifier(&player, &mob, 0.15);
        assert!((modifier - 0.60).abs() < 1e-12);
    }

    #[test]
    fn test_no_weaknesses() {
        let player = player().with_weapon_elements(Some("fire"), None);
        let mob = Mob::new(100.0, 1.0, 1.0, 1.0, 1);
        assert_eq!(total_damage_modifier(&player, &mob, 0.15), 0.0);
    }
}
