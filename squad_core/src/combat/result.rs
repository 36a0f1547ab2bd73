//! Fight outcomes and per-attack results

use serde::{Deserialize, Serialize};

/// State of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStatus {
    InProgress,
    MobWon,
    CloneWon,
    /// Round limit exceeded; counts as a mob win
    Timeout,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        self != BattleStatus::InProgress
    }

    /// Only an outright kill of the mob is a squad win
    pub fn is_clone_win(self) -> bool {
        self == BattleStatus::CloneWon
    }

    /// Timeouts are resolved in the mob's favour
    pub fn is_mob_win(self) -> bool {
        matches!(self, BattleStatus::MobWon | BattleStatus::Timeout)
    }
}

/// Terminal status of a fight and the rounds it took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightOutcome {
    pub status: BattleStatus,
    pub rounds: u32,
    pub round_limit: u32,
}

impl FightOutcome {
    pub fn clones_won(&self) -> bool {
        self.status.is_clone_win()
    }

    pub fn timed_out(&self) -> bool {
        self.status == BattleStatus::Timeout
    }

    /// Human-readable one-liner
    pub fn summary(&self) -> String {
        match self.status {
            BattleStatus::CloneWon => format!("Clones won after {} rounds.", self.rounds),
            BattleStatus::MobWon => format!("Mob won after {} rounds.", self.rounds),
            BattleStatus::Timeout => format!(
                "Fight did not end after {} rounds, so mob wins!",
                self.round_limit
            ),
            BattleStatus::InProgress => format!("Fight in progress after {} rounds.", self.rounds),
        }
    }
}

/// Result of a single attack roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackResult {
    Miss,
    Hit {
        /// Damage applied (before flooring target HP at zero)
        damage: f64,
        critical: bool,
    },
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackResult::Hit { .. })
    }

    pub fn damage(&self) -> f64 {
        match self {
            AttackResult::Miss => 0.0,
            AttackResult::Hit { damage, .. } => *damage,
        }
    }
}
