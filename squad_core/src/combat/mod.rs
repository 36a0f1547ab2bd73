//! Combat engine - Round resolution, Monte-Carlo win rates and yields

mod battle;
mod estimator;
mod result;
mod yields;

pub use battle::{hit_chance, resolve_attack_with_rng, Battle, StrikeBonus};
pub use estimator::{
    estimate_win_rate_with_rng, repeated_fights, repeated_fights_with_rng, WinRateEstimate, DEFAULT_FIGHTS,
};
pub use result::{AttackResult, BattleStatus, FightOutcome};
pub use yields::{RevenueReport, YieldCalculator, YieldPeriod};
