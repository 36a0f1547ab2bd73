//! Integration test: Scenario -> Battle -> Win rate -> Yields -> Searches
//!
//! Runs the reference three-clone fight end to end and drives every search
//! with a small fight budget.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use squad_core::{
    combat::{estimate_win_rate_with_rng, repeated_fights_with_rng, YieldPeriod},
    optimizer::{HITS_TO_DIE_RANGE, HITS_TO_KILL_RANGE},
    parse_scenario, Battle, Build, Mob, Optimizer, OptimizerConfig, Player, SearchError, YieldTarget,
};

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn reference_player() -> Player {
    Player::new(Build::new(50, 20, 20, 30), 10.0, 20.0, 3)
}

fn reference_mob() -> Mob {
    Mob::new(1000.0, 10.0, 5.0, 50.0, 10)
}

#[test]
fn test_reference_scenario_is_reproducible() {
    separator("REFERENCE SCENARIO");

    let run = |seed: u64| {
        let mut battle = Battle::new(reference_player(), reference_mob(), &[]);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        repeated_fights_with_rng(&mut battle, 2000, &mut rng)
    };

    let first = run(2024);
    let second = run(2024);
    println!("  Win chance over 2000 fights: {:.4}", first);

    assert_eq!(first.to_bits(), second.to_bits());
    assert!((0.0..=1.0).contains(&first));
}

#[test]
fn test_reference_scenario_yields() {
    let mut battle = Battle::new(reference_player(), reference_mob(), &[]);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let estimate = estimate_win_rate_with_rng(&mut battle, 500, &mut rng);

    let (low, high) = estimate.confidence_interval_95();
    assert!(low <= estimate.win_rate() && estimate.win_rate() <= high);

    // level 10 mob: 300 * (1 + 0.1 * 10) credits per won fight, 600 fights per hour
    let hourly = battle.revenue(YieldPeriod::Hourly, 1.0, 0.0, 0.0);
    assert!((hourly - 600.0 * 600.0).abs() < 1e-6);

    let daily = battle.revenue(YieldPeriod::Daily, estimate.win_rate(), 0.0, 0.0);
    assert!((daily - 24.0 * battle.revenue(YieldPeriod::Hourly, estimate.win_rate(), 0.0, 0.0)).abs() < 1e-6);
}

#[test]
fn test_fight_resets_between_trials() {
    let mut battle = Battle::new(reference_player(), reference_mob(), &[]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let outcome = battle.fight_with_rng(&mut rng);
    assert!(outcome.status.is_terminal());
    println!("  {}", outcome.summary());

    battle.reset();
    assert_eq!(battle.current_round(), 0);
    assert!(!battle.is_over());
}

const SCENARIO: &str = r#"
[player]
power = 6
precision = 10
evasion = 10
hull = 26
available_points = 16
weapon_damage = 10.0
shield_defense = 20.0
clone_count = 3
weapon_element1 = "fire"

[mob]
max_hp = 1000.0
precision = 10.0
evasion = 5.0
damage = 50.0
level = 10
weaknesses = ["fire", "ice"]

[[modifiers]]
crit_chance = 0.2

[optimizer]
n_fights = 20
generations = 6
seed = 31
"#;

#[test]
fn test_evolutionary_search_from_toml() {
    separator("EVOLUTIONARY SEARCH");

    let scenario = parse_scenario(SCENARIO).unwrap();
    let optimizer = scenario.optimizer();

    let mut generations = 0;
    let best = optimizer
        .optimize_with_progress(YieldTarget::Credits, |progress| {
            generations = progress.generation;
            assert!(progress.tabu_len <= 200);
            Ok(())
        })
        .unwrap();

    println!("  Best build: {} ({:.1}% win)", best.build, best.win_chance * 100.0);

    assert_eq!(generations, 6);
    assert_eq!(best.build.total(), 52 + 16);
    assert_eq!(best.fitness, best.resource.credits_hourly);

    let again = scenario.optimizer().optimize(YieldTarget::Credits).unwrap();
    assert_eq!(best, again);
}

#[test]
fn test_cancelled_search() {
    let optimizer = parse_scenario(SCENARIO).unwrap().optimizer();
    let result = optimizer.optimize_with_progress(YieldTarget::Exp, |progress| {
        Err(SearchError::Cancelled {
            generation: progress.generation,
            total: progress.total_generations,
        })
    });
    assert_eq!(result, Err(SearchError::Cancelled { generation: 1, total: 6 }));
}

#[test]
fn test_exhaustive_searches() {
    separator("EXHAUSTIVE SEARCH");

    let optimizer = Optimizer::new(reference_player(), reference_mob())
        .with_config(OptimizerConfig::default().with_fights(10).with_seed(5));

    let policy = optimizer.find_best_build(5, 7, YieldTarget::Credits);
    println!("  htd 5 / htk 7: {} -> {:.0}", policy.build, policy.best_yield);
    assert_eq!(policy.build.total(), reference_player().total_points());

    let sweep = optimizer.iterate_through_builds(YieldTarget::Exp);
    println!("  sweep: {} (htk {}, htd {})", sweep.build, sweep.hits_to_kill, sweep.hits_to_die);
    assert!(HITS_TO_KILL_RANGE.contains(&sweep.hits_to_kill));
    assert!(HITS_TO_DIE_RANGE.contains(&sweep.hits_to_die));

    let max_win = optimizer.max_win_build().unwrap();
    assert_eq!(max_win.build.power(), optimizer.required_power(7));
    assert!((0.0..=1.0).contains(&max_win.win_chance));
}

#[test]
fn test_point_distribution() {
    let optimizer = Optimizer::new(reference_player(), reference_mob());
    let splits = optimizer.distribute_points(12);
    assert!(splits.contains(&vec![2, 5, 4, 1]));
    assert!(splits.contains(&vec![1, 5, 5, 1]));
}
