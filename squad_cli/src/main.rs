//! Squad build runner CLI.
//!
//! Simulates a scenario file and runs one of the build searches.
//!
//! Usage:
//!   squad_cli <scenario.toml> [OPTIONS]
//!
//! Examples:
//!   squad_cli demos/scenario.toml                         # Evaluate the current build
//!   squad_cli demos/scenario.toml --mode sweep            # Try every hit policy
//!   squad_cli demos/scenario.toml --mode evolve --seed 7  # Reproducible evolutionary search

mod format;

use anyhow::{bail, Context, Result};
use format::{abbreviate, describe_build, percent};
use serde::Serialize;
use squad_core::combat::RevenueReport;
use squad_core::optimizer::{ExhaustiveResult, SweepResult};
use squad_core::{load_scenario, BuildEvaluation, Scenario, YieldTarget};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: squad_cli <scenario.toml> [OPTIONS]

Options:
  -m, --mode <MODE>      fixed | exhaustive | sweep | max-win | evolve (default: fixed)
  -t, --target <TARGET>  credits | exp (default: credits)
      --htd <N>          hits-to-die for exhaustive mode (default: 5)
      --htk <N>          hits-to-kill for exhaustive mode (default: 7)
  -n, --fights <N>       fights simulated per build
  -s, --seed <SEED>      seed for reproducible searches
  -v, --verbose          trace one fight of the current build (fixed mode)
      --json             print the report as JSON
  -h, --help             print this message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Fixed,
    Exhaustive,
    Sweep,
    MaxWin,
    Evolve,
}

impl Mode {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "fixed" => Ok(Mode::Fixed),
            "exhaustive" => Ok(Mode::Exhaustive),
            "sweep" => Ok(Mode::Sweep),
            "max-win" => Ok(Mode::MaxWin),
            "evolve" => Ok(Mode::Evolve),
            other => bail!("unknown mode '{}'", other),
        }
    }
}

#[derive(Debug)]
struct Args {
    scenario: PathBuf,
    mode: Mode,
    target: YieldTarget,
    hits_to_die: u32,
    hits_to_kill: u32,
    fights: Option<u32>,
    seed: Option<u64>,
    verbose: bool,
    json: bool,
}

/// Report printed at the end of a run
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum Report {
    Fixed {
        evaluation: BuildEvaluation,
        /// Credits before income boost and reputation
        base_credits: RevenueReport,
    },
    Exhaustive {
        hits_to_die: u32,
        hits_to_kill: u32,
        result: ExhaustiveResult,
    },
    Sweep {
        result: SweepResult,
    },
    MaxWin {
        evaluation: Option<BuildEvaluation>,
    },
    Evolve {
        evaluation: BuildEvaluation,
    },
}

fn main() -> Result<()> {
    let raw: Vec<String> = env::args().collect();
    if raw.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }
    let args = parse_args(&raw)?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.verbose))
        .with_writer(std::io::stderr)
        .init();

    let mut scenario = load_scenario(&args.scenario)
        .with_context(|| format!("failed to load scenario {}", args.scenario.display()))?;
    if let Some(fights) = args.fights {
        scenario.optimizer.n_fights = fights;
    }
    if let Some(seed) = args.seed {
        scenario.optimizer.seed = Some(seed);
    }

    info!(
        scenario = %args.scenario.display(),
        mode = ?args.mode,
        target = %args.target,
        fights = scenario.optimizer.n_fights,
        "starting run"
    );

    let report = run(&scenario, &args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.target);
    }
    Ok(())
}

/// Directives used when `RUST_LOG` is unset
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,squad_core=trace"
    } else {
        "info"
    }
}

/// `--verbose` always shows the battle trace, otherwise `RUST_LOG` wins
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(default_directives(true));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(false)))
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut scenario = None;
    let mut parsed = Args {
        scenario: PathBuf::new(),
        mode: Mode::Fixed,
        target: YieldTarget::Credits,
        hits_to_die: 5,
        hits_to_kill: 7,
        fights: None,
        seed: None,
        verbose: false,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-m" | "--mode" => parsed.mode = Mode::parse(value(args, &mut i)?)?,
            "-t" | "--target" => parsed.target = value(args, &mut i)?.parse()?,
            "--htd" => parsed.hits_to_die = value(args, &mut i)?.parse().context("--htd expects a number")?,
            "--htk" => parsed.hits_to_kill = value(args, &mut i)?.parse().context("--htk expects a number")?,
            "-n" | "--fights" => {
                parsed.fights = Some(value(args, &mut i)?.parse().context("--fights expects a number")?)
            }
            "-s" | "--seed" => parsed.seed = Some(value(args, &mut i)?.parse().context("--seed expects a number")?),
            "-v" | "--verbose" => parsed.verbose = true,
            "--json" => parsed.json = true,
            flag if flag.starts_with('-') => bail!("unknown option '{}'\n\n{}", flag, USAGE),
            path => {
                if scenario.is_some() {
                    bail!("unexpected argument '{}'\n\n{}", path, USAGE);
                }
                scenario = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    match scenario {
        Some(path) => parsed.scenario = path,
        None => bail!("missing scenario file\n\n{}", USAGE),
    }
    Ok(parsed)
}

/// Value following the flag at `i`, advancing past it
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value.as_str()),
        None => bail!("{} expects a value", flag),
    }
}

fn run(scenario: &Scenario, args: &Args) -> Result<Report> {
    let optimizer = scenario.optimizer();

    let report = match args.mode {
        Mode::Fixed => {
            let build = scenario.player.build();
            let mut battle = optimizer.battle_for(build).with_verbose(args.verbose);
            if args.verbose {
                let outcome = battle.fight();
                info!("{}", outcome.summary());
            }
            let evaluation = optimizer.evaluate(build, args.target);
            Report::Fixed {
                evaluation,
                base_credits: battle.yields().revenue_report(evaluation.win_chance),
            }
        }
        Mode::Exhaustive => Report::Exhaustive {
            hits_to_die: args.hits_to_die,
            hits_to_kill: args.hits_to_kill,
            result: optimizer.find_best_build(args.hits_to_die, args.hits_to_kill, args.target),
        },
        Mode::Sweep => Report::Sweep {
            result: optimizer.iterate_through_builds(args.target),
        },
        Mode::MaxWin => Report::MaxWin {
            evaluation: optimizer.max_win_build(),
        },
        Mode::Evolve => Report::Evolve {
            evaluation: optimizer.optimize(args.target)?,
        },
    };
    Ok(report)
}

fn print_evaluation(evaluation: &BuildEvaluation) {
    let resource = &evaluation.resource;
    println!("  Build:       {} ({})", evaluation.build, describe_build(&evaluation.build));
    println!("  Win chance:  {}", percent(evaluation.win_chance));
    println!(
        "  Credits:     {} / hour, {} / day",
        abbreviate(resource.credits_hourly),
        abbreviate(resource.credits_daily)
    );
    println!(
        "  Experience:  {} / hour, {} / day",
        abbreviate(resource.exp_hourly),
        abbreviate(resource.exp_daily)
    );
}

fn print_report(report: &Report, target: YieldTarget) {
    match report {
        Report::Fixed {
            evaluation,
            base_credits,
        } => {
            println!("Current build:");
            print_evaluation(evaluation);
            println!(
                "  Unboosted:   {} / hour, {} / day",
                abbreviate(base_credits.hourly),
                abbreviate(base_credits.daily)
            );
        }
        Report::Exhaustive {
            hits_to_die,
            hits_to_kill,
            result,
        } => {
            println!("Best build for {} hits-to-die / {} hits-to-kill:", hits_to_die, hits_to_kill);
            if result.is_infeasible() {
                println!("  No build reaches this policy with the available points.");
            } else {
                println!("  Build:       {} ({})", result.build, describe_build(&result.build));
                println!("  Win chance:  {}", percent(result.win_chance));
                println!("  Best {}:  {} / hour", target, abbreviate(result.best_yield));
            }
        }
        Report::Sweep { result } => {
            println!("Best build across all hit policies:");
            if result.best_yield <= 0.0 {
                println!("  No policy produced a winning build.");
            } else {
                println!("  Build:       {} ({})", result.build, describe_build(&result.build));
                println!("  Policy:      {} hits-to-die / {} hits-to-kill", result.hits_to_die, result.hits_to_kill);
                println!("  Win chance:  {}", percent(result.win_chance));
                println!("  Best {}:  {} / hour", target, abbreviate(result.best_yield));
            }
        }
        Report::MaxWin { evaluation } => {
            println!("Highest win chance build:");
            match evaluation {
                Some(evaluation) => print_evaluation(evaluation),
                None => println!("  No build reaches the default policy with the available points."),
            }
        }
        Report::Evolve { evaluation } => {
            println!("Evolved build:");
            print_evaluation(evaluation);
        }
    }
}
