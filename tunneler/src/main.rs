//! Strip-mining agent driver.
//!
//! Runs the excavation engine against a simulated world described in TOML
//! and reports where the run stopped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::warn;

use tunneler::core::catalog::Catalog;
use tunneler::core::fuel::{estimate_fuel, is_sufficient};
use tunneler::exit_codes;
use tunneler::io::actuator::Actuator;
use tunneler::io::config::{MinerConfig, load_config, write_config};
use tunneler::io::world::{ActionLog, SimWorld, WorldSpec, load_world_spec};
use tunneler::logging;
use tunneler::strip::{StrandedError, StripOutcome, StripStop, run_strip};

const DEFAULT_CONFIG: &str = "tunneler.toml";

#[derive(Parser)]
#[command(
    name = "tunneler",
    version,
    about = "Strip-mining excavation engine for a grid-based mining agent"
)]
struct Cli {
    /// Log more to stderr (`-v` info, `-vv` debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default miner config if missing.
    Init {
        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Print the fuel a full strip needs.
    Estimate {
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Mine a strip in a simulated world and report the outcome.
    Dig {
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        /// World description; solid stone with unmetered fuel if omitted.
        #[arg(long)]
        world: Option<PathBuf>,
        /// Override the configured depth.
        #[arg(long)]
        depth: Option<u32>,
        /// Override the configured height.
        #[arg(long)]
        height: Option<u32>,
        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct DigReport<'a> {
    outcome: &'a StripOutcome,
    actions: &'a ActionLog,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            if err.downcast_ref::<StrandedError>().is_some() {
                exit_codes::STRANDED
            } else {
                exit_codes::INVALID
            }
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { force, config } => cmd_init(&config, force),
        Command::Estimate { config } => cmd_estimate(&config),
        Command::Dig {
            config,
            world,
            depth,
            height,
            json,
        } => {
            let mut cfg = load_config(&config)?;
            cfg.depth = depth.unwrap_or(cfg.depth);
            cfg.height = height.unwrap_or(cfg.height);
            cmd_dig(&cfg, world.as_deref(), json)
        }
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if !force && path.exists() {
        println!("{} already exists", path.display());
        return Ok(exit_codes::OK);
    }
    write_config(path, &MinerConfig::default())?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_estimate(path: &Path) -> Result<i32> {
    let cfg = load_config(path)?;
    println!("{}", estimate_fuel(cfg.depth, cfg.height));
    Ok(exit_codes::OK)
}

fn cmd_dig(cfg: &MinerConfig, world: Option<&Path>, json: bool) -> Result<i32> {
    let spec = match world {
        Some(path) => load_world_spec(path)?,
        None => WorldSpec::default(),
    };
    let mut sim = build_world(&spec, &cfg.catalog)?;

    let fuel = sim.fuel_level();
    if !is_sufficient(fuel, cfg.depth, cfg.height) {
        warn!(
            ?fuel,
            needed = estimate_fuel(cfg.depth, cfg.height),
            "starting fuel is below the strip estimate"
        );
    }

    let outcome = run_strip(&mut sim, cfg, |_| {})?;

    if json {
        let report = DigReport {
            outcome: &outcome,
            actions: sim.log(),
        };
        let payload = serde_json::to_string_pretty(&report).context("serialize dig report")?;
        println!("{payload}");
    } else {
        println!("{}", summary_line(&outcome, sim.log()));
    }

    Ok(match outcome.stop {
        StripStop::CompletedAtDepth => exit_codes::OK,
        StripStop::AbortedAt { .. } => exit_codes::ABORTED,
    })
}

fn build_world(spec: &WorldSpec, catalog: &Catalog) -> Result<SimWorld> {
    SimWorld::new(spec, catalog.clone()).context("build simulated world")
}

fn summary_line(outcome: &StripOutcome, log: &ActionLog) -> String {
    let stop = match outcome.stop {
        StripStop::CompletedAtDepth => format!("completed at depth {}", outcome.depth),
        StripStop::AbortedAt { position, failure } => {
            format!("aborted at position {position}: {failure}")
        }
    };
    format!(
        "{stop}; back at mouth after {} moves, {} digs",
        log.translations(),
        log.digs
    )
}
