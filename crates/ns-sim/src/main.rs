//! Nage Show economy simulator
//!
//! Usage:
//!   ns-sim lottery --draws 10000 [--multi] [--seed 7] [--config lottery.yaml] [--pool pool.json]
//!   ns-sim race --rounds 500 [--seed 7] [--config race.json]
//!   ns-sim check-config lottery.yaml --kind lottery
//!
//! Results are printed as JSON. `RUST_LOG=debug` shows per-draw detail.

mod demo;
mod lottery;
mod race;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ns_catalog::LotteryPool;
use ns_core::{load_validated, Validate};
use ns_lottery::{DrawType, LotteryConfig};
use ns_race::RaceConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "ns-sim", about = "Nage Show lottery and race simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lottery draws against one player with enough diamonds
    Lottery {
        /// Number of draws
        #[arg(short, long, default_value_t = 10_000)]
        draws: u64,
        /// Ten-pull draws instead of single pulls
        #[arg(short, long)]
        multi: bool,
        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
        /// Lottery config (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Lottery pool JSON; the built-in demo pool otherwise
        #[arg(short, long)]
        pool: Option<PathBuf>,
    },
    /// Run full race rounds with random bettors
    Race {
        /// Number of rounds
        #[arg(short, long, default_value_t = 1_000)]
        rounds: u64,
        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
        /// Race config (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load and validate a config file
    CheckConfig {
        file: PathBuf,
        #[arg(short, long, value_enum, default_value = "lottery")]
        kind: ConfigKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ConfigKind {
    Lottery,
    Race,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Lottery {
            draws,
            multi,
            seed,
            config,
            pool,
        } => run_lottery(draws, multi, seed, config.as_deref(), pool.as_deref()),
        Commands::Race { rounds, seed, config } => run_race(rounds, seed, config.as_deref()),
        Commands::CheckConfig { file, kind } => check_config(&file, kind),
    }
}

fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_os_rng(),
    }
}

fn load_or_default<T>(path: Option<&Path>) -> Result<T>
where
    T: serde::de::DeserializeOwned + Validate + Default,
{
    match path {
        Some(path) => {
            load_validated(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(T::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_lottery(
    draws: u64,
    multi: bool,
    seed: Option<u64>,
    config: Option<&Path>,
    pool: Option<&Path>,
) -> Result<()> {
    let config: LotteryConfig = load_or_default(config)?;
    let pool = match pool {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading pool {}", path.display()))?;
            LotteryPool::from_json(&json).with_context(|| format!("parsing pool {}", path.display()))?
        }
        None => demo::demo_pool().context("building demo pool")?,
    };
    let draw_type = if multi { DrawType::Multi } else { DrawType::Single };

    log::info!("Running {} {:?} draws over {} items", draws, draw_type, pool.len());
    let summary = lottery::run(draws, draw_type, &config, &pool, &mut rng_for(seed))?;
    print_json(&summary)
}

fn run_race(rounds: u64, seed: Option<u64>, config: Option<&Path>) -> Result<()> {
    let config: RaceConfig = load_or_default(config)?;

    log::info!("Running {} rounds with {} horses", rounds, config.horses_per_race);
    let summary = race::run(rounds, &config, &mut rng_for(seed))?;
    print_json(&summary)
}

fn check_config(file: &Path, kind: ConfigKind) -> Result<()> {
    let context = || format!("checking {}", file.display());
    match kind {
        ConfigKind::Lottery => {
            let config: LotteryConfig = load_validated(file).with_context(context)?;
            print_json(&config)?;
        }
        ConfigKind::Race => {
            let config: RaceConfig = load_validated(file).with_context(context)?;
            print_json(&config)?;
        }
    }
    log::info!("{} is valid", file.display());
    Ok(())
}
