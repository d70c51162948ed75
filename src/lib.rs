//! Vector Race - Grid racing simulation
//!
//! Provides the race engine and a headless driver that runs a race from a
//! JSON config at a fixed tick rate.

pub mod race_engine;

use clap::Parser;
use race_engine::{GameState, RaceConfig, RaceOutcome, RaceServer, RaceSnapshot};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Command line options for the race driver
#[derive(Debug, Parser)]
#[command(name = "vector-race", version, about = "Run a grid vector race")]
pub struct Cli {
    /// Race config file (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Seed for the nearby-move random source, overrides the config
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between ticks, 0 runs flat out
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Stop after this many ticks, overrides the config
    #[arg(long)]
    pub max_ticks: Option<u32>,

    /// Print every snapshot as a JSON line
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Load the config file and apply flag overrides
    pub fn race_config(&self) -> race_engine::Result<RaceConfig> {
        let mut config = RaceConfig::load(&self.config)?;
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.max_ticks.is_some() {
            config.max_ticks = self.max_ticks;
        }
        Ok(config)
    }
}

/// Drive `server` until its race produces an outcome
pub fn drive_race<F>(
    server: &mut RaceServer,
    tick_interval: Duration,
    mut on_snapshot: F,
) -> Option<RaceOutcome>
where
    F: FnMut(&RaceSnapshot),
{
    server.start_race();
    while server.get_state() == GameState::Racing {
        if let Some(snapshot) = server.tick() {
            on_snapshot(&snapshot);
        }
        if !tick_interval.is_zero() && server.is_running() {
            thread::sleep(tick_interval);
        }
    }
    server.outcome().cloned()
}

fn print_snapshot(snapshot: &RaceSnapshot, json: bool) {
    if json {
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{line}"),
            Err(err) => log::warn!("Failed to encode snapshot: {err}"),
        }
        return;
    }
    for bot in &snapshot.bots {
        log::info!(
            "[tick {}] Bot {}, is in position: {}",
            snapshot.tick,
            bot.name,
            bot.position
        );
    }
}

pub fn run() -> race_engine::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.race_config()?;

    let mut server = RaceServer::new();
    server.init_race(&config)?;

    let interval = Duration::from_millis(cli.tick_ms);
    let outcome = drive_race(&mut server, interval, |snapshot| {
        print_snapshot(snapshot, cli.json)
    });

    match outcome {
        Some(RaceOutcome::Winner { name, position, ticks }) => {
            log::info!("Bot {} won the race at {} after {} ticks!", name, position, ticks)
        }
        Some(other) => log::info!("Race ended without a winner: {:?}", other),
        None => log::warn!("Race stopped before it finished"),
    }

    let stats = server.get_stats();
    log::debug!("Average tick time {:.3} ms", stats.avg_tick_time_ms);
    Ok(())
}
