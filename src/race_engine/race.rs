//! Race - Turn loop and finish detection
//!
//! Every tick moves each bot once, in creation order. The race is over as
//! soon as a bot stands on a finish cell, every bot has been eliminated, or
//! the optional tick limit runs out.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::race_engine::bot::{Bot, BotSnapshot};
use crate::race_engine::config::RaceConfig;
use crate::race_engine::error::Result;
use crate::race_engine::position::Position;
use crate::race_engine::track::TrackGrid;
use crate::race_engine::track_operation::TrackOperation;

/// Race status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceStatus {
    NotStarted,
    Racing,
    Finished,
}

/// How a finished race ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceOutcome {
    Winner {
        name: String,
        position: Position,
        ticks: u32,
    },
    AllEliminated {
        ticks: u32,
    },
    TickLimit {
        ticks: u32,
    },
}

/// A bot standing on a finish cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub bot_name: String,
    pub position: Position,
    pub placing: u32,
}

pub struct Race<R = StdRng> {
    track: TrackGrid,
    bots: Vec<Bot>,
    rng: R,
    status: RaceStatus,
    tick_count: u32,
    max_ticks: Option<u32>,
}

impl Race<StdRng> {
    /// Build the track and bots described by `config`
    pub fn new(config: &RaceConfig) -> Result<Self> {
        let track = config.build_track()?;
        let bots = config.spawn_bots(&track)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Race::with_rng(track, bots, rng).with_max_ticks(config.max_ticks))
    }
}

impl<R: Rng> Race<R> {
    /// Race on `track` with bots already placed, drawing fallback moves from `rng`
    pub fn with_rng(track: TrackGrid, bots: Vec<Bot>, rng: R) -> Self {
        Self {
            track,
            bots,
            rng,
            status: RaceStatus::NotStarted,
            tick_count: 0,
            max_ticks: None,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u32>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Move every active bot once
    pub fn tick(&mut self) {
        if self.status == RaceStatus::Finished {
            debug!("Tick ignored, race already finished");
            return;
        }
        self.status = RaceStatus::Racing;

        let ops = TrackOperation::new(&self.track);
        for bot in &mut self.bots {
            let turn = bot.calculate_next_moves(&ops, &mut self.rng);
            debug!("Bot {} {:?}", bot.name(), turn);
        }
        self.tick_count = self.tick_count.saturating_add(1);

        if self.is_race_over() {
            self.status = RaceStatus::Finished;
        }
    }

    /// Whether the race has an outcome yet
    pub fn is_race_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// First bot, in creation order, standing on a finish cell
    pub fn winner(&self) -> Option<&Bot> {
        self.bots
            .iter()
            .find(|bot| self.track.is_finish(bot.current_position()))
    }

    /// Winner, total elimination or tick limit, in that order
    pub fn outcome(&self) -> Option<RaceOutcome> {
        let ticks = self.tick_count;
        if let Some(bot) = self.winner() {
            return Some(RaceOutcome::Winner {
                name: bot.name().to_string(),
                position: bot.current_position(),
                ticks,
            });
        }
        if self.bots.iter().all(Bot::is_eliminated) {
            return Some(RaceOutcome::AllEliminated { ticks });
        }
        match self.max_ticks {
            Some(limit) if ticks >= limit => Some(RaceOutcome::TickLimit { ticks }),
            _ => None,
        }
    }

    /// Bots on finish cells, placed by creation order
    pub fn results(&self) -> Vec<RaceResult> {
        self.bots
            .iter()
            .filter(|bot| self.track.is_finish(bot.current_position()))
            .zip(1..)
            .map(|(bot, placing)| RaceResult {
                bot_name: bot.name().to_string(),
                position: bot.current_position(),
                placing,
            })
            .collect()
    }

    /// Tick until the race is over, reporting a snapshot after every tick
    pub fn run<F: FnMut(&RaceSnapshot)>(&mut self, mut observer: F) -> RaceOutcome {
        info!("Race started with {} bots", self.bots.len());
        loop {
            if let Some(outcome) = self.outcome() {
                self.status = RaceStatus::Finished;
                log_outcome(&outcome);
                return outcome;
            }

            self.tick();
            let snapshot = self.get_snapshot();
            for bot in &snapshot.bots {
                debug!("Bot {}, is in position: {}", bot.name, bot.position);
            }
            observer(&snapshot);
        }
    }

    pub fn get_snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            status: self.status,
            tick: self.tick_count,
            bots: self.bots.iter().map(BotSnapshot::from).collect(),
            winner: self.winner().map(|bot| bot.name().to_string()),
        }
    }

    /// Current race status
    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn track(&self) -> &TrackGrid {
        &self.track
    }

    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    pub fn bots_mut(&mut self) -> &mut [Bot] {
        &mut self.bots
    }
}

fn log_outcome(outcome: &RaceOutcome) {
    match outcome {
        RaceOutcome::Winner { name, ticks, .. } => {
            info!("Bot {} won the race after {} ticks!", name, ticks)
        }
        RaceOutcome::AllEliminated { ticks } => {
            info!("Every bot was eliminated after {} ticks", ticks)
        }
        RaceOutcome::TickLimit { ticks } => info!("Race stopped at the {} tick limit", ticks),
    }
}

/// Race state for status reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub status: RaceStatus,
    pub tick: u32,
    pub bots: Vec<BotSnapshot>,
    pub winner: Option<String>,
}
