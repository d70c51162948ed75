//! Simulation - Race server and lifecycle
//!
//! Owns the active race, tracks the server state machine and keeps tick
//! timing statistics. A driver calls `tick` on its own schedule and stops
//! calling it to stop the race.

use std::time::Instant;
use serde::{Deserialize, Serialize};
use log::info;

use crate::race_engine::config::RaceConfig;
use crate::race_engine::error::Result;
use crate::race_engine::race::{Race, RaceOutcome, RaceResult, RaceSnapshot};

/// Server lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Idle,
    Ready,
    Racing,
    Paused,
    Results,
}

/// Server statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStats {
    pub ticks: u32,
    pub avg_tick_time_ms: f32,
    pub bot_count: u32,
    pub game_state: GameState,
}

/// Main race server
pub struct RaceServer {
    /// Current lifecycle state
    state: GameState,
    /// Active race (if any)
    race: Option<Race>,
    /// Outcome of the last finished race
    outcome: Option<RaceOutcome>,
    /// Recent tick durations for averaging
    tick_times: Vec<f32>,
}

impl RaceServer {
    const TICK_WINDOW: usize = 60;

    pub fn new() -> Self {
        Self {
            state: GameState::Idle,
            race: None,
            outcome: None,
            tick_times: Vec::with_capacity(Self::TICK_WINDOW),
        }
    }

    /// Set up a new race, replacing any previous one
    pub fn init_race(&mut self, config: &RaceConfig) -> Result<()> {
        let race = Race::new(config)?;
        info!(
            "Race initialized with {} bots on a {}-row track",
            race.bots().len(),
            race.track().rows()
        );

        self.race = Some(race);
        self.outcome = None;
        self.tick_times.clear();
        self.state = GameState::Ready;
        Ok(())
    }

    /// Start a ready race
    pub fn start_race(&mut self) {
        if self.state == GameState::Ready {
            self.state = GameState::Racing;
            info!("Race started");
        }
    }

    /// Advance the race by one tick while racing
    pub fn tick(&mut self) -> Option<RaceSnapshot> {
        if self.state != GameState::Racing {
            return self.get_snapshot();
        }
        let race = self.race.as_mut()?;

        let tick_start = Instant::now();
        race.tick();
        let tick_time = tick_start.elapsed().as_secs_f32() * 1000.0;
        self.tick_times.push(tick_time);
        if self.tick_times.len() > Self::TICK_WINDOW {
            self.tick_times.remove(0);
        }

        if let Some(outcome) = race.outcome() {
            info!("Race over: {:?}", outcome);
            self.outcome = Some(outcome);
            self.state = GameState::Results;
        }

        Some(race.get_snapshot())
    }

    /// Get current race snapshot
    pub fn get_snapshot(&self) -> Option<RaceSnapshot> {
        self.race.as_ref().map(|race| race.get_snapshot())
    }

    /// Get race results once the race is over
    pub fn get_results(&self) -> Option<Vec<RaceResult>> {
        self.outcome.as_ref()?;
        self.race.as_ref().map(|race| race.results())
    }

    pub fn outcome(&self) -> Option<&RaceOutcome> {
        self.outcome.as_ref()
    }

    /// Get server statistics
    pub fn get_stats(&self) -> ServerStats {
        let avg_tick_time = if self.tick_times.is_empty() {
            0.0
        } else {
            self.tick_times.iter().sum::<f32>() / self.tick_times.len() as f32
        };

        ServerStats {
            ticks: self.race.as_ref().map_or(0, |race| race.tick_count()),
            avg_tick_time_ms: avg_tick_time,
            bot_count: self.race.as_ref().map_or(0, |race| race.bots().len() as u32),
            game_state: self.state,
        }
    }

    /// Get current game state
    pub fn get_state(&self) -> GameState {
        self.state
    }

    /// Pause the race
    pub fn pause(&mut self) {
        if self.state == GameState::Racing {
            self.state = GameState::Paused;
            info!("Race paused");
        }
    }

    /// Resume a paused race
    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Racing;
            info!("Race resumed");
        }
    }

    /// Reset to idle state
    pub fn reset(&mut self) {
        self.state = GameState::Idle;
        self.race = None;
        self.outcome = None;
        self.tick_times.clear();
        info!("Race reset");
    }

    /// Check if the race is advancing
    pub fn is_running(&self) -> bool {
        self.state == GameState::Racing
    }
}

impl Default for RaceServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race_engine::position::Position;

    fn seeded_config() -> RaceConfig {
        RaceConfig {
            seed: Some(11),
            ..RaceConfig::default()
        }
    }

    #[test]
    fn test_lifecycle_to_results() {
        let mut server = RaceServer::new();
        assert_eq!(server.get_state(), GameState::Idle);
        assert!(server.tick().is_none());

        server.init_race(&seeded_config()).unwrap();
        assert_eq!(server.get_state(), GameState::Ready);

        // ticks before start leave the race untouched
        let snapshot = server.tick().unwrap();
        assert_eq!(snapshot.tick, 0);

        server.start_race();
        assert!(server.is_running());
        for _ in 0..50 {
            if server.get_state() == GameState::Results {
                break;
            }
            server.tick();
        }

        assert_eq!(server.get_state(), GameState::Results);
        assert!(matches!(server.outcome(), Some(RaceOutcome::Winner { .. })));
        let results = server.get_results().unwrap();
        assert_eq!(results[0].placing, 1);
        assert!(server.get_stats().ticks > 0);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut server = RaceServer::new();
        server.init_race(&seeded_config()).unwrap();
        server.start_race();
        server.pause();
        assert_eq!(server.get_state(), GameState::Paused);

        let before: Vec<Position> = server
            .get_snapshot()
            .unwrap()
            .bots
            .iter()
            .map(|bot| bot.position)
            .collect();
        let paused = server.tick().unwrap();
        let after: Vec<Position> = paused.bots.iter().map(|bot| bot.position).collect();
        assert_eq!(before, after);
        assert_eq!(paused.tick, 0);

        server.resume();
        assert!(server.is_running());
        assert_eq!(server.tick().unwrap().tick, 1);
    }

    #[test]
    fn test_results_hidden_until_race_over() {
        let mut server = RaceServer::new();
        server.init_race(&seeded_config()).unwrap();
        assert!(server.get_results().is_none());
    }

    #[test]
    fn test_init_race_rejects_bad_config() {
        let mut server = RaceServer::new();
        let config = RaceConfig {
            track: vec!["111".into(), "313".into()],
            ..RaceConfig::default()
        };
        assert!(server.init_race(&config).is_err());
        assert_eq!(server.get_state(), GameState::Idle);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut server = RaceServer::new();
        server.init_race(&seeded_config()).unwrap();
        server.start_race();
        server.tick();
        server.reset();

        assert_eq!(server.get_state(), GameState::Idle);
        assert!(server.get_snapshot().is_none());
        let stats = server.get_stats();
        assert_eq!(stats.ticks, 0);
        assert_eq!(stats.bot_count, 0);
    }
}
