//! Race Engine Module
//!
//! Grid movement rules, track validity checks and the race loop, plus the
//! server that drives a race through its lifecycle.

pub mod bot;
pub mod config;
pub mod error;
pub mod movement;
pub mod position;
pub mod race;
pub mod simulation;
pub mod track;
pub mod track_operation;

pub use bot::{Bot, BotSnapshot, TurnOutcome};
pub use config::{BotConfig, RaceConfig};
pub use error::{RaceError, Result};
pub use movement::Movement;
pub use position::Position;
pub use race::{Race, RaceOutcome, RaceResult, RaceSnapshot, RaceStatus};
pub use simulation::{GameState, RaceServer, ServerStats};
pub use track::{Cell, TrackGrid};
pub use track_operation::TrackOperation;
