//! Error - Failure modes for race setup and simulation

use crate::race_engine::position::Position;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaceError {
    #[error("failed to read race config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid race config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid track cell {found:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, found: char },

    #[error("start or finish positions are missing in the track")]
    MissingStartOrFinish,

    #[error("{bots} bots exceed the {slots} starting slots")]
    TooManyBots { bots: usize, slots: usize },

    /// No neighbour of the bot is also a neighbour of its main point.
    #[error("bot {bot} has no nearby move from {position}")]
    FallbackExhausted { bot: String, position: Position },
}

pub type Result<T> = std::result::Result<T, RaceError>;
