//! Bot - Individual racer state and turn logic
//!
//! Each bot keeps its position, the displacement of its last move and its
//! own speed counter. The race calls `calculate_next_moves` once per tick.

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::race_engine::error::Result;
use crate::race_engine::movement::Movement;
use crate::race_engine::position::Position;
use crate::race_engine::track_operation::TrackOperation;

/// What a bot did on a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Accelerated(Position),
    Decelerated(Position),
    NearbyMove(Position),
    Eliminated,
    Idle,
}

#[derive(Debug, Clone)]
pub struct Bot {
    name: String,
    current_position: Position,
    previous_displacement: Position,
    movement: Movement,
    eliminated: bool,
}

impl Bot {
    /// Create a bot standing still on `start`
    pub fn new(name: impl Into<String>, start: Position) -> Self {
        Self {
            name: name.into(),
            current_position: start,
            previous_displacement: Position::ORIGIN,
            movement: Movement::new(),
            eliminated: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_position(&self) -> Position {
        self.current_position
    }

    pub fn previous_displacement(&self) -> Position {
        self.previous_displacement
    }

    pub fn speed(&self) -> u32 {
        self.movement.speed()
    }

    pub fn movement(&self) -> &Movement {
        &self.movement
    }

    pub fn movement_mut(&mut self) -> &mut Movement {
        &mut self.movement
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    /// Jump to `target`, remembering the displacement that got us there
    pub fn update_position(&mut self, target: Position) {
        self.previous_displacement = target - self.current_position;
        self.current_position = target;
    }

    /// Play one turn.
    ///
    /// A stationary bot, or one whose main point is off the track, takes a
    /// nearby move. Otherwise it accelerates when the track two moves ahead
    /// is still reachable and decelerates when it is not. A bot with no
    /// nearby move left is eliminated.
    pub fn calculate_next_moves<R: Rng + ?Sized>(
        &mut self,
        ops: &TrackOperation<'_>,
        rng: &mut R,
    ) -> TurnOutcome {
        if self.eliminated {
            return TurnOutcome::Idle;
        }

        match self.try_next_move(ops, rng) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("{err}; eliminating bot {}", self.name);
                self.eliminated = true;
                TurnOutcome::Eliminated
            }
        }
    }

    fn try_next_move<R: Rng + ?Sized>(
        &mut self,
        ops: &TrackOperation<'_>,
        rng: &mut R,
    ) -> Result<TurnOutcome> {
        let displacement = self.previous_displacement;
        let main_point = self
            .movement
            .calculate_main_point(self.current_position, displacement);
        let next_point = self.movement.calculate_main_point(main_point, displacement);
        let following_point = self.movement.calculate_main_point(next_point, displacement);

        if main_point == self.current_position || !ops.is_valid_position(main_point) {
            let target = ops.execute_nearby_move(self, rng)?;
            return Ok(TurnOutcome::NearbyMove(target));
        }

        let accelerating = ops.is_valid_and_passable(main_point, next_point, following_point);
        let target = if accelerating {
            self.movement.accelerate(main_point, displacement)
        } else {
            self.movement.decelerate(main_point, displacement)
        };
        self.update_position(target);

        Ok(if accelerating {
            TurnOutcome::Accelerated(target)
        } else {
            TurnOutcome::Decelerated(target)
        })
    }
}

/// Compact bot state for status reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSnapshot {
    pub name: String,
    pub position: Position,
    pub speed: u32,
    pub eliminated: bool,
}

impl From<&Bot> for BotSnapshot {
    fn from(bot: &Bot) -> Self {
        Self {
            name: bot.name.clone(),
            position: bot.current_position,
            speed: bot.movement.speed(),
            eliminated: bot.eliminated,
        }
    }
}
