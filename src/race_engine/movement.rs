//! Movement - Discrete accelerated motion
//!
//! A bot keeps moving by its last displacement. Accelerating or decelerating
//! only nudges that vector by one unit per axis, and the speed counter bounds
//! how many times in a row it can do so.

use serde::{Deserialize, Serialize};

use crate::race_engine::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    speed: u32,
}

impl Movement {
    pub const MIN_SPEED: u32 = 1;
    pub const MAX_SPEED: u32 = 4;

    pub fn new() -> Self {
        Self {
            speed: Self::MIN_SPEED,
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Clamped into `[MIN_SPEED, MAX_SPEED]`
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED);
    }

    /// Point reached by repeating the previous displacement unchanged
    pub fn calculate_main_point(&self, position: Position, displacement: Position) -> Position {
        position + displacement
    }

    pub fn accelerate(&mut self, main_point: Position, displacement: Position) -> Position {
        if self.speed < Self::MAX_SPEED {
            self.speed += 1;
            return main_point + displacement.signum();
        }
        main_point
    }

    pub fn decelerate(&mut self, main_point: Position, displacement: Position) -> Position {
        if self.speed > Self::MIN_SPEED {
            self.speed -= 1;
            return main_point - displacement.signum();
        }
        main_point
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new()
    }
}
