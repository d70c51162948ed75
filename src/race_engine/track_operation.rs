//! Track operations - Validity and passability queries over a track
//!
//! Also hosts the nearby-move fallback a bot uses when its trajectory
//! leaves the drivable area.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::race_engine::bot::Bot;
use crate::race_engine::error::{RaceError, Result};
use crate::race_engine::position::Position;
use crate::race_engine::track::TrackGrid;

#[derive(Debug, Clone, Copy)]
pub struct TrackOperation<'a> {
    track: &'a TrackGrid,
}

impl<'a> TrackOperation<'a> {
    pub fn new(track: &'a TrackGrid) -> Self {
        Self { track }
    }

    /// In bounds for its row and not a wall
    pub fn is_valid_position(&self, pos: Position) -> bool {
        self.track.cell(pos).is_some_and(|cell| cell.is_drivable())
    }

    /// Walk `max(|dx|, |dy|)` unit-diagonal steps from `start`, moving
    /// `sign(d)` on every axis each step, and reject the path if any visited
    /// cell is invalid, `start` included.
    ///
    /// On uneven deltas the walk keeps going along the diagonal past the
    /// shorter axis, so a fast jump cannot tunnel through a wall.
    pub fn check_passable_track(&self, start: Position, arrive: Position) -> bool {
        let delta = arrive - start;
        let dir = delta.signum();
        let steps = delta.x.abs().max(delta.y.abs());

        (0..=steps).all(|i| self.is_valid_position(start + Position::new(i * dir.x, i * dir.y)))
    }

    /// Look-ahead used to decide between accelerating and decelerating
    pub fn is_valid_and_passable(
        &self,
        main_point: Position,
        next_point: Position,
        following_point: Position,
    ) -> bool {
        self.is_valid_position(main_point)
            && self.is_valid_position(next_point)
            && self.check_passable_track(main_point, next_point)
            && self.check_passable_track(next_point, following_point)
    }

    /// Valid cells of the 8-connected neighbourhood, centre excluded
    pub fn calculate_nearby_moves(&self, pos: Position) -> Vec<Position> {
        let mut moves = Vec::with_capacity(8);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let candidate = pos + Position::new(dx, dy);
                if self.is_valid_position(candidate) {
                    moves.push(candidate);
                }
            }
        }
        moves
    }

    /// Move `bot` to a random cell adjacent to both its position and its
    /// main point.
    pub fn execute_nearby_move<R: Rng + ?Sized>(
        &self,
        bot: &mut Bot,
        rng: &mut R,
    ) -> Result<Position> {
        let current = bot.current_position();
        let main_point = bot
            .movement()
            .calculate_main_point(current, bot.previous_displacement());
        let around_main = self.calculate_nearby_moves(main_point);

        let shared: Vec<Position> = self
            .calculate_nearby_moves(current)
            .into_iter()
            .filter(|pos| around_main.contains(pos))
            .collect();

        let target = *shared.choose(rng).ok_or_else(|| RaceError::FallbackExhausted {
            bot: bot.name().to_string(),
            position: current,
        })?;

        debug!(
            "Bot {} falls back from {} to {} ({} candidates)",
            bot.name(),
            current,
            target,
            shared.len()
        );
        bot.update_position(target);
        Ok(target)
    }
}
