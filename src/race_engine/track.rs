//! Track - Immutable occupancy grid with start and finish cells
//!
//! Rows may have different lengths; every lookup is bound-checked per row.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::race_engine::error::{RaceError, Result};
use crate::race_engine::position::Position;

/// Cell codes as they appear in track rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Track,
    Start,
    Finish,
}

impl Cell {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Cell::Wall),
            1 => Some(Cell::Track),
            2 => Some(Cell::Start),
            3 => Some(Cell::Finish),
            _ => None,
        }
    }

    pub fn is_drivable(self) -> bool {
        self != Cell::Wall
    }
}

#[derive(Debug, Clone)]
pub struct TrackGrid {
    cells: Vec<Vec<Cell>>,
    start_positions: Vec<Position>,
    end_positions: HashSet<Position>,
}

impl TrackGrid {
    /// Build a grid and derive its start and finish cells.
    ///
    /// Fails if either set would be empty.
    pub fn new(cells: Vec<Vec<Cell>>) -> Result<Self> {
        let mut start_positions = Vec::new();
        let mut end_positions = HashSet::new();

        for (x, row) in cells.iter().enumerate() {
            for (y, cell) in row.iter().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                match cell {
                    Cell::Start => start_positions.push(pos),
                    Cell::Finish => {
                        end_positions.insert(pos);
                    }
                    _ => {}
                }
            }
        }

        if start_positions.is_empty() || end_positions.is_empty() {
            return Err(RaceError::MissingStartOrFinish);
        }

        Ok(Self {
            cells,
            start_positions,
            end_positions,
        })
    }

    /// Parse rows of digit characters such as `"212"`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let cells = rows
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        ch.to_digit(10)
                            .and_then(Cell::from_code)
                            .ok_or(RaceError::InvalidCell { row, col, found: ch })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(cells)
    }

    /// Cell at `pos`, or `None` when off the grid
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        self.cells.get(x)?.get(y).copied()
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self, row: usize) -> usize {
        self.cells.get(row).map_or(0, Vec::len)
    }

    pub fn start_positions(&self) -> &[Position] {
        &self.start_positions
    }

    pub fn end_positions(&self) -> &HashSet<Position> {
        &self.end_positions
    }

    pub fn is_finish(&self, pos: Position) -> bool {
        self.end_positions.contains(&pos)
    }
}
