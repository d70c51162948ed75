//! Position - Integer grid coordinate
//!
//! Used both for absolute cells on the track and for displacement vectors.
//! `x` is the row index, `y` the column index.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sign, each axis in {-1, 0, 1}
    pub fn signum(self) -> Self {
        Self::new(self.x.signum(), self.y.signum())
    }

    pub fn is_zero(self) -> bool {
        self == Self::ORIGIN
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Position {
        Position::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let p = Position::new(4, -2);
        let d = Position::new(3, 1);
        assert_eq!(p + d, Position::new(7, -1));
        assert_eq!(p - d, Position::new(1, -3));
        assert_eq!(-d, Position::new(-3, -1));
    }

    #[test]
    fn test_signum_per_axis() {
        assert_eq!(Position::new(5, -3).signum(), Position::new(1, -1));
        assert_eq!(Position::new(0, 9).signum(), Position::new(0, 1));
        assert!(Position::ORIGIN.signum().is_zero());
    }

    #[test]
    fn test_display_matches_status_format() {
        assert_eq!(Position::new(0, 0).to_string(), "(0, 0)");
        assert_eq!(Position::from((2, 11)).to_string(), "(2, 11)");
    }
}
