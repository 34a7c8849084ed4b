//! Board coordinates and scan directions.

use serde::{Deserialize, Serialize};

use crate::core::{MatchError, Result};

/// Board width and height.
pub const BOARD_SIZE: usize = 8;

/// A cell coordinate. Always on the board once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Create a position, rejecting coordinates outside the 8x8 grid.
    ///
    /// ```
    /// use osero_duel::board::Position;
    ///
    /// assert!(Position::new(7, 0).is_ok());
    /// assert!(Position::new(8, 0).is_err());
    /// assert!(Position::new(-1, 3).is_err());
    /// ```
    pub fn new(x: i32, y: i32) -> Result<Self> {
        Self::checked(x, y).ok_or(MatchError::OffBoard { x, y })
    }

    fn checked(x: i32, y: i32) -> Option<Self> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn x(self) -> usize {
        self.x as usize
    }

    #[must_use]
    pub const fn y(self) -> usize {
        self.y as usize
    }

    /// Row-major index in `0..64`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    /// The neighbouring cell in `dir`, or `None` at the edge.
    #[must_use]
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dx, dy) = dir.delta();
        Self::checked(self.x as i32 + dx, self.y as i32 + dy)
    }

    /// Every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8).flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| Position { x, y }))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight scan directions. `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// `(dx, dy)` step for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}
