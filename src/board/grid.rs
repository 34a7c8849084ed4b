//! The 8x8 disc grid with legality and flip computation.
//!
//! The board knows nothing about health, stock or phases. It answers three
//! questions (what would flip, is any move left, who has more discs) and
//! applies placements.

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::position::{Direction, Position, BOARD_SIZE};
use crate::core::{IllegalMoveReason, MatchError, Player, Result};

/// Cells flipped by a single placement. A legal Reversi move flips at most
/// 18 discs, so this never spills to the heap.
pub type FlipSet = SmallVec<[Position; 24]>;

/// A cell's occupant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disc {
    #[default]
    Empty,
    Black,
    White,
}

impl Disc {
    #[must_use]
    pub const fn of(player: Player) -> Self {
        match player {
            Player::Black => Disc::Black,
            Player::White => Disc::White,
        }
    }

    fn symbol(self) -> char {
        match self {
            Disc::Empty => '.',
            Disc::Black => 'B',
            Disc::White => 'W',
        }
    }
}

/// The disc grid. Exactly 64 cells at all times.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Disc; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// A board with no discs.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [[Disc::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// The opening position: White on (3,3) and (4,4), Black on (4,3) and (3,4).
    #[must_use]
    pub fn standard() -> Self {
        let mut board = Self::empty();
        board.cells[3][3] = Disc::White;
        board.cells[4][4] = Disc::White;
        board.cells[3][4] = Disc::Black;
        board.cells[4][3] = Disc::Black;
        board
    }

    /// Parse eight rows of `.`, `B` and `W`. Anything else is an empty cell.
    ///
    /// ```
    /// use osero_duel::board::{Board, Disc, Position};
    ///
    /// let board = Board::from_rows([
    ///     "........",
    ///     "........",
    ///     "........",
    ///     "...WB...",
    ///     "...BW...",
    ///     "........",
    ///     "........",
    ///     "........",
    /// ]);
    /// assert_eq!(board, Board::standard());
    /// assert_eq!(board.get(Position::new(3, 3).unwrap()), Disc::White);
    /// ```
    #[must_use]
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().take(BOARD_SIZE).enumerate() {
                board.cells[y][x] = match c {
                    'B' | 'b' => Disc::Black,
                    'W' | 'w' => Disc::White,
                    _ => Disc::Empty,
                };
            }
        }
        board
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Disc {
        self.cells[pos.y()][pos.x()]
    }

    /// Overwrite a single cell. Used for setting up positions; match play
    /// only mutates the board through `place`.
    pub fn set(&mut self, pos: Position, disc: Disc) {
        self.cells[pos.y()][pos.x()] = disc;
    }

    /// Opposing discs bracketed along one direction from `pos`.
    ///
    /// Empty when the run hits an empty cell or the edge before a disc of
    /// `player`'s colour.
    #[must_use]
    pub fn flips_in_direction(&self, pos: Position, player: Player, dir: Direction) -> FlipSet {
        let own = Disc::of(player);
        let theirs = Disc::of(player.opponent());
        let mut run = FlipSet::new();
        let mut cursor = pos.step(dir);

        while let Some(cell) = cursor {
            match self.get(cell) {
                d if d == theirs => run.push(cell),
                d if d == own => return run,
                _ => break,
            }
            cursor = cell.step(dir);
        }

        FlipSet::new()
    }

    /// Union of bracketed runs across all eight directions.
    ///
    /// This scans regardless of whether `pos` itself is occupied; legality
    /// additionally requires an empty target (see `is_legal`).
    #[must_use]
    pub fn legal_flips(&self, pos: Position, player: Player) -> FlipSet {
        let mut flips = FlipSet::new();
        for dir in Direction::ALL {
            flips.extend(self.flips_in_direction(pos, player, dir));
        }
        flips
    }

    #[must_use]
    pub fn is_legal(&self, pos: Position, player: Player) -> bool {
        self.get(pos) == Disc::Empty
            && Direction::ALL
                .iter()
                .any(|&dir| !self.flips_in_direction(pos, player, dir).is_empty())
    }

    /// Place a disc for `player` and flip every bracketed run.
    ///
    /// Returns the number of flipped discs (always at least 1).
    pub fn place(&mut self, pos: Position, player: Player) -> Result<usize> {
        if self.get(pos) != Disc::Empty {
            return Err(MatchError::IllegalMove {
                pos,
                reason: IllegalMoveReason::Occupied,
            });
        }

        let flips = self.legal_flips(pos, player);
        if flips.is_empty() {
            return Err(MatchError::IllegalMove {
                pos,
                reason: IllegalMoveReason::NoFlips,
            });
        }

        let disc = Disc::of(player);
        self.set(pos, disc);
        for &cell in &flips {
            self.set(cell, disc);
        }

        debug!("{} placed at {} flipping {}", player, pos, flips.len());
        Ok(flips.len())
    }

    /// Every empty cell where `player` may legally place.
    #[must_use]
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_legal(pos, player)).collect()
    }

    #[must_use]
    pub fn has_any_legal_move(&self, player: Player) -> bool {
        Position::all().any(|pos| self.is_legal(pos, player))
    }

    #[must_use]
    pub fn count(&self, disc: Disc) -> u32 {
        self.cells.iter().flatten().filter(|&&d| d == disc).count() as u32
    }

    /// `(black, white)` disc counts.
    #[must_use]
    pub fn disc_counts(&self) -> (u32, u32) {
        (self.count(Disc::Black), self.count(Disc::White))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|d| d.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
