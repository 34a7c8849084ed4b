//! Reversi board: coordinates, discs, legal-move and flip computation.
//!
//! Flip runs are computed per direction and unioned. A run only counts when
//! it is closed by a disc of the mover's colour; runs that reach an empty
//! cell or the edge contribute nothing.

mod grid;
mod position;

pub use grid::{Board, Disc, FlipSet};
pub use position::{Direction, Position, BOARD_SIZE};
