//! Engine error type.
//!
//! Every error is recoverable: the engine state is left exactly as it was
//! before the rejected call, and the caller re-prompts or ignores.

use thiserror::Error;

use crate::board::Position;
use crate::game::Phase;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Why a placement was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// The target cell already holds a disc.
    Occupied,
    /// No opposing run is bracketed in any direction.
    NoFlips,
}

impl std::fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMoveReason::Occupied => write!(f, "cell is occupied"),
            IllegalMoveReason::NoFlips => write!(f, "no discs would flip"),
        }
    }
}

/// Errors reported by the match engine.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum MatchError {
    #[error("illegal move at {pos}: {reason}")]
    IllegalMove {
        pos: Position,
        reason: IllegalMoveReason,
    },

    #[error("invalid flip count {0}; a challenge needs at least one flip")]
    InvalidFlipCount(i32),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("{event} is not accepted during {phase}")]
    OutOfPhase { event: &'static str, phase: Phase },

    #[error("coordinate ({x}, {y}) is off the board")]
    OffBoard { x: i32, y: i32 },

    #[error("note index {0} is outside 0..7")]
    InvalidNote(u8),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to decode command history: {0}")]
    Decode(String),
}

impl From<bincode::Error> for MatchError {
    fn from(err: bincode::Error) -> Self {
        MatchError::Decode(err.to_string())
    }
}
