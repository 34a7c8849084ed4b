//! Match phases and results.

use serde::{Deserialize, Serialize};

use crate::core::Player;

/// Why a match ended the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    /// A player's health reached zero.
    Knockout,
    /// Neither player could place; decided by disc count.
    DiscCount,
}

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Winner { player: Player, reason: WinReason },
    Draw { reason: WinReason },
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner { player: p, .. } if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Winner { player, .. } => Some(*player),
            GameResult::Draw { .. } => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> WinReason {
        match self {
            GameResult::Winner { reason, .. } | GameResult::Draw { reason } => *reason,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let how = match self.reason() {
            WinReason::Knockout => "KO",
            WinReason::DiscCount => "disc count",
        };
        match self {
            GameResult::Winner { player, .. } => write!(f, "{player} wins ({how})"),
            GameResult::Draw { .. } => write!(f, "draw ({how})"),
        }
    }
}

/// The single active phase of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    AwaitingPlacement { player: Player },
    AwaitingGuess { player: Player, flip_count: u32 },
    AwaitingAttackSelection { player: Player },
    GameOver(GameResult),
}

impl Phase {
    /// The player expected to act, or `None` once the match is over.
    #[must_use]
    pub fn player(&self) -> Option<Player> {
        match *self {
            Phase::AwaitingPlacement { player }
            | Phase::AwaitingGuess { player, .. }
            | Phase::AwaitingAttackSelection { player } => Some(player),
            Phase::GameOver(_) => None,
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver(_))
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingPlacement { .. } => "AwaitingPlacement",
            Phase::AwaitingGuess { .. } => "AwaitingGuess",
            Phase::AwaitingAttackSelection { .. } => "AwaitingAttackSelection",
            Phase::GameOver(_) => "GameOver",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
