//! Input commands and the accepted-command history.
//!
//! Every external event the engine understands is a `Command`. The
//! controller appends each accepted command to its history, which is enough
//! to rebuild the whole match from its config.

use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::board::Position;
use crate::combat::Notes;
use crate::quiz::NoteIndex;

/// An external input event.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Place a disc for the active player.
    Place(Position),
    /// Answer the running quiz round.
    Guess(NoteIndex),
    /// Toggle a stock slot in or out of the pending attack selection.
    ToggleSelection(usize),
    /// Resolve the pending (toggled) selection.
    ConfirmAttack,
    /// Resolve an explicit selection of notes.
    Attack(Notes),
    /// Restore health for a player (host-driven effect).
    Heal { player: Player, amount: u32 },
    /// Raise or lower a player's shield (host-driven effect).
    SetShield { player: Player, active: bool },
    /// Start a new match.
    Reset,
}

impl Command {
    /// Short label used in logs and phase errors.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Command::Place(_) => "placement",
            Command::Guess(_) => "guess",
            Command::ToggleSelection(_) => "selection toggle",
            Command::ConfirmAttack | Command::Attack(_) => "attack",
            Command::Heal { .. } => "heal",
            Command::SetShield { .. } => "shield",
            Command::Reset => "reset",
        }
    }
}

/// An accepted command with metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Position in the match history (starts at 0).
    pub sequence: u32,

    /// The player who was active when the command was accepted
    /// (`None` after the match ended).
    pub player: Option<Player>,

    /// The command itself.
    pub command: Command,
}

impl CommandRecord {
    /// Create a new command record.
    #[must_use]
    pub fn new(sequence: u32, player: Option<Player>, command: Command) -> Self {
        Self {
            sequence,
            player,
            command,
        }
    }
}
