//! Match flow: phases, the controller state machine, events and replay.
//!
//! The controller is the only owner of the board and the resource ledger.
//! Hosts talk to it through submit calls (or `apply` with a `Command`) and
//! read back phase, board, ledger and drained events.

mod controller;
mod event;
mod history;
mod phase;

pub use controller::{MatchController, MatchSnapshot};
pub use event::MatchEvent;
pub use history::{commands_of, decode_history, encode_history};
pub use phase::{GameResult, Phase, WinReason};
