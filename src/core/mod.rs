//! Core engine types: players, RNG, configuration, errors, commands.
//!
//! These are the building blocks shared by the board, ledger, quiz and
//! combat modules. None of them know about phases or turn order.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod command;

pub use player::{Player, PlayerPair};
pub use rng::{GameRng, GameRngState};
pub use config::MatchConfig;
pub use error::{IllegalMoveReason, MatchError, Result};
pub use command::{Command, CommandRecord};
