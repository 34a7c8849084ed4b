//! # osero-duel
//!
//! A deterministic match engine for a two-player Reversi variant with two
//! extra mini-games bolted on: every placement opens a note-guessing quiz,
//! correct answers are stocked, and stocked notes are spent in a
//! combination attack against the opponent's health.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: The `MatchController` owns the board and the resource
//!    ledger. Nothing is global.
//!
//! 2. **Explicit Phases**: Turn flow is a single `Phase` value advanced
//!    synchronously by each submit call. Out-of-phase input is rejected
//!    without side effects.
//!
//! 3. **Replayable**: Randomness comes from a seeded ChaCha stream. A match
//!    is reproduced exactly from its `MatchConfig` and command history.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors, commands
//! - `board`: 8x8 disc grid, legal moves and flips
//! - `ledger`: Health, shields and note stock
//! - `quiz`: Note mapping and guessing rounds
//! - `combat`: Combination attacks
//! - `game`: Phase state machine, events, replay
//! - `adapters`: Renderer, audio, input and seed contracts

pub mod core;
pub mod board;
pub mod ledger;
pub mod quiz;
pub mod combat;
pub mod game;
pub mod adapters;

// Re-export commonly used types
pub use crate::core::{
    Player, PlayerPair,
    GameRng, GameRngState,
    MatchConfig, MatchError, IllegalMoveReason, Result,
    Command, CommandRecord,
};

pub use crate::board::{Board, Direction, Disc, FlipSet, Position};

pub use crate::ledger::{DamageOutcome, PlayerResources, ResourceLedger};

pub use crate::quiz::{GuessResult, NoteIndex, NoteMapping, QuizChallenge, QuizOutcome, QuizRound};

pub use crate::combat::{AttackReport, CombinationResolver, CombinationSelection, Notes};

pub use crate::game::{
    GameResult, MatchController, MatchEvent, MatchSnapshot, Phase, WinReason,
    commands_of, decode_history, encode_history,
};

pub use crate::adapters::{
    AudioPlayer, EntropySeed, FixedSeed, InputSource, Presenter, Renderer, ScriptedInput,
    SeedProvider, SessionSummary, run_session,
};
