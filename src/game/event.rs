//! Outcome events emitted by the controller for presentation.
//!
//! The controller queues events as it processes commands; the host drains
//! them and hands them to its renderer and audio player. Events are pure
//! reports and never feed back into the engine.

use serde::{Deserialize, Serialize};

use super::phase::GameResult;
use crate::board::Position;
use crate::combat::AttackReport;
use crate::core::Player;
use crate::ledger::DamageOutcome;
use crate::quiz::NoteIndex;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A new match began.
    MatchStarted,
    /// `player` may place a disc.
    TurnStarted { player: Player, turn: u32 },
    DiscPlaced {
        player: Player,
        pos: Position,
        flipped: usize,
    },
    /// A quiz round opened; `note` is the clip to play.
    QuizStarted { player: Player, note: NoteIndex },
    GuessMade {
        player: Player,
        note: NoteIndex,
        correct: bool,
    },
    StockAdded { player: Player, note: NoteIndex },
    QuizFailed { player: Player },
    AttackPhaseStarted { player: Player, stock: usize },
    AttackResolved(AttackReport),
    Healed { player: Player, amount: u32 },
    ShieldChanged { player: Player, active: bool },
    /// `player` had no legal placement and was skipped.
    Passed { player: Player },
    GameOver(GameResult),
}

impl std::fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchEvent::MatchStarted => write!(f, "match started"),
            MatchEvent::TurnStarted { player, turn } => write!(f, "turn {turn}: {player} to place"),
            MatchEvent::DiscPlaced {
                player,
                pos,
                flipped,
            } => write!(f, "{player} placed at {pos} and flipped {flipped}"),
            MatchEvent::QuizStarted { player, .. } => write!(f, "{player}, name that note"),
            MatchEvent::GuessMade {
                player,
                note,
                correct,
            } => {
                let verdict = if *correct { "correct" } else { "wrong" };
                write!(f, "{player} guessed {note}: {verdict}")
            }
            MatchEvent::StockAdded { player, note } => write!(f, "{player} stocked {note}"),
            MatchEvent::QuizFailed { player } => write!(f, "{player} ran out of guesses"),
            MatchEvent::AttackPhaseStarted { player, stock } => {
                write!(f, "{player} may attack with {stock} stocked notes")
            }
            MatchEvent::AttackResolved(report) => match report.outcome {
                DamageOutcome::Absorbed => write!(f, "{}'s shield blocked the attack", report.target),
                DamageOutcome::Dealt { dealt, remaining } => {
                    write!(f, "{} took {dealt} damage ({remaining} left)", report.target)
                }
            },
            MatchEvent::Healed { player, amount } => write!(f, "{player} healed {amount}"),
            MatchEvent::ShieldChanged { player, active } => {
                let state = if *active { "raised" } else { "lowered" };
                write!(f, "{player} {state} a shield")
            }
            MatchEvent::Passed { player } => write!(f, "{player} has no move and passes"),
            MatchEvent::GameOver(result) => write!(f, "game over: {result}"),
        }
    }
}
