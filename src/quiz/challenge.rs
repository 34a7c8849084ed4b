//! Note-guessing rounds.
//!
//! A round starts after every successful placement. The correct note comes
//! from the match's `NoteMapping`; the player keeps guessing until they hit
//! it or run out of mistakes.

use log::debug;
use serde::{Deserialize, Serialize};

use super::note::{NoteIndex, NoteMapping};
use crate::core::Result;

/// Scratch state of one running round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRound {
    pub correct_note: NoteIndex,
    pub mistake_count: u32,
}

/// How a finished round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizOutcome {
    /// Guessed right; the note goes to the player's stock.
    Success(NoteIndex),
    /// Mistake budget exhausted. Carries the note that was never found.
    Failure(NoteIndex),
}

/// Result of a single guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessResult {
    /// Wrong, but the round is still open.
    Miss { mistakes_left: u32 },
    /// The round is over.
    Resolved(QuizOutcome),
}

/// Runs quiz rounds against a fixed mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizChallenge {
    mapping: NoteMapping,
    max_mistakes: u32,
    round: Option<QuizRound>,
}

impl QuizChallenge {
    #[must_use]
    pub fn new(mapping: NoteMapping, max_mistakes: u32) -> Self {
        Self {
            mapping,
            max_mistakes,
            round: None,
        }
    }

    #[must_use]
    pub fn mapping(&self) -> &NoteMapping {
        &self.mapping
    }

    #[must_use]
    pub fn max_mistakes(&self) -> u32 {
        self.max_mistakes
    }

    /// The running round, if any.
    #[must_use]
    pub fn round(&self) -> Option<&QuizRound> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.round.is_some()
    }

    /// Open a round for a placement that flipped `flip_count` discs.
    ///
    /// Returns the correct note so the caller can have it played.
    pub fn start(&mut self, flip_count: i32) -> Result<NoteIndex> {
        let correct_note = self.mapping.note_for(flip_count)?;
        self.round = Some(QuizRound {
            correct_note,
            mistake_count: 0,
        });
        debug!("quiz started for {flip_count} flips");
        Ok(correct_note)
    }

    /// Evaluate a guess. Returns `None` when no round is running.
    pub fn guess(&mut self, note: NoteIndex) -> Option<GuessResult> {
        let round = self.round.as_mut()?;

        if note == round.correct_note {
            let correct = round.correct_note;
            self.round = None;
            return Some(GuessResult::Resolved(QuizOutcome::Success(correct)));
        }

        round.mistake_count += 1;
        if round.mistake_count >= self.max_mistakes {
            let correct = round.correct_note;
            self.round = None;
            return Some(GuessResult::Resolved(QuizOutcome::Failure(correct)));
        }

        Some(GuessResult::Miss {
            mistakes_left: self.max_mistakes - round.mistake_count,
        })
    }

    /// Drop any running round.
    pub fn cancel(&mut self) {
        self.round = None;
    }
}
