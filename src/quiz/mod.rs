//! Note quiz: the challenge triggered by every placement.
//!
//! ## Mapping
//!
//! A `NoteMapping` is drawn once per match from the seeded RNG. It is never
//! regenerated mid-match, so a flip count keeps the same answer throughout.
//!
//! ## Rounds
//!
//! `QuizChallenge` holds the mapping plus at most one open `QuizRound`.

mod challenge;
mod note;

pub use challenge::{GuessResult, QuizChallenge, QuizOutcome, QuizRound};
pub use note::{NoteIndex, NoteMapping, NOTE_COUNT};
