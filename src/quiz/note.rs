//! Note symbols and the per-match flip-count mapping.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, MatchError, Result};

/// Number of distinct notes (one octave of scale degrees).
pub const NOTE_COUNT: usize = 7;

const NOTE_NAMES: [&str; NOTE_COUNT] = ["Do", "Re", "Mi", "Fa", "Sol", "La", "Si"];

/// One of the seven scale degrees. Opaque to the engine apart from equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct NoteIndex(u8);

impl NoteIndex {
    /// Every note in scale order.
    pub const ALL: [NoteIndex; NOTE_COUNT] = [
        NoteIndex(0),
        NoteIndex(1),
        NoteIndex(2),
        NoteIndex(3),
        NoteIndex(4),
        NoteIndex(5),
        NoteIndex(6),
    ];

    /// Validate a raw index from the UI.
    pub fn new(index: u8) -> Result<Self> {
        if (index as usize) < NOTE_COUNT {
            Ok(Self(index))
        } else {
            Err(MatchError::InvalidNote(index))
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Solfege name of the degree.
    ///
    /// ```
    /// use osero_duel::quiz::NoteIndex;
    ///
    /// assert_eq!(NoteIndex::new(0).unwrap().name(), "Do");
    /// assert_eq!(NoteIndex::new(6).unwrap().name(), "Si");
    /// ```
    #[must_use]
    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.index()]
    }
}

impl TryFrom<u8> for NoteIndex {
    type Error = MatchError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NoteIndex> for u8 {
    fn from(note: NoteIndex) -> Self {
        note.0
    }
}

impl std::fmt::Display for NoteIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed permutation of the seven notes, built once per match.
///
/// Flip count `n` always maps to `order[(n - 1) % 7]`, so two placements
/// flipping the same number of discs share a correct answer for the whole
/// match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteMapping {
    order: [NoteIndex; NOTE_COUNT],
}

impl NoteMapping {
    /// Shuffle the notes with the match RNG.
    #[must_use]
    pub fn generate(rng: &mut GameRng) -> Self {
        let mut order = NoteIndex::ALL;
        rng.shuffle(&mut order);
        Self { order }
    }

    /// Build a mapping from an explicit order. Fails unless every note
    /// appears exactly once.
    ///
    /// ```
    /// use osero_duel::quiz::NoteMapping;
    ///
    /// assert!(NoteMapping::from_order([3, 0, 5, 1, 6, 2, 4]).is_ok());
    /// assert!(NoteMapping::from_order([3, 3, 5, 1, 6, 2, 4]).is_err());
    /// ```
    pub fn from_order(raw: [u8; NOTE_COUNT]) -> Result<Self> {
        let mut order = NoteIndex::ALL;
        let mut seen = [false; NOTE_COUNT];
        for (slot, &value) in order.iter_mut().zip(raw.iter()) {
            let note = NoteIndex::new(value)?;
            if std::mem::replace(&mut seen[note.index()], true) {
                return Err(MatchError::InvalidConfig(format!(
                    "note mapping repeats {note}"
                )));
            }
            *slot = note;
        }
        Ok(Self { order })
    }

    /// Correct note for a placement that flipped `flip_count` discs.
    pub fn note_for(&self, flip_count: i32) -> Result<NoteIndex> {
        if flip_count <= 0 {
            return Err(MatchError::InvalidFlipCount(flip_count));
        }
        let base = (flip_count as usize - 1) % NOTE_COUNT;
        Ok(self.order[base])
    }

    #[must_use]
    pub fn order(&self) -> &[NoteIndex; NOTE_COUNT] {
        &self.order
    }
}
