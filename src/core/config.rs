//! Match configuration.
//!
//! Hosts configure the engine at match start by providing a `MatchConfig`.
//! The values are fixed for the lifetime of a match; `reset()` reuses them.

use serde::{Deserialize, Serialize};

use super::error::{MatchError, Result};

/// Default starting (and maximum) health for both players.
pub const DEFAULT_MAX_HEALTH: u32 = 100;

/// Default damage dealt per note spent in an attack.
pub const DEFAULT_DAMAGE_PER_NOTE: u32 = 10;

/// Default number of wrong guesses that ends a quiz round.
pub const DEFAULT_MAX_MISTAKES: u32 = 3;

/// Complete match configuration.
///
/// ```
/// use osero_duel::core::MatchConfig;
///
/// let config = MatchConfig::new(7).with_max_health(50);
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.max_health, 50);
/// assert_eq!(config.damage_per_note, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seed used once per match to build the note mapping.
    pub seed: u64,

    /// Starting health, also the heal cap.
    pub max_health: u32,

    /// Damage per note in a combination attack.
    pub damage_per_note: u32,

    /// Wrong guesses allowed before a quiz round fails.
    pub max_mistakes: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_health: DEFAULT_MAX_HEALTH,
            damage_per_note: DEFAULT_DAMAGE_PER_NOTE,
            max_mistakes: DEFAULT_MAX_MISTAKES,
        }
    }
}

impl MatchConfig {
    /// Create a configuration with default rules and the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the maximum health.
    #[must_use]
    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }

    /// Set the damage dealt per note.
    #[must_use]
    pub fn with_damage_per_note(mut self, damage: u32) -> Self {
        self.damage_per_note = damage;
        self
    }

    /// Set the mistake budget per quiz round.
    #[must_use]
    pub fn with_max_mistakes(mut self, max_mistakes: u32) -> Self {
        self.max_mistakes = max_mistakes;
        self
    }

    /// Reject configurations that would make a match meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.max_health == 0 {
            return Err(MatchError::InvalidConfig("max_health must be positive".into()));
        }
        if self.max_mistakes == 0 {
            return Err(MatchError::InvalidConfig("max_mistakes must be positive".into()));
        }
        Ok(())
    }
}
