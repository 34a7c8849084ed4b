//! Seed sources for the note mapping.

/// Supplies the seed that builds a match's note mapping.
pub trait SeedProvider {
    fn seed(&mut self) -> u64;
}

/// Always hands out the same seed. Used for replays and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedSeed(pub u64);

impl SeedProvider for FixedSeed {
    fn seed(&mut self) -> u64 {
        self.0
    }
}

/// Draws a fresh seed from the thread RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntropySeed;

impl SeedProvider for EntropySeed {
    fn seed(&mut self) -> u64 {
        rand::random()
    }
}
