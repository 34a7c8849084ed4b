//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! A match always has exactly two sides. Black moves first and is index 0,
//! White is index 1. There is no way to construct a third player.
//!
//! ## PlayerPair
//!
//! Fixed two-slot storage indexed by `Player`, used for every piece of
//! per-player state (health, shields, stock, selections).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::Black, Player::White];

    /// Get the raw player index (Black = 0, White = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }

    /// Convert a raw index back into a player.
    ///
    /// ```
    /// use osero_duel::core::Player;
    ///
    /// assert_eq!(Player::from_index(0), Some(Player::Black));
    /// assert_eq!(Player::from_index(1), Some(Player::White));
    /// assert_eq!(Player::from_index(2), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Player::Black),
            1 => Some(Player::White),
            _ => None,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use osero_duel::core::{Player, PlayerPair};
///
/// let mut health: PlayerPair<u32> = PlayerPair::with_value(100);
/// health[Player::White] = 85;
///
/// assert_eq!(health[Player::Black], 100);
/// assert_eq!(health[Player::White], 85);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create a pair with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Black), factory(Player::White)],
        }
    }

    /// Create a pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerPair<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
