//! Per-player health, shield and note stock.

use im::Vector;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerPair};
use crate::quiz::NoteIndex;

/// Resources of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResources {
    /// Always within `[0, max_health]`.
    pub health: u32,

    /// Absorbs the next incoming attack.
    pub shield: bool,

    /// Notes earned from quiz rounds, in the order they were earned.
    pub stock: Vector<NoteIndex>,
}

impl PlayerResources {
    #[must_use]
    pub fn new(health: u32) -> Self {
        Self {
            health,
            shield: false,
            stock: Vector::new(),
        }
    }

    /// Occurrences of `note` in the stock.
    #[must_use]
    pub fn count_of(&self, note: NoteIndex) -> usize {
        self.stock.iter().filter(|&&n| n == note).count()
    }
}

/// What happened to an incoming hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// The shield took the hit and is now gone.
    Absorbed,
    /// Health dropped by `dealt` (clamped at zero).
    Dealt { dealt: u32, remaining: u32 },
}

/// Health, shields and stock for both players.
///
/// Owned by the match controller. Never shared or global.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    max_health: u32,
    players: PlayerPair<PlayerResources>,
}

impl ResourceLedger {
    /// Both players at full health, unshielded, with empty stock.
    #[must_use]
    pub fn new(max_health: u32) -> Self {
        Self {
            max_health,
            players: PlayerPair::new(|_| PlayerResources::new(max_health)),
        }
    }

    #[must_use]
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    #[must_use]
    pub fn resources(&self, player: Player) -> &PlayerResources {
        &self.players[player]
    }

    #[must_use]
    pub fn health(&self, player: Player) -> u32 {
        self.players[player].health
    }

    #[must_use]
    pub fn has_shield(&self, player: Player) -> bool {
        self.players[player].shield
    }

    /// True once the player's health has reached zero.
    #[must_use]
    pub fn is_knocked_out(&self, player: Player) -> bool {
        self.players[player].health == 0
    }

    /// Hit `target` for `amount`. A raised shield absorbs the whole hit.
    pub fn apply_damage(&mut self, target: Player, amount: u32) -> DamageOutcome {
        let res = &mut self.players[target];
        if res.shield {
            res.shield = false;
            info!("{target} blocked {amount} damage with a shield");
            return DamageOutcome::Absorbed;
        }

        let dealt = amount.min(res.health);
        res.health -= dealt;
        debug!("{target} took {dealt} damage, {} left", res.health);
        DamageOutcome::Dealt {
            dealt,
            remaining: res.health,
        }
    }

    /// Restore health up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, target: Player, amount: u32) -> u32 {
        let res = &mut self.players[target];
        let healed = amount.min(self.max_health - res.health);
        res.health += healed;
        debug!("{target} healed {healed}, now {}", res.health);
        healed
    }

    pub fn set_shield(&mut self, target: Player, active: bool) {
        self.players[target].shield = active;
    }

    pub fn add_to_stock(&mut self, player: Player, note: NoteIndex) {
        let stock = &mut self.players[player].stock;
        stock.push_back(note);
        debug!("{player} stocked {note} ({} total)", stock.len());
    }

    /// Remove one occurrence per listed note. Notes that are not (or no
    /// longer) present are skipped.
    pub fn consume_from_stock(&mut self, player: Player, notes: &[NoteIndex]) {
        let stock = &mut self.players[player].stock;
        for note in notes {
            if let Some(idx) = stock.index_of(note) {
                stock.remove(idx);
            }
        }
    }

    /// Read-only view of a player's stock.
    #[must_use]
    pub fn stock_of(&self, player: Player) -> &Vector<NoteIndex> {
        &self.players[player].stock
    }
}
