//! Combination attacks: spend stocked notes to damage the opponent.

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{MatchError, Player, Result};
use crate::ledger::{DamageOutcome, ResourceLedger};
use crate::quiz::NoteIndex;

/// Notes chosen for one attack.
pub type Notes = SmallVec<[NoteIndex; 8]>;

/// Interactive selection of stock slots.
///
/// Slots index into the acting player's stock as shown by the UI. Toggling
/// a slot twice removes it again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationSelection {
    slots: SmallVec<[usize; 8]>,
}

impl CombinationSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `slot` in or out of the selection. Fails for slots past the end
    /// of `stock_len`.
    ///
    /// Returns whether the slot is now selected.
    pub fn toggle(&mut self, slot: usize, stock_len: usize) -> Result<bool> {
        if slot >= stock_len {
            return Err(MatchError::InvalidSelection(format!(
                "slot {slot} is outside a stock of {stock_len}"
            )));
        }
        if let Some(idx) = self.slots.iter().position(|&s| s == slot) {
            self.slots.remove(idx);
            Ok(false)
        } else {
            self.slots.push(slot);
            Ok(true)
        }
    }

    #[must_use]
    pub fn is_selected(&self, slot: usize) -> bool {
        self.slots.contains(&slot)
    }

    #[must_use]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Resolve the selected slots against `stock`. Slots that no longer
    /// exist are dropped.
    pub fn notes<'a>(&self, stock: impl IntoIterator<Item = &'a NoteIndex>) -> Notes {
        let stock: Notes = stock.into_iter().copied().collect();
        let mut slots = self.slots.clone();
        slots.sort_unstable();
        slots.iter().filter_map(|&s| stock.get(s).copied()).collect()
    }
}

/// Report of a resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub attacker: Player,
    pub target: Player,
    /// Damage computed from the selection before shields.
    pub damage: u32,
    pub outcome: DamageOutcome,
    /// Number of notes spent.
    pub spent: usize,
}

/// Turns a selection into damage and stock consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationResolver {
    damage_per_note: u32,
}

impl CombinationResolver {
    #[must_use]
    pub fn new(damage_per_note: u32) -> Self {
        Self { damage_per_note }
    }

    #[must_use]
    pub fn damage_per_note(&self) -> u32 {
        self.damage_per_note
    }

    /// Check that `selection` is a sub-multiset of `player`'s stock.
    pub fn validate(ledger: &ResourceLedger, player: Player, selection: &[NoteIndex]) -> Result<()> {
        let mut wanted: FxHashMap<NoteIndex, usize> = FxHashMap::default();
        for &note in selection {
            *wanted.entry(note).or_insert(0) += 1;
        }

        let held = ledger.resources(player);
        for (&note, &count) in &wanted {
            let have = held.count_of(note);
            if count > have {
                return Err(MatchError::InvalidSelection(format!(
                    "{count} x {note} selected but only {have} in stock"
                )));
            }
        }
        Ok(())
    }

    /// Spend `selection` from `attacker`'s stock against the opponent.
    ///
    /// An empty selection deals nothing and still counts as the attack.
    /// On error nothing is mutated.
    pub fn resolve(
        &self,
        ledger: &mut ResourceLedger,
        attacker: Player,
        selection: &[NoteIndex],
    ) -> Result<AttackReport> {
        Self::validate(ledger, attacker, selection)?;

        let target = attacker.opponent();
        let damage = self.damage_per_note.saturating_mul(selection.len() as u32);
        let outcome = ledger.apply_damage(target, damage);
        ledger.consume_from_stock(attacker, selection);

        debug!("{attacker} spent {} notes for {damage} damage", selection.len());
        Ok(AttackReport {
            attacker,
            target,
            damage,
            outcome,
            spent: selection.len(),
        })
    }
}
