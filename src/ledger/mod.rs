//! Resource ledger: health, shields and note stock for both players.
//!
//! Backed by `im::Vector` so whole-match snapshots clone in O(1).

mod resources;

pub use resources::{DamageOutcome, PlayerResources, ResourceLedger};
