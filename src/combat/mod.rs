//! Combination attack phase.
//!
//! Damage is linear in the number of notes spent. Only the spent notes leave
//! the stock; the rest carries over to later turns.

mod resolver;

pub use resolver::{AttackReport, CombinationResolver, CombinationSelection, Notes};
