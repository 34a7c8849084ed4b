//! Compact command logs for replay.
//!
//! A match is fully determined by its config and the accepted commands, so
//! the log is all that needs to be kept to reproduce one.

use crate::core::{Command, CommandRecord, Result};

/// Encode accepted commands with bincode.
pub fn encode_history<'a>(records: impl IntoIterator<Item = &'a CommandRecord>) -> Result<Vec<u8>> {
    let records: Vec<&CommandRecord> = records.into_iter().collect();
    Ok(bincode::serialize(&records)?)
}

/// Decode a log produced by `encode_history`.
pub fn decode_history(bytes: &[u8]) -> Result<Vec<CommandRecord>> {
    Ok(bincode::deserialize(bytes)?)
}

/// Strip metadata, keeping the commands in order.
pub fn commands_of<'a>(records: impl IntoIterator<Item = &'a CommandRecord>) -> Vec<Command> {
    records.into_iter().map(|r| r.command.clone()).collect()
}
