//! Errors raised while encoding, decoding or restoring snapshots.

use crate::core::StateId;
use std::fmt;
use thiserror::Error;

/// Wire format of an encoded snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Binary,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Json => f.write_str("JSON"),
            Encoding::Binary => f.write_str("binary"),
        }
    }
}

/// Why a snapshot could not be produced or used.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The snapshot could not be written in the requested encoding
    #[error("cannot encode snapshot as {encoding}: {reason}")]
    Encode { encoding: Encoding, reason: String },

    /// The input is not a well-formed snapshot
    #[error("cannot decode {encoding} snapshot: {reason}")]
    Decode { encoding: Encoding, reason: String },

    #[error("snapshot format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The last history record does not lead to the recorded current state
    #[error("snapshot history ends in [{history_end}] but its current state is [{current}]")]
    HistoryMismatch { history_end: StateId, current: StateId },

    /// A history record is newer than the snapshot itself
    #[error("snapshot history reaches sequence {history} but the snapshot is at {snapshot}")]
    SequenceAhead { history: u64, snapshot: u64 },
}
