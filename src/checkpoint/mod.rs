//! Snapshot and resume of a machine's runtime position.
//!
//! A snapshot captures where a machine is (current state, history and
//! transition count), never what it is: transition tables, predicates and
//! subscribers are code and must be registered again before restoring.

use crate::core::{StateHistory, StateId};
use crate::machine::Machine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, Encoding};

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a machine's position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Current state of the machine
    pub current_state: StateId,

    /// Number of transitions applied so far
    pub sequence: u64,

    /// Recorded transition history
    pub history: StateHistory,
}

impl Snapshot {
    /// Encode as a JSON document.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::Encode {
            encoding: Encoding::Json,
            reason: e.to_string(),
        })
    }

    /// Decode and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let snapshot: Self = serde_json::from_str(json).map_err(|e| CheckpointError::Decode {
            encoding: Encoding::Json,
            reason: e.to_string(),
        })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Encode in the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode {
            encoding: Encoding::Binary,
            reason: e.to_string(),
        })
    }

    /// Decode and validate the compact binary format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let snapshot: Self = bincode::deserialize(bytes).map_err(|e| CheckpointError::Decode {
            encoding: Encoding::Binary,
            reason: e.to_string(),
        })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the version and that the history ends where the machine stands.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        if let Some(last) = self.history.last() {
            if last.to != self.current_state {
                return Err(CheckpointError::HistoryMismatch {
                    history_end: last.to.clone(),
                    current: self.current_state.clone(),
                });
            }
            if last.sequence > self.sequence {
                return Err(CheckpointError::SequenceAhead {
                    history: last.sequence,
                    snapshot: self.sequence,
                });
            }
        }

        Ok(())
    }
}

impl<I> Machine<I> {
    /// Capture the machine's current position.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            current_state: self.current_state().clone(),
            sequence: self.sequence(),
            history: self.history().clone(),
        }
    }

    /// Move the machine to the position recorded in `snapshot`.
    ///
    /// The restored history follows this machine's configuration: it is
    /// dropped when history is not recorded and trimmed to the newest
    /// `history_limit` records otherwise. No notifications are scheduled:
    /// restoring is not a transition.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), CheckpointError> {
        snapshot.validate()?;

        let mut history = snapshot.history.clone();
        let config = self.config();
        if !config.record_history {
            history.clear();
        } else if let Some(limit) = config.history_limit {
            history.retain_last(limit);
        }

        tracing::debug!(
            snapshot = %snapshot.id,
            current = %snapshot.current_state,
            sequence = snapshot.sequence,
            recorded = snapshot.history.len(),
            kept = history.len(),
            "restoring machine from snapshot"
        );
        self.reset_position(snapshot.current_state.clone(), history, snapshot.sequence);
        Ok(())
    }
}
