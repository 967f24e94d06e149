//! Machine configuration.

use serde::{Deserialize, Serialize};

/// History records kept when no limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 128;

/// Runtime settings for a [`Machine`](crate::machine::Machine).
///
/// Every field has a default, so partial documents deserialize:
///
/// ```rust
/// use ufsm::machine::MachineConfig;
///
/// let config: MachineConfig = serde_json::from_str(r#"{ "history_limit": 16 }"#).unwrap();
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(16));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Record each applied transition in the machine's history
    pub record_history: bool,

    /// Keep at most this many history records (oldest dropped first).
    /// `None` keeps every record for the machine's lifetime.
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Configuration that records no history.
    pub fn without_history() -> Self {
        Self {
            record_history: false,
            history_limit: None,
        }
    }
}
