use serde::{Deserialize, Serialize};

/// Tuning for an [`InMemoryLedger`](crate::InMemoryLedger).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Capacity of the event broadcast channel. Subscribers that fall more
    /// than this many events behind miss the oldest ones.
    pub event_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            event_capacity: 1024,
        }
    }
}
