//! JSON snapshot persistence for [`InMemoryLedger`].
//!
//! A snapshot is a versioned document mapping each key to its hex-encoded
//! value:
//!
//! ```json
//! { "version": 1, "entries": { "023": "7b224944223a...", "...": "..." } }
//! ```
//!
//! Saving writes a temporary file next to the target and renames it into
//! place, so a crash never leaves a half-written snapshot behind.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::memory::{Entries, InMemoryLedger};

/// Snapshot format version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    entries: BTreeMap<String, String>,
}

impl InMemoryLedger {
    /// Load a ledger from the snapshot at `path`.
    pub fn load(path: &Path, config: LedgerConfig) -> LedgerResult<Self> {
        let bytes = std::fs::read(path)?;
        let file: SnapshotFile = serde_json::from_slice(&bytes)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        if file.version != SNAPSHOT_VERSION {
            return Err(LedgerError::UnsupportedSnapshotVersion {
                found: file.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut entries = Entries::new();
        for (key, value) in file.entries {
            let value = hex::decode(&value).map_err(|e| {
                LedgerError::Serialization(format!("invalid hex value for key {key}: {e}"))
            })?;
            entries.insert(key, value);
        }

        info!(path = %path.display(), entries = entries.len(), "snapshot loaded");
        Ok(Self::from_entries(entries, config))
    }

    /// Load the snapshot at `path`, or start empty if no file exists there.
    pub fn load_or_default(path: &Path, config: LedgerConfig) -> LedgerResult<Self> {
        if path.exists() {
            Self::load(path, config)
        } else {
            info!(path = %path.display(), "no snapshot found; starting empty");
            Ok(Self::with_config(config))
        }
    }

    /// Atomically write a snapshot of the current state to `path`.
    pub fn save(&self, path: &Path) -> LedgerResult<()> {
        let file = {
            let entries = self.read_entries()?;
            SnapshotFile {
                version: SNAPSHOT_VERSION,
                entries: entries
                    .iter()
                    .map(|(k, v)| (k.clone(), hex::encode(v)))
                    .collect(),
            }
        };
        let json = serde_json::to_vec_pretty(&file)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| LedgerError::Io(e.error))?;

        info!(path = %path.display(), entries = file.entries.len(), "snapshot saved");
        Ok(())
    }
}
