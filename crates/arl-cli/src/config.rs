use std::path::{Path, PathBuf};

use anyhow::Context;
use arl_sdk::LedgerConfig;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "arl.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArlConfig {
    /// Snapshot file holding the ledger between invocations.
    pub ledger_path: PathBuf,
    /// Capacity of the ledger's event channel.
    pub event_capacity: usize,
}

impl Default for ArlConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("arl-ledger.json"),
            event_capacity: LedgerConfig::default().event_capacity,
        }
    }
}

impl ArlConfig {
    /// Parse the TOML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `explicit` if given, else `arl.toml` if present, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            event_capacity: self.event_capacity,
        }
    }
}
