//! High-level SDK for the Asset Record Ledger.
//!
//! [`Registry`] is the caller-facing operation surface: every operation runs
//! as one ledger transaction (mutations) or one consistent read view
//! (queries), so a failed call has no observable effect.

pub mod error;
pub mod registry;

pub use error::{SdkError, SdkResult};
pub use registry::Registry;

// Re-export key types
pub use arl_ledger::{EventStream, InMemoryLedger, LedgerConfig, LedgerEvent};
pub use arl_store::{AssetEntry, Denial, EntryRecord};
pub use arl_types::{Asset, Authorization, RecordKind, User};
