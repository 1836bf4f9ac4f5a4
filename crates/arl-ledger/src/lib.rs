//! Ledger collaborator for the Asset Record Ledger (ARL).
//!
//! Records are never stored by ARL itself. They live in an ordered,
//! transactional key-value ledger reached through the [`Ledger`] trait:
//! point reads and writes, deletes, inclusive range scans, and a
//! fire-and-forget event publish.
//!
//! # Backends
//!
//! - [`InMemoryLedger`] -- `BTreeMap`-based ledger for tests, the CLI, and
//!   embedding. Calls made directly on it auto-commit.
//! - [`Transaction`] -- a serializable write transaction over an
//!   [`InMemoryLedger`]; writes and events become visible only on commit.
//! - [`ReadView`] -- a consistent read-only view for multi-key read
//!   sequences.
//!
//! Snapshots of an [`InMemoryLedger`] can be saved to and loaded from a JSON
//! file (see [`snapshot`]).

pub mod config;
pub mod error;
pub mod event;
pub mod memory;
pub mod scan;
pub mod snapshot;
pub mod traits;
pub mod transaction;

pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use event::{EventBus, EventStream, LedgerEvent};
pub use memory::{InMemoryLedger, ReadView};
pub use scan::RangeScan;
pub use snapshot::SNAPSHOT_VERSION;
pub use traits::Ledger;
pub use transaction::Transaction;
