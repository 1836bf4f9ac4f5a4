//! Record store for the Asset Record Ledger (ARL).
//!
//! [`RecordStore`] is a stateless handle over a borrowed [`Ledger`]. It owns
//! no storage and keeps no caches; every record lives in the ledger and every
//! operation runs inside whatever transaction the ledger provides.
//!
//! # Operations
//!
//! - Existence: [`RecordStore::exists`] and its per-kind aliases
//! - Lifecycle: create, read, update for all three kinds; delete for assets
//! - Gated read: [`RecordStore::read_asset`] releases an asset only to the
//!   holder of an approved authorization (see [`access`])
//! - Enumeration: [`RecordStore::list_all_assets`] over the fixed asset key
//!   range, with lenient decoding (see [`enumerate`])
//!
//! [`Ledger`]: arl_ledger::Ledger

pub mod access;
pub mod enumerate;
pub mod error;
pub mod store;

pub use access::{AccessCheck, AccessRequest, Denial, READ_ASSET_CHECKS};
pub use enumerate::{AssetEntry, EntryRecord};
pub use error::{StoreError, StoreResult};
pub use store::RecordStore;

// Re-export the record types so callers need only this crate.
pub use arl_types::{Asset, Authorization, Record, RecordKind, User};
