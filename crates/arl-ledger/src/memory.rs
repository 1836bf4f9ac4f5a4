use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::event::{EventBus, EventStream};
use crate::scan::RangeScan;
use crate::traits::Ledger;
use crate::transaction::Transaction;

pub(crate) type Entries = BTreeMap<String, Vec<u8>>;

/// In-memory, `BTreeMap`-based ledger.
///
/// Intended for tests, the CLI, and embedding. Entries live behind a
/// `RwLock`; calls made through the [`Ledger`] impl on this type each run as
/// their own transaction and publish events immediately. Use
/// [`InMemoryLedger::begin`] to group several calls atomically and
/// [`InMemoryLedger::read_view`] for consistent multi-key reads.
///
/// The lock is not reentrant: while a [`Transaction`] or [`ReadView`] is
/// alive on a thread, that thread must not call this type's own [`Ledger`]
/// methods.
#[derive(Debug)]
pub struct InMemoryLedger {
    entries: RwLock<Entries>,
    events: EventBus,
    open_scans: AtomicUsize,
}

impl InMemoryLedger {
    /// Create an empty ledger with default configuration.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create an empty ledger.
    pub fn with_config(config: LedgerConfig) -> Self {
        Self::from_entries(Entries::new(), config)
    }

    pub(crate) fn from_entries(entries: Entries, config: LedgerConfig) -> Self {
        Self {
            entries: RwLock::new(entries),
            events: EventBus::new(config.event_capacity),
            open_scans: AtomicUsize::new(0),
        }
    }

    /// Start a serializable write transaction.
    ///
    /// The transaction holds the write lock until it is committed or dropped.
    pub fn begin(&self) -> LedgerResult<Transaction<'_>> {
        let guard = self.write_entries()?;
        Ok(Transaction::new(self, guard))
    }

    /// Open a consistent read-only view.
    pub fn read_view(&self) -> LedgerResult<ReadView<'_>> {
        let guard = self.read_entries()?;
        Ok(ReadView {
            ledger: self,
            entries: guard,
        })
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> EventStream {
        self.events.subscribe()
    }

    /// The event bus backing this ledger.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Number of range scans not yet released.
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::SeqCst)
    }

    /// Number of stored keys.
    pub fn len(&self) -> LedgerResult<usize> {
        Ok(self.read_entries()?.len())
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.read_entries()?.is_empty())
    }

    /// All stored keys in ascending order.
    pub fn keys(&self) -> LedgerResult<Vec<String>> {
        Ok(self.read_entries()?.keys().cloned().collect())
    }

    pub(crate) fn read_entries(&self) -> LedgerResult<RwLockReadGuard<'_, Entries>> {
        self.entries.read().map_err(|_| LedgerError::LockPoisoned)
    }

    pub(crate) fn write_entries(&self) -> LedgerResult<RwLockWriteGuard<'_, Entries>> {
        self.entries.write().map_err(|_| LedgerError::LockPoisoned)
    }

    /// Wrap resolved entries in a scan that is counted until released.
    pub(crate) fn tracked_scan(&self, entries: Vec<(String, Vec<u8>)>) -> RangeScan<'_> {
        let open = &self.open_scans;
        open.fetch_add(1, Ordering::SeqCst);
        RangeScan::from_entries(entries).on_release(move || {
            open.fetch_sub(1, Ordering::SeqCst);
        })
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Clone out the entries with `start <= key <= end`.
pub(crate) fn collect_range(entries: &Entries, start: &str, end: &str) -> Vec<(String, Vec<u8>)> {
    // BTreeMap::range panics on an inverted range.
    if start > end {
        return Vec::new();
    }
    entries
        .range::<str, _>((Bound::Included(start), Bound::Included(end)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

impl Ledger for InMemoryLedger {
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> LedgerResult<()> {
        let len = value.len();
        self.write_entries()?.insert(key.to_string(), value);
        debug!(key, len, "put");
        Ok(())
    }

    fn delete(&self, key: &str) -> LedgerResult<()> {
        let existed = self.write_entries()?.remove(key).is_some();
        debug!(key, existed, "delete");
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> LedgerResult<RangeScan<'_>> {
        let entries = collect_range(&*self.read_entries()?, start, end);
        Ok(self.tracked_scan(entries))
    }

    fn emit_event(&self, name: &str, payload: Vec<u8>) -> LedgerResult<()> {
        self.events.publish(name.to_string(), payload);
        Ok(())
    }
}

/// Consistent read-only view over an [`InMemoryLedger`].
///
/// Holds the read lock for its lifetime, so every read made through the view
/// observes the same state. Writes and events fail with
/// [`LedgerError::ReadOnly`].
pub struct ReadView<'a> {
    ledger: &'a InMemoryLedger,
    entries: RwLockReadGuard<'a, Entries>,
}

impl Ledger for ReadView<'_> {
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&self, _key: &str, _value: Vec<u8>) -> LedgerResult<()> {
        Err(LedgerError::ReadOnly)
    }

    fn delete(&self, _key: &str) -> LedgerResult<()> {
        Err(LedgerError::ReadOnly)
    }

    fn range_scan(&self, start: &str, end: &str) -> LedgerResult<RangeScan<'_>> {
        let entries = collect_range(&self.entries, start, end);
        Ok(self.ledger.tracked_scan(entries))
    }

    fn emit_event(&self, _name: &str, _payload: Vec<u8>) -> LedgerResult<()> {
        Err(LedgerError::ReadOnly)
    }
}
