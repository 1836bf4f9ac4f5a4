use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLockWriteGuard;

use tracing::debug;

use crate::error::LedgerResult;
use crate::event::LedgerEvent;
use crate::memory::{collect_range, Entries, InMemoryLedger};
use crate::scan::RangeScan;
use crate::traits::Ledger;

/// A staged write: `Some` to store a value, `None` to remove the key.
type Staged = BTreeMap<String, Option<Vec<u8>>>;

/// Serializable write transaction over an [`InMemoryLedger`].
///
/// Holds the ledger's write lock for its whole lifetime. Puts, deletes and
/// events are staged; reads and scans through the transaction observe the
/// staged writes. [`Transaction::commit`] applies every write and then
/// publishes the staged events. Dropping the transaction without committing
/// discards all of it.
pub struct Transaction<'a> {
    ledger: &'a InMemoryLedger,
    base: RwLockWriteGuard<'a, Entries>,
    staged: RefCell<Staged>,
    events: RefCell<Vec<(String, Vec<u8>)>>,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(ledger: &'a InMemoryLedger, base: RwLockWriteGuard<'a, Entries>) -> Self {
        Self {
            ledger,
            base,
            staged: RefCell::new(Staged::new()),
            events: RefCell::new(Vec::new()),
        }
    }

    /// Number of keys written or deleted so far.
    pub fn staged_writes(&self) -> usize {
        self.staged.borrow().len()
    }

    /// Number of events waiting for commit.
    pub fn staged_events(&self) -> usize {
        self.events.borrow().len()
    }

    /// Apply all staged writes, release the lock, then publish staged events.
    ///
    /// Returns the events as published.
    pub fn commit(self) -> Vec<LedgerEvent> {
        let Transaction {
            ledger,
            mut base,
            staged,
            events,
        } = self;

        let staged = staged.into_inner();
        let writes = staged.len();
        for (key, value) in staged {
            match value {
                Some(value) => {
                    base.insert(key, value);
                }
                None => {
                    base.remove(&key);
                }
            }
        }
        drop(base);

        let published: Vec<LedgerEvent> = events
            .into_inner()
            .into_iter()
            .map(|(name, payload)| ledger.events().publish(name, payload))
            .collect();

        debug!(writes, events = published.len(), "transaction committed");
        published
    }

    /// Discard all staged writes and events.
    pub fn rollback(self) {
        debug!(
            writes = self.staged_writes(),
            events = self.staged_events(),
            "transaction rolled back"
        );
    }
}

impl Ledger for Transaction<'_> {
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        if let Some(staged) = self.staged.borrow().get(key) {
            return Ok(staged.clone());
        }
        Ok(self.base.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> LedgerResult<()> {
        self.staged.borrow_mut().insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete(&self, key: &str) -> LedgerResult<()> {
        self.staged.borrow_mut().insert(key.to_string(), None);
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> LedgerResult<RangeScan<'_>> {
        let mut merged: Entries = collect_range(&self.base, start, end).into_iter().collect();
        if start <= end {
            let staged = self.staged.borrow();
            for (key, value) in staged.range::<str, _>((Bound::Included(start), Bound::Included(end))) {
                match value {
                    Some(value) => {
                        merged.insert(key.clone(), value.clone());
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            }
        }
        Ok(self.ledger.tracked_scan(merged.into_iter().collect()))
    }

    fn emit_event(&self, name: &str, payload: Vec<u8>) -> LedgerResult<()> {
        self.events.borrow_mut().push((name.to_string(), payload));
        Ok(())
    }
}
