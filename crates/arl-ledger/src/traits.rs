use crate::error::LedgerResult;
use crate::scan::RangeScan;

/// Ordered, transactional key-value ledger.
///
/// Every call is a potential suspension point: implementations may block on
/// I/O and apply their own timeout and retry policy. Isolation between
/// concurrent callers is the implementation's responsibility.
///
/// Implementations must satisfy these invariants:
/// - Keys order by their UTF-8 bytes.
/// - `put` then `get` of the same key within one transaction observes the
///   written value.
/// - `range_scan` never observes writes made after it was opened.
/// - `emit_event` never fails because nobody is listening.
pub trait Ledger {
    /// Read the value stored at `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored there.
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// Store `value` at `key`, replacing any previous value.
    fn put(&self, key: &str, value: Vec<u8>) -> LedgerResult<()>;

    /// Remove the value at `key`. Removing an absent key is a no-op.
    fn delete(&self, key: &str) -> LedgerResult<()>;

    /// Iterate `(key, value)` pairs with `start <= key <= end` in ascending
    /// key order. An inverted range yields nothing.
    ///
    /// The returned [`RangeScan`] holds backend resources until it is closed
    /// or dropped.
    fn range_scan(&self, start: &str, end: &str) -> LedgerResult<RangeScan<'_>>;

    /// Publish a named event. Delivery is at-most-once with no
    /// acknowledgment; in a transaction the event is published on commit.
    fn emit_event(&self, name: &str, payload: Vec<u8>) -> LedgerResult<()>;
}
