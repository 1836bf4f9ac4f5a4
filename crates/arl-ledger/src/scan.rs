use crate::error::LedgerResult;

type ScanItems<'a> = Box<dyn Iterator<Item = LedgerResult<(String, Vec<u8>)>> + 'a>;

/// Handle over an open range scan.
///
/// Yields `(key, value)` pairs in ascending key order. The backend resource
/// behind the scan is released exactly once: by [`RangeScan::close`], or by
/// `Drop` on any other exit path (early return, `?`, unwinding).
pub struct RangeScan<'a> {
    items: ScanItems<'a>,
    release: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> RangeScan<'a> {
    /// Wrap an iterator of already-resolved entries.
    pub fn new<I>(items: I) -> Self
    where
        I: Iterator<Item = LedgerResult<(String, Vec<u8>)>> + 'a,
    {
        Self {
            items: Box::new(items),
            release: None,
        }
    }

    /// Wrap a fully materialized, ordered list of entries.
    pub fn from_entries(entries: Vec<(String, Vec<u8>)>) -> Self {
        Self::new(entries.into_iter().map(Ok))
    }

    /// Register the hook that releases the backend resource.
    pub fn on_release<F>(mut self, release: F) -> Self
    where
        F: FnOnce() + 'a,
    {
        self.release = Some(Box::new(release));
        self
    }

    /// Release the scan now.
    pub fn close(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Iterator for RangeScan<'_> {
    type Item = LedgerResult<(String, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }
}

impl Drop for RangeScan<'_> {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for RangeScan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeScan")
            .field("open", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn entries() -> Vec<(String, Vec<u8>)> {
        vec![("001".into(), b"a".to_vec()), ("002".into(), b"b".to_vec())]
    }

    #[test]
    fn close_releases_once() {
        let released = Cell::new(0);
        let scan = RangeScan::from_entries(entries()).on_release(|| released.set(released.get() + 1));
        scan.close();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn drop_releases_after_partial_iteration() {
        let released = Cell::new(0);
        {
            let mut scan =
                RangeScan::from_entries(entries()).on_release(|| released.set(released.get() + 1));
            let first = scan.next().unwrap().unwrap();
            assert_eq!(first.0, "001");
        }
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn yields_entries_in_order() {
        let keys: Vec<String> = RangeScan::from_entries(entries())
            .map(|item| item.unwrap().0)
            .collect();
        assert_eq!(keys, vec!["001", "002"]);
    }
}
