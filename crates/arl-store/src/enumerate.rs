//! Enumeration of the asset key range.
//!
//! Every key from [`ASSET_RANGE_START`] to [`ASSET_RANGE_END`] inclusive is
//! listed in ascending order. Decoding is lenient: a value that is not valid
//! JSON is returned as its raw text instead of failing the whole listing.

use arl_ledger::Ledger;
use arl_types::{Asset, ASSET_RANGE_END, ASSET_RANGE_START};
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::RecordStore;

/// One enumerated ledger entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssetEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: EntryRecord,
}

/// The value of an enumerated entry, decoded if possible.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntryRecord {
    /// The value parsed as JSON.
    Decoded(serde_json::Value),
    /// The value did not parse; its bytes as (lossy) UTF-8 text.
    Raw(String),
}

impl EntryRecord {
    /// Decode stored bytes, falling back to raw text.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(value) => Self::Decoded(value),
            Err(_) => Self::Raw(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    /// Returns `true` if decoding fell back to raw text.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Interpret a decoded value as an [`Asset`], if it has that shape.
    pub fn as_asset(&self) -> Option<Asset> {
        match self {
            Self::Decoded(value @ serde_json::Value::Object(_)) => {
                serde_json::from_value(value.clone()).ok()
            }
            _ => None,
        }
    }
}

impl<L: Ledger + ?Sized> RecordStore<'_, L> {
    /// List every entry in the asset key range, in ascending key order.
    ///
    /// Each call re-scans from the start. Entries with an empty value hold no
    /// record and are skipped. The scan is released on every exit path.
    pub fn list_all_assets(&self) -> StoreResult<Vec<AssetEntry>> {
        let mut scan = self
            .ledger()
            .range_scan(ASSET_RANGE_START, ASSET_RANGE_END)?;

        let mut entries = Vec::new();
        let mut raw = 0usize;
        for item in scan.by_ref() {
            let (key, value) = item?;
            if value.is_empty() {
                continue;
            }
            let record = EntryRecord::from_bytes(&value);
            if record.is_raw() {
                raw += 1;
                debug!(key = %key, "entry is not JSON; returning raw text");
            }
            entries.push(AssetEntry { key, record });
        }
        scan.close();

        debug!(count = entries.len(), raw, "asset range enumerated");
        Ok(entries)
    }

    /// [`RecordStore::list_all_assets`] rendered as a JSON array of
    /// `{"Key": ..., "Record": ...}` objects.
    pub fn list_all_assets_json(&self) -> StoreResult<String> {
        let entries = self.list_all_assets()?;
        serde_json::to_string(&entries).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use arl_ledger::{InMemoryLedger, LedgerError, LedgerResult, RangeScan};

    use super::*;
    use crate::store::tests::asset;

    #[test]
    fn lists_range_in_ascending_order() {
        let ledger = InMemoryLedger::new();
        let store = RecordStore::new(&ledger);
        store.create_asset("500", &asset("XRAY")).unwrap();
        store.create_asset("001", &asset("MC")).unwrap();
        ledger.put("ABC", b"{}".to_vec()).unwrap();
        ledger.put("00", b"{}".to_vec()).unwrap();

        let entries = store.list_all_assets().unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["001", "500"]);
        assert_eq!(entries[0].record.as_asset(), Some(asset("MC")));
        assert_eq!(ledger.open_scans(), 0);
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let ledger = InMemoryLedger::new();
        let store = RecordStore::new(&ledger);
        store.create_asset("000", &asset("MC")).unwrap();
        store.create_asset("999", &asset("MC")).unwrap();
        store.create_asset("9990", &asset("MC")).unwrap();

        let keys: Vec<String> = store
            .list_all_assets()
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["000", "999"]);
    }

    #[test]
    fn empty_ledger_lists_nothing_and_releases_scan() {
        let ledger = InMemoryLedger::new();
        let store = RecordStore::new(&ledger);
        assert!(store.list_all_assets().unwrap().is_empty());
        assert_eq!(store.list_all_assets_json().unwrap(), "[]");
        assert_eq!(ledger.open_scans(), 0);
    }

    #[test]
    fn undecodable_value_falls_back_to_raw_text() {
        let ledger = InMemoryLedger::new();
        let store = RecordStore::new(&ledger);
        store.create_asset("001", &asset("MC")).unwrap();
        ledger.put("002", b"plain text".to_vec()).unwrap();

        let entries = store.list_all_assets().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].record, EntryRecord::Raw("plain text".into()));
        assert!(!entries[0].record.is_raw());
    }

    #[test]
    fn empty_values_are_skipped() {
        let ledger = InMemoryLedger::new();
        ledger.put("001", Vec::new()).unwrap();
        let store = RecordStore::new(&ledger);
        assert!(store.list_all_assets().unwrap().is_empty());
    }

    #[test]
    fn users_in_range_are_listed_too() {
        let ledger = InMemoryLedger::new();
        let store = RecordStore::new(&ledger);
        store.create_user(&crate::store::tests::user("022")).unwrap();

        let entries = store.list_all_assets().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "022");
        assert!(!entries[0].record.is_raw());
        // Users share the "Type" field name with assets.
        assert_eq!(
            entries[0].record.as_asset().map(|a| a.asset_type),
            Some("Patient".to_string())
        );
    }

    #[test]
    fn json_rendering_uses_key_and_record() {
        let ledger = InMemoryLedger::new();
        ledger.put("001", br#"{"Type":"MC"}"#.to_vec()).unwrap();
        ledger.put("002", b"oops".to_vec()).unwrap();
        let store = RecordStore::new(&ledger);

        assert_eq!(
            store.list_all_assets_json().unwrap(),
            r#"[{"Key":"001","Record":{"Type":"MC"}},{"Key":"002","Record":"oops"}]"#
        );
    }

    /// Ledger whose scans fail after the first entry and count releases.
    struct FailingScanLedger {
        released: Cell<usize>,
    }

    impl Ledger for FailingScanLedger {
        fn get(&self, _key: &str) -> LedgerResult<Option<Vec<u8>>> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: Vec<u8>) -> LedgerResult<()> {
            Ok(())
        }

        fn delete(&self, _key: &str) -> LedgerResult<()> {
            Ok(())
        }

        fn range_scan(&self, _start: &str, _end: &str) -> LedgerResult<RangeScan<'_>> {
            let items = vec![
                Ok(("001".to_string(), b"{}".to_vec())),
                Err(LedgerError::LockPoisoned),
                Ok(("003".to_string(), b"{}".to_vec())),
            ];
            Ok(RangeScan::new(items.into_iter())
                .on_release(|| self.released.set(self.released.get() + 1)))
        }

        fn emit_event(&self, _name: &str, _payload: Vec<u8>) -> LedgerResult<()> {
            Ok(())
        }
    }

    #[test]
    fn scan_error_aborts_and_still_releases() {
        let ledger = FailingScanLedger {
            released: Cell::new(0),
        };
        let store = RecordStore::new(&ledger);

        let err = store.list_all_assets().unwrap_err();
        assert!(matches!(err, StoreError::Ledger(LedgerError::LockPoisoned)));
        assert_eq!(ledger.released.get(), 1);
    }

    #[test]
    fn successful_scan_releases_exactly_once() {
        struct OkLedger(Cell<usize>);
        impl Ledger for OkLedger {
            fn get(&self, _key: &str) -> LedgerResult<Option<Vec<u8>>> {
                Ok(None)
            }
            fn put(&self, _key: &str, _value: Vec<u8>) -> LedgerResult<()> {
                Ok(())
            }
            fn delete(&self, _key: &str) -> LedgerResult<()> {
                Ok(())
            }
            fn range_scan(&self, _start: &str, _end: &str) -> LedgerResult<RangeScan<'_>> {
                Ok(RangeScan::from_entries(vec![("001".into(), b"1".to_vec())])
                    .on_release(|| self.0.set(self.0.get() + 1)))
            }
            fn emit_event(&self, _name: &str, _payload: Vec<u8>) -> LedgerResult<()> {
                Ok(())
            }
        }

        let ledger = OkLedger(Cell::new(0));
        let entries = RecordStore::new(&ledger).list_all_assets().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(ledger.0.get(), 1);
    }
}
