use arl_ledger::Ledger;
use arl_types::{Asset, Authorization, Record, RecordKind, User, RECORD_EVENT};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Stateless record store over a borrowed ledger.
///
/// Presence is kind-agnostic: a key holds a record iff the ledger stores a
/// non-empty value there, whichever kind wrote it. The per-kind methods
/// (`user_exists`, `create_user`, ...) only fix the schema used to encode or
/// decode the value.
pub struct RecordStore<'l, L: Ledger + ?Sized> {
    ledger: &'l L,
}

impl<'l, L: Ledger + ?Sized> RecordStore<'l, L> {
    /// Wrap a ledger. The store adds no state of its own.
    pub fn new(ledger: &'l L) -> Self {
        Self { ledger }
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &'l L {
        self.ledger
    }

    // ---- Generic core ----

    /// Returns `true` iff a non-empty value is stored at `key`.
    pub fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.fetch(key)?.is_some())
    }

    /// Fail with `NotFound` (reported as `kind`) unless `key` holds a record.
    pub(crate) fn require(&self, kind: RecordKind, key: &str) -> StoreResult<()> {
        if self.exists(key)? {
            Ok(())
        } else {
            Err(StoreError::not_found(kind, key))
        }
    }

    /// Store `record` at a free `key` and publish a creation event.
    pub fn create<R: Record>(&self, key: &str, record: &R) -> StoreResult<()> {
        if self.exists(key)? {
            return Err(StoreError::AlreadyExists {
                kind: R::KIND,
                key: key.to_string(),
            });
        }

        self.ledger.put(key, encode(key, record)?)?;
        self.ledger
            .emit_event(RECORD_EVENT, record.event_summary(key).into_bytes())?;
        debug!(kind = %R::KIND, key, "record created");
        Ok(())
    }

    /// Decode the record stored at `key`.
    ///
    /// Undecodable bytes are a hard [`StoreError::Decode`] failure.
    pub fn read<R: Record>(&self, key: &str) -> StoreResult<R> {
        let bytes = self
            .fetch(key)?
            .ok_or_else(|| StoreError::not_found(R::KIND, key))?;
        R::decode(&bytes).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
    }

    /// Replace the record at an occupied `key` wholesale. No event is
    /// published.
    pub fn update<R: Record>(&self, key: &str, record: &R) -> StoreResult<()> {
        self.require(R::KIND, key)?;
        self.ledger.put(key, encode(key, record)?)?;
        debug!(kind = %R::KIND, key, "record updated");
        Ok(())
    }

    fn fetch(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.ledger.get(key)?.filter(|value| !value.is_empty()))
    }

    // ---- Existence ----

    pub fn asset_exists(&self, asset_id: &str) -> StoreResult<bool> {
        self.exists(asset_id)
    }

    pub fn user_exists(&self, user_id: &str) -> StoreResult<bool> {
        self.exists(user_id)
    }

    pub fn authorization_exists(&self, auth_code: &str) -> StoreResult<bool> {
        self.exists(auth_code)
    }

    // ---- Assets ----

    /// Create the asset stored under `asset_id`.
    pub fn create_asset(&self, asset_id: &str, asset: &Asset) -> StoreResult<()> {
        self.create(asset_id, asset)
    }

    /// Replace the asset stored under `asset_id`.
    pub fn update_asset(&self, asset_id: &str, asset: &Asset) -> StoreResult<()> {
        self.update(asset_id, asset)
    }

    /// Ungated asset read. Prefer [`RecordStore::read_asset`] wherever the
    /// caller acts for a particular user.
    pub fn get_asset(&self, asset_id: &str) -> StoreResult<Asset> {
        self.read(asset_id)
    }

    /// Remove the asset stored under `asset_id`.
    pub fn delete_asset(&self, asset_id: &str) -> StoreResult<()> {
        self.require(RecordKind::Asset, asset_id)?;
        self.ledger.delete(asset_id)?;
        debug!(key = asset_id, "asset deleted");
        Ok(())
    }

    // ---- Users ----

    /// Create a user under its own `UserId`.
    pub fn create_user(&self, user: &User) -> StoreResult<()> {
        self.create(&user.user_id, user)
    }

    /// Replace the user stored under `user.user_id`.
    pub fn update_user(&self, user: &User) -> StoreResult<()> {
        self.update(&user.user_id, user)
    }

    pub fn read_user(&self, user_id: &str) -> StoreResult<User> {
        self.read(user_id)
    }

    // ---- Authorizations ----

    /// Record a new grant under its own `AuthCode`.
    pub fn grant_authorization(&self, grant: &Authorization) -> StoreResult<()> {
        self.create(&grant.auth_code, grant)
    }

    /// Replace the grant stored under `grant.auth_code`.
    pub fn update_authorization(&self, grant: &Authorization) -> StoreResult<()> {
        self.update(&grant.auth_code, grant)
    }

    pub fn read_authorization(&self, auth_code: &str) -> StoreResult<Authorization> {
        self.read(auth_code)
    }
}

fn encode<R: Record>(key: &str, record: &R) -> StoreResult<Vec<u8>> {
    record.encode().map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}
