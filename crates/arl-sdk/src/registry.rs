use std::path::Path;

use arl_ledger::{EventStream, InMemoryLedger, LedgerConfig, ReadView, Transaction};
use arl_store::{AssetEntry, RecordStore, StoreResult};
use arl_types::{Asset, Authorization, User};
use tracing::debug;

use crate::error::SdkResult;

/// Caller-facing ARL API over an owned in-memory ledger.
///
/// Mutations run in a ledger transaction that commits only when the
/// operation succeeds; queries run against a consistent read view. The
/// registry itself holds nothing but the ledger.
#[derive(Debug, Default)]
pub struct Registry {
    ledger: InMemoryLedger,
}

impl Registry {
    /// Create a registry over an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry over an existing ledger.
    pub fn with_ledger(ledger: InMemoryLedger) -> Self {
        Self { ledger }
    }

    /// Open the snapshot at `path`, starting empty if it does not exist.
    pub fn open(path: &Path, config: LedgerConfig) -> SdkResult<Self> {
        Ok(Self::with_ledger(InMemoryLedger::load_or_default(path, config)?))
    }

    /// Save a snapshot of the ledger to `path`.
    pub fn save(&self, path: &Path) -> SdkResult<()> {
        Ok(self.ledger.save(path)?)
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> InMemoryLedger {
        self.ledger
    }

    /// Subscribe to record-creation events published from now on.
    pub fn subscribe(&self) -> EventStream {
        self.ledger.subscribe()
    }

    // ---- Existence ----

    pub fn asset_exists(&self, asset_id: &str) -> SdkResult<bool> {
        self.query(|store| store.asset_exists(asset_id))
    }

    pub fn user_exists(&self, user_id: &str) -> SdkResult<bool> {
        self.query(|store| store.user_exists(user_id))
    }

    pub fn authorization_exists(&self, auth_code: &str) -> SdkResult<bool> {
        self.query(|store| store.authorization_exists(auth_code))
    }

    // ---- Mutations ----

    pub fn create_asset(&self, asset_id: &str, asset: &Asset) -> SdkResult<()> {
        self.mutate("create_asset", |store| store.create_asset(asset_id, asset))
    }

    pub fn create_user(&self, user: &User) -> SdkResult<()> {
        self.mutate("create_user", |store| store.create_user(user))
    }

    pub fn grant_authorization(&self, grant: &Authorization) -> SdkResult<()> {
        self.mutate("grant_authorization", |store| store.grant_authorization(grant))
    }

    pub fn update_asset(&self, asset_id: &str, asset: &Asset) -> SdkResult<()> {
        self.mutate("update_asset", |store| store.update_asset(asset_id, asset))
    }

    pub fn update_user(&self, user: &User) -> SdkResult<()> {
        self.mutate("update_user", |store| store.update_user(user))
    }

    pub fn update_authorization(&self, grant: &Authorization) -> SdkResult<()> {
        self.mutate("update_authorization", |store| store.update_authorization(grant))
    }

    pub fn delete_asset(&self, asset_id: &str) -> SdkResult<()> {
        self.mutate("delete_asset", |store| store.delete_asset(asset_id))
    }

    // ---- Queries ----

    /// Gated read: the asset is released only to the approved holder of
    /// the grant at `auth_code`.
    pub fn read_asset(&self, asset_id: &str, user_id: &str, auth_code: &str) -> SdkResult<Asset> {
        self.query(|store| store.read_asset(asset_id, user_id, auth_code))
    }

    /// Ungated single-key asset read.
    pub fn get_asset(&self, asset_id: &str) -> SdkResult<Asset> {
        self.query(|store| store.get_asset(asset_id))
    }

    pub fn read_user(&self, user_id: &str) -> SdkResult<User> {
        self.query(|store| store.read_user(user_id))
    }

    pub fn read_authorization(&self, auth_code: &str) -> SdkResult<Authorization> {
        self.query(|store| store.read_authorization(auth_code))
    }

    pub fn list_all_assets(&self) -> SdkResult<Vec<AssetEntry>> {
        self.query(|store| store.list_all_assets())
    }

    pub fn list_all_assets_json(&self) -> SdkResult<String> {
        self.query(|store| store.list_all_assets_json())
    }

    // ---- Transaction boundaries ----

    fn mutate<T, F>(&self, op: &'static str, f: F) -> SdkResult<T>
    where
        F: FnOnce(&RecordStore<'_, Transaction<'_>>) -> StoreResult<T>,
    {
        let tx = self.ledger.begin()?;
        let outcome = f(&RecordStore::new(&tx));
        match outcome {
            Ok(value) => {
                let events = tx.commit();
                debug!(op, events = events.len(), "operation committed");
                Ok(value)
            }
            Err(err) => {
                debug!(op, error = %err, "operation failed");
                tx.rollback();
                Err(err.into())
            }
        }
    }

    fn query<T, F>(&self, f: F) -> SdkResult<T>
    where
        F: FnOnce(&RecordStore<'_, ReadView<'_>>) -> StoreResult<T>,
    {
        let view = self.ledger.read_view()?;
        let value = f(&RecordStore::new(&view))?;
        Ok(value)
    }
}
