use arl_ledger::LedgerError;
use arl_types::{RecordKind, TypeError};

use crate::access::Denial;

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Create on a key that already holds a record.
    #[error("the {kind} {key} already exists")]
    AlreadyExists { kind: RecordKind, key: String },

    /// Read, update, or delete on a key that holds no record.
    #[error("the {kind} {key} does not exist")]
    NotFound { kind: RecordKind, key: String },

    /// The gated read failed its ownership or approval check.
    #[error("user {user_id} is not authorized to read asset {asset_id}: {denial}")]
    Unauthorized {
        user_id: String,
        asset_id: String,
        denial: Denial,
    },

    /// The bytes stored at `key` are not a valid record.
    #[error("corrupt record at {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: TypeError,
    },

    /// A record could not be encoded for storage.
    #[error("cannot encode record for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: TypeError,
    },

    /// Enumeration output could not be rendered.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The ledger call itself failed.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl StoreError {
    pub(crate) fn not_found(kind: RecordKind, key: &str) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Returns `true` for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`StoreError::AlreadyExists`].
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns `true` for [`StoreError::Unauthorized`].
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Result alias for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;
