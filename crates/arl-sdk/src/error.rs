use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Store(#[from] arl_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] arl_ledger::LedgerError),
}

impl SdkError {
    /// The store error behind this failure, if any.
    pub fn as_store(&self) -> Option<&arl_store::StoreError> {
        match self {
            Self::Store(err) => Some(err),
            Self::Ledger(_) => None,
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
