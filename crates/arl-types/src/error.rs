use thiserror::Error;

use crate::kind::RecordKind;

/// Errors produced while encoding or decoding records.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("failed to encode {kind} record: {source}")]
    Encode {
        kind: RecordKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored bytes are not a valid {kind} record: {source}")]
    Decode {
        kind: RecordKind,
        #[source]
        source: serde_json::Error,
    },
}

impl TypeError {
    /// The record kind involved in the failure.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Encode { kind, .. } | Self::Decode { kind, .. } => *kind,
        }
    }
}
