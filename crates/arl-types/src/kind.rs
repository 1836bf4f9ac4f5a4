use std::fmt;

use serde::{Deserialize, Serialize};

/// The three record kinds stored in the ledger.
///
/// The ledger does not distinguish kinds by key structure. `RecordKind` only
/// names which schema a caller expects to find under a key; it never changes
/// how presence is checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Asset,
    User,
    Authorization,
}

impl RecordKind {
    /// All kinds, in declaration order.
    pub const ALL: [RecordKind; 3] = [Self::Asset, Self::User, Self::Authorization];

    /// Lowercase name used in messages and event summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::User => "user",
            Self::Authorization => "authorization",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
