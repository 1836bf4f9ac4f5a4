use serde::{Deserialize, Serialize};

use crate::kind::RecordKind;
use crate::record::Record;

/// The only approval value that denies access.
pub const DENIED_APPROVAL: &str = "N";

/// A grant letting `for_user_id` read the asset stored at `for_asset_id`.
///
/// `approval` is conventionally `"Y"` or `"N"` but is never validated. Only
/// the exact string `"N"` is negative; anything else, including the empty
/// string, grants access.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Authorization {
    #[serde(rename = "AuthCode")]
    pub auth_code: String,
    #[serde(rename = "Type")]
    pub auth_type: String,
    #[serde(rename = "ForAssetId")]
    pub for_asset_id: String,
    #[serde(rename = "ForUserId")]
    pub for_user_id: String,
    #[serde(rename = "Approval")]
    pub approval: String,
}

impl Authorization {
    /// Returns `true` if the approval flag is exactly `"N"`.
    pub fn is_denied(&self) -> bool {
        self.approval == DENIED_APPROVAL
    }

    /// Returns `true` if this grant names `user_id` as its holder.
    pub fn is_held_by(&self, user_id: &str) -> bool {
        self.for_user_id == user_id
    }
}

impl Record for Authorization {
    const KIND: RecordKind = RecordKind::Authorization;

    fn salient_field(&self) -> &str {
        &self.approval
    }
}
