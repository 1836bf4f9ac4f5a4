use serde::{Deserialize, Serialize};

use crate::kind::RecordKind;
use crate::record::Record;

/// A user profile, stored under its own `UserId`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "UserId")]
    pub user_id: String,
    #[serde(rename = "Type")]
    pub user_type: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Date")]
    pub date: String,
}

impl Record for User {
    const KIND: RecordKind = RecordKind::User;

    fn salient_field(&self) -> &str {
        &self.username
    }
}
