use serde::de::{self, DeserializeOwned};
use serde::Serialize;
use serde_json::Value;

use crate::error::TypeError;
use crate::kind::RecordKind;

/// Event name carried by every record-creation event.
pub const RECORD_EVENT: &str = "myEvent";

/// First key of the asset enumeration range.
pub const ASSET_RANGE_START: &str = "000";

/// Last key of the asset enumeration range (inclusive).
///
/// Asset keys are conventionally three-character numeric strings. Nothing
/// enforces this; keys that sort outside `"000"..="999"` are not enumerated.
pub const ASSET_RANGE_END: &str = "999";

/// A record kind that can be stored under a ledger key.
///
/// The canonical encoding is compact JSON with the serde field names of the
/// implementing type.
pub trait Record: Serialize + DeserializeOwned + Sized {
    /// Which schema this type represents.
    const KIND: RecordKind;

    /// The field quoted in the creation event summary.
    fn salient_field(&self) -> &str;

    /// Serialize to the canonical encoding.
    fn encode(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|source| TypeError::Encode {
            kind: Self::KIND,
            source,
        })
    }

    /// Parse from the canonical encoding.
    ///
    /// Only a JSON object is accepted; arrays would otherwise fill fields
    /// by position.
    fn decode(bytes: &[u8]) -> Result<Self, TypeError> {
        let decode_err = |source: serde_json::Error| TypeError::Decode {
            kind: Self::KIND,
            source,
        };
        let value: Value = serde_json::from_slice(bytes).map_err(decode_err)?;
        if !value.is_object() {
            return Err(decode_err(de::Error::custom(format!(
                "expected a JSON object for {}",
                Self::KIND
            ))));
        }
        serde_json::from_value(value).map_err(decode_err)
    }

    /// Human-readable summary published when a record is created at `key`.
    fn event_summary(&self, key: &str) -> String {
        format!("Created {} {key}({})", Self::KIND, self.salient_field())
    }
}
