use serde::{Deserialize, Serialize};

use crate::kind::RecordKind;
use crate::record::Record;

/// An asset document.
///
/// All fields are opaque strings. Dates are free-form and never parsed. The
/// ledger key an asset is stored under (its asset ID) is supplied by the
/// caller and is independent of the `ID` field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Type")]
    pub asset_type: String,
    #[serde(rename = "DateIssue")]
    pub date_issue: String,
    #[serde(rename = "DrNo")]
    pub dr_no: String,
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "FrDate")]
    pub fr_date: String,
    #[serde(rename = "ToDate")]
    pub to_date: String,
    #[serde(rename = "MCStatus")]
    pub mc_status: String,
}

impl Record for Asset {
    const KIND: RecordKind = RecordKind::Asset;

    fn salient_field(&self) -> &str {
        &self.asset_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Asset {
        Asset {
            id: "S23232J".into(),
            asset_type: "MC".into(),
            date_issue: "23/06/2021".into(),
            dr_no: "2888Z".into(),
            group: "NGHPOLY".into(),
            location: "Yishun".into(),
            fr_date: "23/06/2021".into(),
            to_date: "25/06/2021".into(),
            mc_status: "Original".into(),
        }
    }

    #[test]
    fn encodes_with_wire_field_names_in_order() {
        let json = String::from_utf8(sample().encode().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"ID":"S23232J","Type":"MC","DateIssue":"23/06/2021","DrNo":"2888Z","Group":"NGHPOLY","Location":"Yishun","FrDate":"23/06/2021","ToDate":"25/06/2021","MCStatus":"Original"}"#
        );
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let asset = Asset::decode(br#"{"Type":"MC"}"#).unwrap();
        assert_eq!(asset.asset_type, "MC");
        assert_eq!(asset.mc_status, "");
        assert_eq!(asset.id, "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let asset = Asset::decode(br#"{"Type":"MC","Colour":"red"}"#).unwrap();
        assert_eq!(asset.asset_type, "MC");
    }

    #[test]
    fn field_names_are_case_sensitive() {
        let asset = Asset::decode(br#"{"type":"MC"}"#).unwrap();
        assert_eq!(asset.asset_type, "");
    }

    #[test]
    fn rejects_non_json() {
        let err = Asset::decode(b"not json").unwrap_err();
        assert_eq!(err.kind(), RecordKind::Asset);
    }

    #[test]
    fn rejects_positional_array() {
        let err = Asset::decode(br#"["S1","MC"]"#).unwrap_err();
        assert_eq!(err.kind(), RecordKind::Asset);
        assert!(Asset::decode(b"\"MC\"").is_err());
        assert!(Asset::decode(b"null").is_err());
    }

    #[test]
    fn event_summary_quotes_type() {
        assert_eq!(sample().event_summary("023"), "Created asset 023(MC)");
    }
}
