use crate::traits::{BasicProjection, Entity, EntityId};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type AssetId = EntityId;
pub type ActionId = EntityId;

/// Marker for the `Asset` resource.
#[derive(Debug, Clone, Copy)]
pub struct Asset;

impl Entity for Asset {
    const RESOURCE: &'static str = "Asset";
    type Record = AssetDetail;
}

impl BasicProjection for Asset {
    type Basic = AssetRecord;
}

/// Marker for the `Action` resource.
#[derive(Debug, Clone, Copy)]
pub struct Action;

impl Entity for Action {
    const RESOURCE: &'static str = "Action";
    type Record = ActionRecord;
}

/// The basic attributes of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(rename = "AssetID")]
    pub asset_id: AssetId,
    #[serde(rename = "AssetDescription")]
    pub asset_description: String,
    #[serde(rename = "DepartmentID")]
    pub department_id: Option<i64>,
    /// Dotted hierarchy code of the asset's family, e.g. `005.004.055.161`.
    #[serde(rename = "FamilyCode")]
    pub family_code: String,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "ParentID")]
    pub parent_id: Option<AssetId>,
}

/// Every attribute the server holds for an asset.
///
/// Only the id is typed; the remaining attributes depend on how the
/// Conquest instance is configured and are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetail {
    #[serde(rename = "AssetID")]
    pub asset_id: AssetId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl AssetDetail {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}

/// An action, with its free-form `UserTextN` attributes preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(rename = "ActionID")]
    pub action_id: ActionId,
    #[serde(rename = "ActionDescription")]
    pub action_description: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ActionRecord {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns `UserText{n}`, if set to a string.
    pub fn user_text(&self, n: u32) -> Option<&str> {
        self.get(&format!("UserText{n}")).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_basic_asset() {
        let body = json!({
            "AssetID": 116983,
            "AssetDescription": "Footpath - Main St",
            "DepartmentID": null,
            "FamilyCode": "005.004.055.161",
            "Location": null,
            "ParentID": 113670
        });

        let record: AssetRecord = serde_json::from_value(body).unwrap();
        assert_eq!(
            record,
            AssetRecord {
                asset_id: 116983,
                asset_description: "Footpath - Main St".into(),
                department_id: None,
                family_code: "005.004.055.161".into(),
                location: None,
                parent_id: Some(113670),
            }
        );
    }

    #[test]
    fn basic_asset_rejects_missing_required_fields() {
        let body = json!({ "AssetID": 1, "AssetDescription": "no family" });
        assert!(serde_json::from_value::<AssetRecord>(body).is_err());
    }

    #[test]
    fn action_keeps_user_text() {
        let body = json!({
            "ActionID": 42,
            "ActionDescription": "Inspect",
            "UserText1": "AB-100",
            "UserText2": null
        });

        let action: ActionRecord = serde_json::from_value(body).unwrap();
        assert_eq!(action.action_id, 42);
        assert_eq!(action.user_text(1), Some("AB-100"));
        assert_eq!(action.user_text(2), None);
        assert!(action.get("ActionID").is_none());
    }

    #[test]
    fn routes_are_resource_scoped() {
        assert_eq!(Asset::path_by_id(7), "/api/Asset/7");
        assert_eq!(Asset::basic_path_by_id(7), "/api/Asset/basic/7");
        assert_eq!(Action::find_by_field_path(), "/api/Action/find_by_field");
    }
}
