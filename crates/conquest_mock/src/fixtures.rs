use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Records the fixture server starts with, stored as the raw JSON objects it serves.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub assets: BTreeMap<i64, Map<String, Value>>,
    pub actions: BTreeMap<i64, Map<String, Value>>,
}

/// Attributes served by `GET /api/Asset/basic/{id}`.
pub const ASSET_BASIC_FIELDS: [&str; 6] = [
    "AssetID",
    "AssetDescription",
    "DepartmentID",
    "FamilyCode",
    "Location",
    "ParentID",
];

impl Fixtures {
    pub fn with_asset(mut self, asset: Value) -> Self {
        if let Some((id, obj)) = keyed(asset, "AssetID") {
            self.assets.insert(id, obj);
        }
        self
    }

    pub fn with_action(mut self, action: Value) -> Self {
        if let Some((id, obj)) = keyed(action, "ActionID") {
            self.actions.insert(id, obj);
        }
        self
    }

    /// A small road network: a parent asset, two footpath segments and their actions.
    pub fn sample() -> Self {
        Self::default()
            .with_asset(json!({
                "AssetID": 113670,
                "AssetDescription": "Main Street",
                "DepartmentID": 4,
                "FamilyCode": "005.004.055",
                "Location": "Main St, Springfield",
                "ParentID": null,
                "AssetTypeID": 12,
                "OwnerID": "COUNCIL"
            }))
            .with_asset(json!({
                "AssetID": 116983,
                "AssetDescription": "Footpath - Main Street (North)",
                "DepartmentID": null,
                "FamilyCode": "005.004.055.161",
                "Location": null,
                "ParentID": 113670,
                "AssetTypeID": 31,
                "OwnerID": "COUNCIL",
                "UserText1": "FP-0001"
            }))
            .with_asset(json!({
                "AssetID": 116984,
                "AssetDescription": "Footpath - Main Street (South)",
                "DepartmentID": null,
                "FamilyCode": "005.004.055.162",
                "Location": null,
                "ParentID": 113670,
                "AssetTypeID": 31,
                "OwnerID": "COUNCIL",
                "UserText1": "FP-0002"
            }))
            .with_action(json!({
                "ActionID": 5001,
                "ActionDescription": "Grind trip hazard",
                "AssetID": 116983,
                "UserText1": "WO-1001",
                "UserText2": "Crew A"
            }))
            .with_action(json!({
                "ActionID": 5002,
                "ActionDescription": "Replace slab",
                "AssetID": 116984,
                "UserText1": "WO-1002",
                "UserText2": "Crew A"
            }))
    }
}

fn keyed(value: Value, id_field: &str) -> Option<(i64, Map<String, Value>)> {
    match value {
        Value::Object(obj) => obj.get(id_field).and_then(Value::as_i64).map(|id| (id, obj)),
        _ => None,
    }
}

/// Projects a full asset onto its basic attributes.
pub fn basic_projection(asset: &Map<String, Value>) -> Map<String, Value> {
    ASSET_BASIC_FIELDS
        .iter()
        .map(|field| {
            (
                field.to_string(),
                asset.get(*field).cloned().unwrap_or(Value::Null),
            )
        })
        .collect()
}

/// Compares an attribute with a search value the way the API does: by textual form.
pub fn field_matches(record: &Map<String, Value>, field: &str, value: &str) -> bool {
    match record.get(field) {
        Some(Value::String(s)) => s == value,
        Some(Value::Number(n)) => n.to_string() == value,
        Some(Value::Bool(b)) => b.to_string() == value,
        _ => false,
    }
}
