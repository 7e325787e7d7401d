use crate::constants::{OUTPUT_TO_CSV, routes};
use crate::error::InvalidImportType;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

/// The schema a submitted file is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportType {
    Action,
    Asset,
    Defect,
    Request,
    AssetInspection,
    RiskEvent,
    LogBook,
}

impl ImportType {
    pub const ALL: [ImportType; 7] = [
        ImportType::Action,
        ImportType::Asset,
        ImportType::Defect,
        ImportType::Request,
        ImportType::AssetInspection,
        ImportType::RiskEvent,
        ImportType::LogBook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportType::Action => "Action",
            ImportType::Asset => "Asset",
            ImportType::Defect => "Defect",
            ImportType::Request => "Request",
            ImportType::AssetInspection => "AssetInspection",
            ImportType::RiskEvent => "RiskEvent",
            ImportType::LogBook => "LogBook",
        }
    }

    pub fn add_path(&self) -> String {
        routes::IMPORT_ADD.replace("{import_type}", self.as_str())
    }
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportType {
    type Err = InvalidImportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidImportType(s.to_string()))
    }
}

pub fn batch_state_path(batch: &Uuid) -> String {
    routes::IMPORT_STATE.replace("{batch}", &batch.to_string())
}

pub fn batch_error_csv_path(batch: &Uuid) -> String {
    routes::IMPORT_ERROR_CSV.replace("{batch}", &batch.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    Processing,
    Completed,
    /// Any terminal status other than `Completed`.
    #[serde(other)]
    Failed,
}

/// The server's view of an import batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchState {
    #[serde(rename = "Status")]
    pub status: BatchStatus,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl BatchState {
    pub fn processing() -> Self {
        Self {
            status: BatchStatus::Processing,
            error: None,
        }
    }

    pub fn completed() -> Self {
        Self {
            status: BatchStatus::Completed,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: BatchStatus::Failed,
            error: Some(error.into()),
        }
    }

    /// Whether the server offers an error CSV for this batch.
    pub fn offers_error_csv(&self) -> bool {
        self.error
            .as_deref()
            .is_some_and(|e| e.contains(OUTPUT_TO_CSV))
    }
}

/// Outcome of an import submission.
///
/// `success` is `false` as soon as a single row fails validation, even if
/// other rows were imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub batch: Uuid,
    pub success: bool,
    pub error_msg: Option<String>,
    /// Path of the error CSV written for a failed batch, if the server offered one.
    pub error_file: Option<PathBuf>,
}

impl ImportResult {
    pub fn completed(batch: Uuid) -> Self {
        Self {
            batch,
            success: true,
            error_msg: None,
            error_file: None,
        }
    }

    pub fn failed(batch: Uuid, error_msg: Option<String>, error_file: Option<PathBuf>) -> Self {
        Self {
            batch,
            success: false,
            error_msg,
            error_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_type_round_trips_names() {
        for t in ImportType::ALL {
            assert_eq!(t.as_str().parse::<ImportType>().unwrap(), t);
        }
        assert_eq!(ImportType::AssetInspection.add_path(), "/api/import/add/AssetInspection");
    }

    #[test]
    fn unknown_import_type_is_rejected() {
        let err = "Assets".parse::<ImportType>().unwrap_err();
        assert_eq!(err.to_string(), "Import type of Assets is not a valid option.");
    }

    #[test]
    fn unknown_status_is_failure() {
        let state: BatchState = serde_json::from_str(
            r#"{"Status":"Error","Error":"1 row failed validation. Output to CSV for details."}"#,
        )
        .unwrap();
        assert_eq!(state.status, BatchStatus::Failed);
        assert!(state.offers_error_csv());

        let state: BatchState = serde_json::from_str(r#"{"Status":"Processing"}"#).unwrap();
        assert_eq!(state.status, BatchStatus::Processing);
        assert!(!state.offers_error_csv());
    }
}
