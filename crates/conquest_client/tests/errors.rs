//! Failure paths against hand-rolled routers standing in for a misbehaving server

mod common;

use axum::{
    Json, Router,
    body::Bytes,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::{CONNECTION, PASSWORD, USERNAME, spawn_router};
use conquest_client::{AssetClient, ConquestError, Import, ImportConfig, Token};
use conquest_core::prelude::*;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

const BATCH: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

/// A router that hands out a token to anyone.
fn open_router() -> Router {
    Router::new().route(
        "/api/token",
        post(|| async {
            Json(json!({
                "access_token": "access",
                "refresh_token": "refresh",
                "expires_in": 3600,
                "token_type": "bearer"
            }))
        }),
    )
}

async fn token_for(app: Router) -> Token {
    let addr = spawn_router(app).await;
    Token::create(&format!("http://{addr}/"), USERNAME, PASSWORD, CONNECTION)
        .await
        .unwrap()
}

async fn basic_asset(Path(id): Path<i64>) -> Response {
    match id {
        1 => (StatusCode::INTERNAL_SERVER_ERROR, "database offline").into_response(),
        2 => (StatusCode::BAD_REQUEST, "Bad field").into_response(),
        3 => Json(json!({
            "AssetID": 3,
            "AssetDescription": "No family",
            "DepartmentID": null,
            "Location": null,
            "ParentID": null
        }))
        .into_response(),
        _ => (StatusCode::OK, "{\"AssetID\": ").into_response(),
    }
}

fn asset_router() -> Router {
    open_router().route("/api/Asset/basic/{id}", get(basic_asset))
}

fn write_upload(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("assets.csv");
    std::fs::write(&path, "AssetDescription,TypeID\r\nPit,999\r\n").unwrap();
    path
}

fn import_config(dir: &TempDir) -> ImportConfig {
    ImportConfig {
        poll_interval: Duration::from_millis(10),
        ..ImportConfig::default().with_output_dir(dir.path())
    }
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let assets = AssetClient::new(token_for(asset_router()).await);

    let err = assets.get_basic([1]).await.unwrap_err();

    match err {
        ConquestError::Request { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "database offline");
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn client_error_without_error_type_is_request_error() {
    let assets = AssetClient::new(token_for(asset_router()).await);

    let err = assets.get_basic([2]).await.unwrap_err();

    match err {
        ConquestError::Request { status, body } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, "Bad field");
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn record_missing_required_field_is_parse_error() {
    let assets = AssetClient::new(token_for(asset_router()).await);

    let err = assets.get_basic([3]).await.unwrap_err();

    match err {
        ConquestError::Parse(message) => assert!(message.contains("FamilyCode")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let assets = AssetClient::new(token_for(asset_router()).await);

    let err = assets.get_basic([4]).await.unwrap_err();

    assert!(matches!(err, ConquestError::Parse(_)));
}

#[tokio::test]
async fn unavailable_import_endpoint_is_request_error() {
    let app = open_router().route(
        "/api/import/add/{import_type}",
        post(|_: Bytes| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let dir = TempDir::new().unwrap();
    let import = Import::with_config(token_for(app).await, import_config(&dir));

    let err = import
        .add(write_upload(&dir), ImportType::Asset)
        .await
        .unwrap_err();

    match err {
        ConquestError::Request { status, body } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn loose_error_csv_is_written_unchanged() {
    const PAYLOAD: &str = "Row,Field,Message\r\n2,TypeID,Value \"X\" is not valid\r\n";
    const ERROR: &str = "1 of 1 rows failed validation. Output to CSV to review the errors.";

    let batch = Uuid::parse_str(BATCH).unwrap();
    let app = open_router()
        .route(
            "/api/import/add/{import_type}",
            post(move |_: Bytes| async move { Json(batch) }),
        )
        .route(
            "/api/import/state/{batch}",
            get(|| async { Json(json!({ "Status": "Failed", "Error": ERROR })) }),
        )
        .route(
            "/api/import/error_csv/{batch}",
            get(|| async { PAYLOAD }),
        );
    let dir = TempDir::new().unwrap();
    let import = Import::with_config(token_for(app).await, import_config(&dir));

    let result = import.add(write_upload(&dir), ImportType::Asset).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.batch, batch);
    assert_eq!(result.error_msg.as_deref(), Some(ERROR));

    let error_file = result.error_file.unwrap();
    assert_eq!(
        error_file.file_name().unwrap().to_string_lossy(),
        format!("assets_ERROR_{BATCH}.csv")
    );
    assert_eq!(std::fs::read_to_string(&error_file).unwrap(), PAYLOAD);
}

#[tokio::test]
async fn out_of_range_token_lifetime_is_malformed() {
    let app = Router::new().route(
        "/api/token",
        post(|| async {
            Json(json!({
                "access_token": "access",
                "refresh_token": "refresh",
                "expires_in": i64::MAX
            }))
        }),
    );
    let addr = spawn_router(app).await;

    let err = Token::create(&format!("http://{addr}/"), USERNAME, PASSWORD, CONNECTION)
        .await
        .unwrap_err();

    assert!(matches!(err, ConquestError::Auth(AuthError::Malformed(_))));
}
