//! Asset and action accessors against the fixture server

mod common;

use common::create_test_server;
use conquest_client::{ActionClient, AssetClient};
use conquest_core::prelude::*;

#[tokio::test]
async fn get_basic_returns_exact_record() {
    let server = create_test_server().await;
    let assets = AssetClient::new(server.token().await);

    let found = assets.get_basic([116983]).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(
        found[&116983],
        AssetRecord {
            asset_id: 116983,
            asset_description: "Footpath - Main Street (North)".to_string(),
            department_id: None,
            family_code: "005.004.055.161".to_string(),
            location: None,
            parent_id: Some(113670),
        }
    );
}

#[tokio::test]
async fn get_basic_leaves_out_missing_ids() {
    let server = create_test_server().await;
    let assets = AssetClient::new(server.token().await);

    let found = assets.get_basic([116983, 999_999, 116984]).await.unwrap();

    assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![116983, 116984]);
    assert!(assets.get_basic([999_999]).await.unwrap().is_empty());
    assert!(assets.get_basic(Vec::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn get_basic_is_idempotent() {
    let server = create_test_server().await;
    let assets = AssetClient::new(server.token().await);

    let first = assets.get_basic([116983, 116983, 113670]).await.unwrap();
    let second = assets.get_basic([113670, 116983]).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn get_detailed_keeps_every_attribute() {
    let server = create_test_server().await;
    let assets = AssetClient::new(server.token().await);

    let found = assets.get_detailed([116984]).await.unwrap();
    let asset = &found[&116984];

    assert_eq!(asset.asset_id, 116984);
    assert_eq!(asset.text("UserText1"), Some("FP-0002"));
    assert_eq!(asset.get("AssetTypeID").and_then(|v| v.as_i64()), Some(31));
}

#[tokio::test]
async fn find_by_field_returns_unique_match() {
    let server = create_test_server().await;
    let assets = AssetClient::new(server.token().await);

    let asset = assets
        .find_by_field("UserText1", "FP-0001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asset.asset_id, 116983);

    let asset = assets
        .find_by_field("AssetID", 113670)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asset.text("AssetDescription"), Some("Main Street"));
}

#[tokio::test]
async fn find_by_field_without_unique_match_is_none() {
    let server = create_test_server().await;
    let assets = AssetClient::new(server.token().await);

    assert!(assets.find_by_field("OwnerID", "COUNCIL").await.unwrap().is_none());
    assert!(assets.find_by_field("UserText1", "FP-9999").await.unwrap().is_none());
}

#[tokio::test]
async fn find_action_by_user_text() {
    let server = create_test_server().await;
    let actions = ActionClient::new(server.token().await);

    let action = actions
        .find_by_field("UserText1", "WO-1001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(action.action_id, 5001);
    assert_eq!(action.action_description.as_deref(), Some("Grind trip hazard"));
    assert_eq!(action.user_text(2), Some("Crew A"));

    assert!(actions.find_by_field("UserText2", "Crew A").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_reports_outcome_per_action() {
    let server = create_test_server().await;
    let actions = ActionClient::new(server.token().await);

    let outcome = actions.delete([5001, 4242]).await.unwrap();

    assert_eq!(outcome[&5001], None);
    assert_eq!(
        outcome[&4242].as_ref().map(|f| f.error_type.as_str()),
        Some("NotFound")
    );
    assert!(actions.get_detailed([5001]).await.unwrap().is_empty());
    assert_eq!(actions.get_detailed([5002]).await.unwrap().len(), 1);
}
