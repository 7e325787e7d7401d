//! # Fetch Assets Example
//!
//! Looks up assets by id and by field against a live Conquest instance.
//!
//! ## Usage
//!
//! ```sh
//! export CONQUEST_API_URL=https://api.domain.gov.au/
//! export CONQUEST_USERNAME=nathan
//! export CONQUEST_PASSWORD=...
//! export CONQUEST_CONNECTION=Production
//! cargo run --example fetch_assets -- 116983 116984
//! ```
//!
//! Point it at `cargo run --example mock_server --features mock` to try it locally.

use conquest_api::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let ids: Vec<EntityId> = env::args()
        .skip(1)
        .map(|arg| arg.parse())
        .collect::<Result<_, _>>()?;

    let token = Token::from_config(ConnectionConfig::from_env()?).await?;
    let assets = AssetClient::new(token.clone());

    let found = assets.get_basic(ids.iter().copied()).await?;
    for id in &ids {
        match found.get(id) {
            Some(asset) => println!(
                "{id}: {} [{}] parent={:?}",
                asset.asset_description, asset.family_code, asset.parent_id
            ),
            None => println!("{id}: not found"),
        }
    }

    // Field searches only answer when exactly one asset matches.
    if let Some(asset) = assets.find_by_field("UserText1", "FP-0001").await? {
        println!("FP-0001 is asset {}", asset.asset_id);
    }

    let system = System::new(token);
    println!("Signed in as {}", system.whoami().await?);

    Ok(())
}
