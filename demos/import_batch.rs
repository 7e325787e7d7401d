//! # Import Batch Example
//!
//! Submits a CSV file as an import batch and reports where the error CSV went if
//! any row failed validation.
//!
//! ## Usage
//!
//! ```sh
//! cargo run --example import_batch -- new_assets.csv Asset ./errors
//! ```
//!
//! Connection settings are read from the `CONQUEST_*` environment variables, see `fetch_assets.rs`.

use conquest_api::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let file = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: import_batch <file> [type] [output_dir]"))?;
    let import_type = args.next().unwrap_or_else(|| "Asset".to_string());
    let output_dir = args.next().map(Into::into).unwrap_or_else(env::temp_dir);

    let token = Token::from_config(ConnectionConfig::from_env()?).await?;
    let import = Import::with_config(token, ImportConfig::default().with_output_dir(output_dir));

    let result = import.add_named(&file, &import_type).await?;
    if result.success {
        println!("Batch {} imported", result.batch);
    } else {
        println!(
            "Batch {} failed: {}",
            result.batch,
            result.error_msg.as_deref().unwrap_or("no details")
        );
        if let Some(path) = result.error_file {
            println!("Errors written to {}", path.display());
        }
    }

    Ok(())
}
