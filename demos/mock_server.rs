//! # Mock Server Example
//!
//! Serves the sample fixtures over HTTP, so the other examples can run without a
//! Conquest instance. Sign in as `conquest`/`conquest` on connection `Test`.
//!
//! ## Usage
//!
//! ```sh
//! cargo run --example mock_server --features mock
//! ```

use conquest_api::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Don't use this in production! Credentials and records are held in memory.
    let (app, _state) = MockConquest::default().build(Fixtures::sample());

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    println!("Mock Conquest listening on http://{addr}/");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
