//! # Conquest API
//!
//! An async client for the Conquest asset management API.
//!
//! This crate serves as an entry point, re-exporting the shared types and
//! optionally including the client and a fixture server via feature flags.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | **`client`** | Includes the HTTP client (`conquest_client`). Enabled by default. |
//! | **`mock`** | Includes an in-memory Conquest fixture server (`conquest_mock`) for tests and demos. |
//!
//! ## Example: Looking Up Assets
//!
//! ```toml
//! [dependencies]
//! conquest_api = "0.9"
//! ```
//!
//! ```rust,no_run
//! use conquest_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> conquest_api::client::Result<()> {
//!     let token = Token::from_config(ConnectionConfig::from_env()?).await?;
//!
//!     let assets = AssetClient::new(token);
//!     for (id, asset) in assets.get_basic([116983]).await? {
//!         println!("{id}: {}", asset.asset_description);
//!     }
//!     Ok(())
//! }
//! ```

pub use conquest_core::*;

#[cfg(feature = "client")]
pub mod client {
    pub use conquest_client::*;
}

#[cfg(feature = "mock")]
pub mod mock {
    pub use conquest_mock::*;
}

pub mod prelude {
    pub use conquest_core::prelude::*;

    #[cfg(feature = "client")]
    pub use conquest_client::{
        ActionClient, AssetClient, ConnectionConfig, ConquestError, EntityClient, Import,
        ImportConfig, System, Token,
    };

    #[cfg(feature = "mock")]
    pub use conquest_mock::prelude::{Fixtures, MockConfig, MockConquest, MockState};
}
