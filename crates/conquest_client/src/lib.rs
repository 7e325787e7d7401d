//! # Conquest Client
//!
//! An async HTTP client for the Conquest asset management API.
//!
//! Authenticate once with [`Token::create`], then hand clones of the token to the
//! accessors: [`AssetClient`] and [`ActionClient`] for entity lookups, [`Import`] to
//! submit CSV import batches, and [`System`] for server information.
//!
//! ## Example: Importing Assets
//!
//! ```no_run
//! use conquest_client::{AssetClient, Import, Token};
//! use conquest_core::prelude::ImportType;
//!
//! async fn run() -> conquest_client::Result<()> {
//!     let token = Token::create(
//!         "https://api.domain.gov.au/",
//!         "nathan",
//!         "password",
//!         "Production",
//!     )
//!     .await?;
//!
//!     // Look up an asset
//!     let assets = AssetClient::new(token.clone());
//!     let found = assets.get_basic([116983]).await?;
//!     println!("{found:?}");
//!
//!     // Import a file
//!     let result = Import::new(token).add("new_assets.csv", ImportType::Asset).await?;
//!     if !result.success {
//!         println!("Errors written to {:?}", result.error_file);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod entity;
mod import;
mod report;
mod response;
mod system;
mod token;

pub use config::*;
pub use entity::{ActionClient, AssetClient, EntityClient};
pub use import::Import;
pub use report::ErrorReporter;
pub use system::System;
pub use token::Token;

use conquest_core::prelude::{AuthError, InvalidImportType, ReportError};
use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ConquestError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned error {status}: {body}")]
    Request { status: StatusCode, body: String },

    #[error("Failed to parse {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error(transparent)]
    InvalidImportType(#[from] InvalidImportType),

    #[error("Invalid error report: {0}")]
    Report(#[from] ReportError),

    #[error("Import batch {batch} still processing after {waited:?}")]
    ImportTimeout { batch: Uuid, waited: Duration },

    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConquestError>;
