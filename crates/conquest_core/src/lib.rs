//! # Conquest Core
//!
//! Types and traits shared by the Conquest API client and the fixture server.
//!
//! Defines the wire protocol spoken with a Conquest API instance.
//!
//! - **[`Entity`](traits::Entity)**: A resource reachable through the generic accessor routes (e.g. `Asset`, `Action`).
//! - **[`AssetRecord`](entity::AssetRecord)**: The basic attribute set of an asset, keyed by its `AssetID`.
//! - **[`ImportResult`](import::ImportResult)**: The outcome of submitting an import batch.
//! - **[`ErrorReport`](report::ErrorReport)**: A parsed error CSV produced by the server for a failed batch.

pub mod constants;
pub mod entity;
pub mod error;
pub mod import;
pub mod report;
pub mod token;
pub mod traits;

pub mod prelude {
    pub use super::constants::*;
    pub use super::entity::*;
    pub use super::error::*;
    pub use super::import::*;
    pub use super::report::*;
    pub use super::token::*;
    pub use super::traits::*;
}
