//! # Conquest Mock
//!
//! A fixture server speaking the subset of the Conquest API the client uses, for
//! tests and demos.
//!
//! **WARNING**: Credentials, tokens and records live in memory and validation is a
//! single `TypeID` rule. **DO NOT point production tooling at this!!!**
//!
//! ## Usage
//!
//! ```no_run
//! use conquest_mock::prelude::*;
//!
//! # async fn run() {
//! let (app, state) = MockConquest::default().build(Fixtures::sample());
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

mod api;

pub mod auth;
pub mod error;
pub mod fixtures;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use fixtures::Fixtures;
use state::{MockConfig, MockState};
use tower_http::trace::TraceLayer;

/// The builder for the fixture server.
#[derive(Clone, Debug, Default)]
pub struct MockConquest {
    config: MockConfig,
}

impl MockConquest {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Builds the router, returning the state so callers can inspect or revoke tokens.
    pub fn build(self, fixtures: Fixtures) -> (Router, MockState) {
        let state = MockState::new(self.config, fixtures);
        (Self::router(state.clone()), state)
    }

    pub fn router(state: MockState) -> Router {
        Router::new()
            .route("/api/token", post(api::issue_token))
            .route("/api/system/connections", get(api::connections))
            .route("/api/system/version", get(api::version))
            .route("/api/system/whoami", get(api::whoami))
            .route("/api/import/add/{import_type}", post(api::import_add))
            .route("/api/import/state/{batch}", get(api::import_state))
            .route("/api/import/error_csv/{batch}", get(api::import_error_csv))
            .route("/api/{resource}/find_by_field", post(api::find_by_field))
            .route("/api/{resource}/basic/{id}", get(api::get_basic))
            .route(
                "/api/{resource}/{id}",
                get(api::get_entity).delete(api::delete_entity),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

pub mod prelude {
    pub use crate::MockConquest;
    pub use crate::auth::*;
    pub use crate::error::*;
    pub use crate::fixtures::*;
    pub use crate::state::*;
}
