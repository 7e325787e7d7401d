use crate::api::ApiError;
use crate::error::MockError;
use crate::state::MockState;

use axum::{extract::FromRequestParts, http::request::Parts};
use conquest_core::prelude::*;

/// A request carrying a valid bearer token for the server's connection.
#[derive(Clone, Debug)]
pub struct Authorized {
    pub username: String,
}

impl FromRequestParts<MockState> for Authorized {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &MockState,
    ) -> Result<Self, Self::Rejection> {
        let connection = parts
            .headers
            .get(headers::CONNECTION_NAME)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        if connection != state.config().connection {
            return Err(ApiError::from(MockError::Unauthorized));
        }

        let token = parts
            .headers
            .get("Authorization")
            .and_then(|auth_header| auth_header.to_str().ok())
            .map(|header_str| {
                header_str
                    .strip_prefix("bearer ")
                    .or_else(|| header_str.strip_prefix("Bearer "))
                    .unwrap_or(header_str)
                    .trim()
            })
            .unwrap_or("");

        let username = state.verify(token)?;
        Ok(Authorized { username })
    }
}
