use crate::{ConquestError, Result};

use conquest_core::prelude::*;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

/// A response that made it past transport and authorization checks.
#[derive(Debug)]
pub(crate) enum Reply {
    Body(String),
    /// The server answered with an error body (`ErrorType`), e.g. for an unknown id.
    Fault {
        status: StatusCode,
        body: String,
        fault: ApiFault,
    },
}

impl Reply {
    pub(crate) async fn classify(response: Response) -> Result<Self> {
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::Unauthorized(truncate(&body)).into());
        }

        if status.is_server_error() {
            return Err(ConquestError::Request { status, body });
        }

        if let Some(fault) = ApiFault::detect(&body) {
            return Ok(Reply::Fault {
                status,
                body,
                fault,
            });
        }

        if !status.is_success() {
            return Err(ConquestError::Request { status, body });
        }

        Ok(Reply::Body(body))
    }

    /// Treats a fault as a failed request.
    pub(crate) fn into_body(self) -> Result<String> {
        match self {
            Reply::Body(body) => Ok(body),
            Reply::Fault { status, body, .. } => Err(ConquestError::Request { status, body }),
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| ConquestError::Parse(format!("{what}: {e} - Body: {}", truncate(body))))
}

fn truncate(body: &str) -> String {
    body.chars().take(500).collect()
}
