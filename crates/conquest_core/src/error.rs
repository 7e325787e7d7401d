use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The token endpoint refused the credentials.
    /// Carries the server's `error` and `error_description` fields.
    #[error("Unable to generate access token - {error}: {description}")]
    Rejected { error: String, description: String },

    /// A resource call was answered with **HTTP 401 Unauthorized**.
    /// The token has been revoked or has expired; create a new one.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Renewing the token with its refresh token failed.
    #[error("Unable to renew access token: {0}")]
    Renewal(String),

    /// The token endpoint could not be reached.
    #[error("Unable to reach token endpoint: {0}")]
    Unreachable(String),

    /// The token endpoint answered with something that is neither a token nor an error.
    #[error("Malformed token response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Import type of {0} is not a valid option.")]
pub struct InvalidImportType(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A quoted field was still open at the end of the payload.
    #[error("Unterminated quoted field starting on line {0}")]
    UnterminatedQuote(usize),

    /// A quote appeared in the middle of an unquoted field.
    #[error("Unexpected quote on line {line}, column {column}")]
    StrayQuote { line: usize, column: usize },

    /// A quoted field was followed by something other than a delimiter.
    #[error("Unexpected text after closing quote on line {line}, column {column}")]
    TextAfterQuote { line: usize, column: usize },
}

/// Error body returned by the Conquest API when a request cannot be served,
/// e.g. when an entity does not exist or a lookup is not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFault {
    #[serde(rename = "ErrorType")]
    pub error_type: String,
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiFault {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: Some(message.into()),
        }
    }

    /// Returns the fault if `body` is a JSON object carrying an `ErrorType` field.
    pub fn detect(body: &str) -> Option<Self> {
        serde_json::from_str::<ApiFault>(body).ok()
    }
}
