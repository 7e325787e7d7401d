use thiserror::Error;

#[derive(Error, Debug)]
pub enum MockError {
    /// No entity with the given id.
    /// Maps to **HTTP 404** with an `ErrorType` body.
    #[error("{resource} {id} was not found")]
    NotFound { resource: String, id: String },

    /// A field search matched zero or several entities.
    /// Maps to **HTTP 404** with an `ErrorType` body.
    #[error("{count} {resource} records match {field}")]
    NoUniqueMatch {
        resource: String,
        field: String,
        count: usize,
    },

    /// The request was malformed (unknown resource, import type or missing upload).
    /// Maps to **HTTP 400** with an `ErrorType` body.
    #[error("{0}")]
    BadRequest(String),

    /// The token endpoint refused the grant.
    /// Maps to **HTTP 400** with an OAuth `error` body.
    #[error("{error}: {description}")]
    Grant { error: String, description: String },

    /// Missing, unknown or expired bearer token.
    /// Maps to **HTTP 401**.
    #[error("Authorization has been denied for this request.")]
    Unauthorized,
}

impl MockError {
    pub fn invalid_grant(description: impl Into<String>) -> Self {
        MockError::Grant {
            error: "invalid_grant".to_string(),
            description: description.into(),
        }
    }
}
