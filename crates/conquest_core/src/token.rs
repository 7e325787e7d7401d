use crate::constants::grants;
use crate::error::AuthError;

use serde::{Deserialize, Serialize};

/// Form body sent to the token endpoint.
///
/// Either a password grant (`username` + `password`) or a refresh grant (`refresh_token`).
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenRequest {
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            grant_type: grants::PASSWORD.to_string(),
            username: Some(username.into()),
            password: Some(password.into()),
            refresh_token: None,
        }
    }

    pub fn refresh(refresh_token: impl Into<String>) -> Self {
        Self {
            grant_type: grants::REFRESH_TOKEN.to_string(),
            username: None,
            password: None,
            refresh_token: Some(refresh_token.into()),
        }
    }
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("grant_type", &self.grant_type)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Successful answer of the token endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl std::fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Error answer of the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenFault {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

impl From<TokenFault> for AuthError {
    fn from(fault: TokenFault) -> Self {
        AuthError::Rejected {
            error: fault.error,
            description: fault.error_description,
        }
    }
}

/// Decodes a token endpoint body into a grant, or the error it describes.
pub fn decode_token_response(body: &str) -> Result<TokenGrant, AuthError> {
    if let Ok(grant) = serde_json::from_str::<TokenGrant>(body) {
        return Ok(grant);
    }

    match serde_json::from_str::<TokenFault>(body) {
        Ok(fault) => Err(fault.into()),
        Err(_) => Err(AuthError::Malformed(
            body.chars().take(200).collect::<String>(),
        )),
    }
}
