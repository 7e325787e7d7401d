use crate::config::ConnectionConfig;
use crate::response::Reply;
use crate::{ConquestError, Result};

use chrono::{DateTime, TimeDelta, Utc};
use conquest_core::prelude::*;
use reqwest::{Client, RequestBuilder, header};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// An authenticated session with a Conquest API instance.
///
/// Created once with [`Token::create`] and handed to every accessor. Cloning is cheap,
/// all clones share the same session. The access token is renewed through its refresh
/// token shortly before it expires; a token the server has revoked is never
/// re-created behind the caller's back.
#[derive(Clone)]
pub struct Token {
    inner: Arc<TokenInner>,
}

struct TokenInner {
    api_url: Url,
    username: String,
    connection: String,
    http: Client,
    session: RwLock<Session>,
}

struct Session {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    fn from_grant(grant: TokenGrant) -> std::result::Result<Self, AuthError> {
        let expires_at = TimeDelta::try_seconds(grant.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                AuthError::Malformed(format!(
                    "expires_in of {} seconds is out of range",
                    grant.expires_in
                ))
            })?;

        Ok(Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at,
        })
    }

    fn needs_renewal(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(TOKEN_RENEWAL_MARGIN_SECS) >= self.expires_at
    }
}

impl Token {
    /// Authenticates `username` against `connection` and returns the session.
    ///
    /// Fails with [`AuthError`] if the credentials are rejected or the host cannot be reached.
    pub async fn create(
        api_url: &str,
        username: &str,
        password: &str,
        connection: &str,
    ) -> Result<Self> {
        Self::from_config(ConnectionConfig::new(api_url, username, password, connection)).await
    }

    pub async fn from_config(config: ConnectionConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)?;
        let http = config.build_http()?;

        let request = TokenRequest::password(&config.username, &config.password);
        let grant = request_grant(&http, &api_url, &config.connection, &request).await?;

        let expires_in = grant.expires_in;
        let session = Session::from_grant(grant)?;

        info!(
            connection = %config.connection,
            username = %config.username,
            expires_in,
            "Generated Conquest access token"
        );

        Ok(Self {
            inner: Arc::new(TokenInner {
                api_url,
                username: config.username,
                connection: config.connection,
                http,
                session: RwLock::new(session),
            }),
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.inner.api_url
    }

    pub fn username(&self) -> &str {
        &self.inner.username
    }

    pub fn connection(&self) -> &str {
        &self.inner.connection
    }

    pub async fn expires_at(&self) -> DateTime<Utc> {
        self.inner.session.read().await.expires_at
    }

    /// Returns a valid access token, renewing it first if it is about to expire.
    pub async fn bearer(&self) -> Result<String> {
        {
            let session = self.inner.session.read().await;
            if !session.needs_renewal(Utc::now()) {
                return Ok(session.access_token.clone());
            }
        }

        let mut session = self.inner.session.write().await;
        // Another caller may have renewed while we waited for the lock.
        if session.needs_renewal(Utc::now()) {
            debug!(connection = %self.inner.connection, "Renewing Conquest access token");

            let request = TokenRequest::refresh(&session.refresh_token);
            let grant = request_grant(
                &self.inner.http,
                &self.inner.api_url,
                &self.inner.connection,
                &request,
            )
            .await
            .map_err(|e| match e {
                ConquestError::Auth(err) => AuthError::Renewal(err.to_string()).into(),
                other => other,
            })?;

            *session = Session::from_grant(grant)?;
            info!(connection = %self.inner.connection, "Renewed Conquest access token");
        }

        Ok(session.access_token.clone())
    }

    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        build_url(&self.inner.api_url, path)
    }

    async fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let bearer = self.bearer().await?;
        Ok(builder
            .header(headers::CONNECTION_NAME, &self.inner.connection)
            .header(header::AUTHORIZATION, format!("bearer {bearer}")))
    }

    /// Authorizes and sends a request, sorting the response into a [`Reply`].
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Reply> {
        let response = self.authorize(builder).await?.send().await?;
        debug!(
            url = %response.url(),
            status = %response.status(),
            "Conquest API response"
        );
        Reply::classify(response).await
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("api_url", &self.inner.api_url.as_str())
            .field("username", &self.inner.username)
            .field("connection", &self.inner.connection)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

fn build_url(base: &Url, path: &str) -> String {
    let base = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

async fn request_grant(
    http: &Client,
    api_url: &Url,
    connection: &str,
    request: &TokenRequest,
) -> Result<TokenGrant> {
    let response = http
        .post(build_url(api_url, routes::TOKEN))
        .header(headers::CONNECTION_NAME, connection)
        .header(header::ACCEPT, "application/json")
        .form(request)
        .send()
        .await
        .map_err(|e| AuthError::Unreachable(e.to_string()))?;

    let body = response
        .text()
        .await
        .map_err(|e| AuthError::Unreachable(e.to_string()))?;

    Ok(decode_token_response(&body)?)
}
