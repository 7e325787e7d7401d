use crate::Result;
use crate::response::decode;
use crate::token::Token;

use conquest_core::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Information about the Conquest instance itself.
#[derive(Debug, Clone)]
pub struct System {
    token: Token,
}

impl System {
    pub fn new(token: Token) -> Self {
        Self { token }
    }

    /// Names of the connections configured on the server.
    pub async fn connections(&self) -> Result<Vec<String>> {
        self.get(routes::SYSTEM_CONNECTIONS, "connection list").await
    }

    /// Version details of the server components.
    pub async fn version(&self) -> Result<BTreeMap<String, Value>> {
        self.get(routes::SYSTEM_VERSION, "version details").await
    }

    /// Name of the user the token was issued to.
    pub async fn whoami(&self) -> Result<String> {
        self.get(routes::SYSTEM_WHOAMI, "user name").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let builder = self.token.http().get(self.token.url(path));
        let body = self.token.send(builder).await?.into_body()?;
        decode(&body, what)
    }
}
