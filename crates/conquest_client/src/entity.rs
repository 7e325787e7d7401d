use crate::Result;
use crate::response::{Reply, decode};
use crate::token::Token;

use conquest_core::prelude::*;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet};
use std::marker::PhantomData;
use tracing::debug;

pub type AssetClient = EntityClient<Asset>;
pub type ActionClient = EntityClient<Action>;

/// Accessor for one [`Entity`] type (assets, actions, ...).
///
/// Lookups of ids that do not exist never fail; those ids are missing from the
/// returned map. Only transport, authorization and decoding failures are errors.
pub struct EntityClient<E: Entity> {
    token: Token,
    _entity: PhantomData<E>,
}

impl<E: Entity> Clone for EntityClient<E> {
    fn clone(&self) -> Self {
        Self::new(self.token.clone())
    }
}

impl<E: Entity> EntityClient<E> {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            _entity: PhantomData,
        }
    }

    /// Fetches every attribute of each entity in `ids`.
    pub async fn get_detailed(
        &self,
        ids: impl IntoIterator<Item = EntityId>,
    ) -> Result<BTreeMap<EntityId, E::Record>> {
        self.collect(ids, E::path_by_id).await
    }

    /// Finds the entity whose `field` equals `value`.
    ///
    /// Returns [`None`] unless exactly one entity matches; the server does not
    /// distinguish "no match" from "several matches".
    pub async fn find_by_field(
        &self,
        field: &str,
        value: impl ToString,
    ) -> Result<Option<E::Record>> {
        let form = [("Field", field.to_string()), ("Value", value.to_string())];
        let builder = self
            .token
            .http()
            .post(self.token.url(&E::find_by_field_path()))
            .form(&form);

        match self.token.send(builder).await? {
            Reply::Body(body) => decode(&body, E::RESOURCE).map(Some),
            Reply::Fault { fault, .. } => {
                debug!(
                    resource = E::RESOURCE,
                    field,
                    error_type = %fault.error_type,
                    "No unique match"
                );
                Ok(None)
            }
        }
    }

    async fn collect<T: DeserializeOwned>(
        &self,
        ids: impl IntoIterator<Item = EntityId>,
        path: fn(EntityId) -> String,
    ) -> Result<BTreeMap<EntityId, T>> {
        let ids: BTreeSet<EntityId> = ids.into_iter().collect();
        let mut records = BTreeMap::new();

        for id in ids {
            let builder = self.token.http().get(self.token.url(&path(id)));
            match self.token.send(builder).await? {
                Reply::Body(body) => {
                    records.insert(id, decode(&body, E::RESOURCE)?);
                }
                Reply::Fault { fault, .. } => {
                    debug!(
                        resource = E::RESOURCE,
                        id,
                        error_type = %fault.error_type,
                        "Skipping missing entity"
                    );
                }
            }
        }

        Ok(records)
    }
}

impl<E: BasicProjection> EntityClient<E> {
    /// Fetches the basic attributes of each entity in `ids`.
    ///
    /// ```no_run
    /// # use conquest_client::{AssetClient, Token};
    /// # async fn run(token: Token) -> conquest_client::Result<()> {
    /// let assets = AssetClient::new(token);
    /// let found = assets.get_basic([116983, 116984]).await?;
    /// if let Some(asset) = found.get(&116983) {
    ///     println!("{} ({})", asset.asset_description, asset.family_code);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_basic(
        &self,
        ids: impl IntoIterator<Item = EntityId>,
    ) -> Result<BTreeMap<EntityId, E::Basic>> {
        self.collect(ids, E::basic_path_by_id).await
    }
}

impl EntityClient<Action> {
    /// Deletes each action in `ids`.
    ///
    /// Maps every id to [`None`] when it was deleted, or to the fault the server
    /// answered with.
    pub async fn delete(
        &self,
        ids: impl IntoIterator<Item = ActionId>,
    ) -> Result<BTreeMap<ActionId, Option<ApiFault>>> {
        let ids: BTreeSet<ActionId> = ids.into_iter().collect();
        let mut outcome = BTreeMap::new();

        for id in ids {
            let builder = self.token.http().delete(self.token.url(&Action::path_by_id(id)));
            let fault = match self.token.send(builder).await? {
                Reply::Body(_) => None,
                Reply::Fault { fault, .. } => Some(fault),
            };
            outcome.insert(id, fault);
        }

        Ok(outcome)
    }
}
