use crate::constants::routes;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Externally assigned integer identifier of an entity (`AssetID`, `ActionID`, ...).
pub type EntityId = i64;

/// A resource served by the generic entity routes (`/api/{resource}/...`).
pub trait Entity: Send + Sync + 'static {
    /// Resource segment of the entity's routes, e.g. `Asset`.
    const RESOURCE: &'static str;

    /// Full attribute set, as returned by `GET /api/{resource}/{id}` and `find_by_field`.
    type Record: DeserializeOwned + Serialize + Debug + Clone + PartialEq + Send;

    /// Path of a single entity.
    fn path_by_id(id: EntityId) -> String {
        routes::ENTITY_BY_ID
            .replace("{resource}", Self::RESOURCE)
            .replace("{id}", &id.to_string())
    }

    /// Path of the field search endpoint.
    fn find_by_field_path() -> String {
        routes::ENTITY_FIND_BY_FIELD.replace("{resource}", Self::RESOURCE)
    }
}

/// An entity that also exposes a reduced `basic` projection.
pub trait BasicProjection: Entity {
    /// Returned by `GET /api/{resource}/basic/{id}`.
    type Basic: DeserializeOwned + Serialize + Debug + Clone + PartialEq + Send;

    fn basic_path_by_id(id: EntityId) -> String {
        routes::ENTITY_BASIC_BY_ID
            .replace("{resource}", Self::RESOURCE)
            .replace("{id}", &id.to_string())
    }
}
