use crate::auth::Authorized;
use crate::error::MockError;
use crate::fixtures::basic_projection;
use crate::state::{MockState, Resource};

use axum::{
    Form, Json,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use conquest_core::prelude::*;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn fault(status: StatusCode, error_type: &str, err: &MockError) -> Response {
    (status, Json(ApiFault::new(error_type, err.to_string()))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<MockError>() {
            return match err {
                MockError::NotFound { .. } => fault(StatusCode::NOT_FOUND, "NotFound", err),
                MockError::NoUniqueMatch { .. } => {
                    fault(StatusCode::NOT_FOUND, "NoUniqueMatch", err)
                }
                MockError::BadRequest(_) => fault(StatusCode::BAD_REQUEST, "BadRequest", err),
                MockError::Grant { error, description } => (
                    StatusCode::BAD_REQUEST,
                    Json(TokenFault {
                        error: error.clone(),
                        error_description: description.clone(),
                    }),
                )
                    .into_response(),
                MockError::Unauthorized => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "Message": err.to_string() })),
                )
                    .into_response(),
            };
        }

        error!("Internal Server Error: {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
            .into_response()
    }
}

/// POST /api/token
pub async fn issue_token(
    State(state): State<MockState>,
    request_headers: HeaderMap,
    Form(request): Form<TokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let connection = request_headers
        .get(headers::CONNECTION_NAME)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if connection != state.config().connection {
        return Err(ApiError::from(MockError::Grant {
            error: "invalid_connection".to_string(),
            description: format!("Connection '{connection}' does not exist."),
        }));
    }

    let grant = state.grant(&request)?;
    info!(grant_type = %request.grant_type, "Issued access token");
    Ok(Json(grant))
}

/// GET /api/{resource}/{id}
pub async fn get_entity(
    State(state): State<MockState>,
    _: Authorized,
    Path((resource, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = Resource::parse(&resource)?;
    Ok(Json(state.get(resource, id)?))
}

/// GET /api/{resource}/basic/{id}
pub async fn get_basic(
    State(state): State<MockState>,
    _: Authorized,
    Path((resource, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = Resource::parse(&resource)?;
    if resource != Resource::Asset {
        return Err(ApiError::from(MockError::BadRequest(format!(
            "{} has no basic view",
            resource.name()
        ))));
    }

    let asset = state.get(resource, id)?;
    Ok(Json(basic_projection(&asset)))
}

#[derive(Deserialize)]
pub struct FindByField {
    #[serde(rename = "Field")]
    field: String,
    #[serde(rename = "Value")]
    value: String,
}

/// POST /api/{resource}/find_by_field
pub async fn find_by_field(
    State(state): State<MockState>,
    _: Authorized,
    Path(resource): Path<String>,
    Form(search): Form<FindByField>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = Resource::parse(&resource)?;
    Ok(Json(state.find_by_field(
        resource,
        &search.field,
        &search.value,
    )?))
}

/// DELETE /api/{resource}/{id}
pub async fn delete_entity(
    State(state): State<MockState>,
    _: Authorized,
    Path((resource, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = Resource::parse(&resource)?;
    state.delete(resource, id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/import/add/{import_type}
/// Accepts a multipart upload in the `files` field. Returns the batch id.
pub async fn import_add(
    State(state): State<MockState>,
    _: Authorized,
    Path(import_type): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let import_type: ImportType = import_type
        .parse()
        .map_err(|e: InvalidImportType| MockError::BadRequest(e.to_string()))?;

    let mut contents = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(IMPORT_FILE_FIELD) {
            contents = Some(field.text().await?);
        }
    }

    let contents =
        contents.ok_or_else(|| MockError::BadRequest("No file was uploaded.".to_string()))?;
    let batch = state.import(import_type, &contents)?;

    info!(%batch, %import_type, "Accepted import batch");
    Ok(Json(batch))
}

/// GET /api/import/state/{batch}
pub async fn import_state(
    State(state): State<MockState>,
    _: Authorized,
    Path(batch): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.batch_state(&batch)?))
}

/// GET /api/import/error_csv/{batch}
pub async fn import_error_csv(
    State(state): State<MockState>,
    _: Authorized,
    Path(batch): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.batch_report(&batch)?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], report))
}

/// GET /api/system/connections
pub async fn connections(
    State(state): State<MockState>,
    _: Authorized,
) -> impl IntoResponse {
    Json(vec![state.config().connection.clone()])
}

/// GET /api/system/version
pub async fn version(_: Authorized) -> impl IntoResponse {
    Json(json!({
        "Server": "conquest_mock",
        "Version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/system/whoami
pub async fn whoami(Authorized { username }: Authorized) -> impl IntoResponse {
    Json(username)
}
