use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::error;

use service::cafe::Cafe;
use service::errors::ServiceError;

use crate::errors::JsonMessage;
use crate::routes::SharedRepo;

// Response texts are the external contract; keep them byte for byte.
// The update 404 spells "café" with an accent while get/delete do not.
const MSG_NOT_FOUND: &str = "No se encontró ningún cafe con ese id";
const MSG_NOT_FOUND_UPDATE: &str = "No se encontró ningún café con ese id";
const MSG_MISSING_ID: &str = "El cafe debe tener un ID";
const MSG_DUPLICATE_ID: &str = "Ya existe un cafe con ese id";
const MSG_ID_MISMATCH: &str = "El id del parámetro no coincide con el id del café recibido";
const MSG_NO_TOKEN: &str = "No recibió ningún token en las cabeceras";
const MSG_UNKNOWN_ROUTE: &str = "La ruta que intenta consultar no existe";

/// Storage faults have no contract message; log and answer 500.
fn storage_error(e: ServiceError) -> JsonMessage {
    error!(error = %e, "store operation failed");
    JsonMessage::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

/// GET /cafes — the full ordered collection.
pub async fn list_cafes(State(repo): State<SharedRepo>) -> Result<Json<Vec<Cafe>>, JsonMessage> {
    repo.list().await.map(Json).map_err(storage_error)
}

/// GET /cafes/:id — first record whose id loosely matches the path.
pub async fn get_cafe(
    State(repo): State<SharedRepo>,
    Path(id): Path<String>,
) -> Result<Json<Cafe>, JsonMessage> {
    match repo.get(&id).await {
        Ok(cafe) => Ok(Json(cafe)),
        Err(ServiceError::NotFound) => Err(JsonMessage::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND)),
        Err(e) => Err(storage_error(e)),
    }
}

/// POST /cafes — append a record, echoing the whole updated collection.
pub async fn create_cafe(
    State(repo): State<SharedRepo>,
    Json(cafe): Json<Cafe>,
) -> Result<(StatusCode, Json<Vec<Cafe>>), JsonMessage> {
    match repo.create(cafe).await {
        Ok(all) => Ok((StatusCode::CREATED, Json(all))),
        Err(ServiceError::MissingId) => {
            Err(JsonMessage::new(StatusCode::BAD_REQUEST, MSG_MISSING_ID))
        }
        Err(ServiceError::DuplicateId) => {
            Err(JsonMessage::new(StatusCode::BAD_REQUEST, MSG_DUPLICATE_ID))
        }
        Err(e) => Err(storage_error(e)),
    }
}

/// PUT /cafes/:id — replace the matching record in place.
pub async fn update_cafe(
    State(repo): State<SharedRepo>,
    Path(id): Path<String>,
    Json(cafe): Json<Cafe>,
) -> Result<Json<Vec<Cafe>>, JsonMessage> {
    match repo.update(&id, cafe).await {
        Ok(all) => Ok(Json(all)),
        Err(ServiceError::IdMismatch) => {
            Err(JsonMessage::new(StatusCode::BAD_REQUEST, MSG_ID_MISMATCH))
        }
        Err(ServiceError::NotFound) => {
            Err(JsonMessage::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND_UPDATE))
        }
        Err(e) => Err(storage_error(e)),
    }
}

/// DELETE /cafes/:id — requires an Authorization header with any non-empty
/// value. Presence is the whole check: no scheme, no token validation.
pub async fn delete_cafe(
    State(repo): State<SharedRepo>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<Cafe>>, JsonMessage> {
    let has_token = headers
        .get(header::AUTHORIZATION)
        .map(|v| !v.as_bytes().is_empty())
        .unwrap_or(false);
    if !has_token {
        return Err(JsonMessage::new(StatusCode::BAD_REQUEST, MSG_NO_TOKEN));
    }

    match repo.delete(&id).await {
        Ok(remaining) => Ok(Json(remaining)),
        Err(ServiceError::NotFound) => Err(JsonMessage::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND)),
        Err(e) => Err(storage_error(e)),
    }
}

/// Catch-all for any path outside the /cafes surface.
pub async fn unknown_route() -> JsonMessage {
    JsonMessage::new(StatusCode::NOT_FOUND, MSG_UNKNOWN_ROUTE)
}
