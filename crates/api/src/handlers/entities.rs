//! Generic create/list handlers shared by every entity route.

use axum::{extract::State, http::StatusCode, Json};
use db::{
    models::{Entity, Stored},
    repository,
};
use tracing::info;

use super::AppState;
use crate::{extract::ValidJson, ApiError};

/// `POST /<table>/` — validate the body, insert it, return the stored row.
pub async fn create<E: Entity>(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<E>,
) -> Result<(StatusCode, Json<Stored<E>>), ApiError> {
    let row = repository::create(state.gateway.as_ref(), &payload).await?;
    info!(table = %E::TABLE, "created row");
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /<table>/` — every row of the table, for every profile.
pub async fn list<E: Entity>(
    State(state): State<AppState>,
) -> Result<Json<Vec<Stored<E>>>, ApiError> {
    let rows = repository::list::<E>(state.gateway.as_ref()).await?;
    Ok(Json(rows))
}
