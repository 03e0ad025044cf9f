//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::MenuItem;

use crate::core::{Result, ServerError, ServerState, ServiceError};

/// POST /menu - create a menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItem>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    let item = state.menu.create(payload)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /menu - list all menu items
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu.list()?))
}

/// GET /menu/{id} - get a single menu item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MenuItem>> {
    let item = state
        .menu
        .get(&id)?
        .ok_or_else(|| ServerError::from(ServiceError::NotFound(format!("menu item {id}"))))?;
    Ok(Json(item))
}

/// PUT /menu/{id} - update a menu item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItem>,
) -> Result<Json<MenuItem>> {
    Ok(Json(state.menu.update(&id, payload)?))
}

/// DELETE /menu/{id} - delete a menu item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.menu.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
