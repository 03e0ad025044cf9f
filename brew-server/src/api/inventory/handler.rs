//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::InventoryItem;

use crate::core::{Result, ServerError, ServerState, ServiceError};

/// POST /inventory - create an inventory item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryItem>,
) -> Result<(StatusCode, Json<InventoryItem>)> {
    let item = state.inventory.create(payload)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /inventory - list all inventory items
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<InventoryItem>>> {
    Ok(Json(state.inventory.list()?))
}

/// GET /inventory/{id} - get a single inventory item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<InventoryItem>> {
    let item = state
        .inventory
        .get(&id)?
        .ok_or_else(|| ServerError::from(ServiceError::NotFound(format!("inventory item {id}"))))?;
    Ok(Json(item))
}

/// PUT /inventory/{id} - update an inventory item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<InventoryItem>,
) -> Result<Json<InventoryItem>> {
    Ok(Json(state.inventory.update(&id, payload)?))
}

/// DELETE /inventory/{id} - delete an inventory item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.inventory.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
