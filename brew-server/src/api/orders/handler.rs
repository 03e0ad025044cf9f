//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{CreateOrderRequest, Order, UpdateOrderRequest};

use crate::core::{Result, ServerState};

/// POST /orders - create an order (deducts inventory atomically)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = state.orders.create(payload)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders - list all orders
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.orders.list()?))
}

/// GET /orders/{id} - get a single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    Ok(Json(state.orders.get(&id)?))
}

/// PUT /orders/{id} - update an open order (re-runs inventory checks on item changes)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<Order>> {
    Ok(Json(state.orders.update(&id, payload)?))
}

/// DELETE /orders/{id} - delete an order (open orders restock their reserved ingredients)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.orders.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /orders/{id}/close - close an open order
pub async fn close(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    Ok(Json(state.orders.close(&id)?))
}
