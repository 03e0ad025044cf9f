//! API routes
//!
//! One module per resource, each exposing a `router()` merged here:
//!
//! - [`health`] - liveness probe
//! - [`menu`] - menu item management
//! - [`inventory`] - inventory item management
//! - [`orders`] - order lifecycle
//! - [`reports`] - sales statistics

pub mod health;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod reports;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(inventory::router())
        .merge(orders::router())
        .merge(reports::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
