//! Reports API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/total-sales", get(handler::total_sales))
        .route("/popular-items", get(handler::popular_items))
}
