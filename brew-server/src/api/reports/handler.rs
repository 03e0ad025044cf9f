//! Report API Handlers

use axum::{Json, extract::State};
use shared::models::{PopularItem, TotalSales};

use crate::core::{Result, ServerState};

/// GET /reports/total-sales - revenue over closed orders
pub async fn total_sales(State(state): State<ServerState>) -> Result<Json<TotalSales>> {
    Ok(Json(state.reports.total_sales()?))
}

/// GET /reports/popular-items - units sold per product, descending
pub async fn popular_items(State(state): State<ServerState>) -> Result<Json<Vec<PopularItem>>> {
    Ok(Json(state.reports.popular_items()?))
}
