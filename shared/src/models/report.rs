//! Report Models

use serde::{Deserialize, Serialize};

/// Aggregate revenue over closed orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalSales {
    pub total_sales: f64,
}

/// Per-product popularity over closed orders, sorted by `total_orders`
/// descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularItem {
    pub product_id: String,
    pub name: String,
    /// Total units sold across closed orders.
    pub total_orders: u64,
    pub total_sales: f64,
}
