//! Order Model
//!
//! Lifecycle: `open` (created only after inventory deduction succeeded)
//! -> `closed` (exactly once). Deleting an open order restores the
//! ingredients it reserved; deleting a closed order does not.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Ingredient quantities deducted from inventory when this order was
    /// created (ingredient_id -> quantity). Reversal on deletion uses this
    /// snapshot verbatim, so later recipe edits cannot skew the restock.
    #[serde(default, rename = "reserved_ingredients")]
    pub reserved: BTreeMap<String, f64>,
}

impl Order {
    pub fn is_closed(&self) -> bool {
        self.status == OrderStatus::Closed
    }
}

/// One order line: product and how many units of it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItem {
    #[validate(length(min = 1, message = "product_id must not be empty"))]
    pub product_id: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "customer_name must not be empty"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "order must contain at least one item"), nested)]
    pub items: Vec<OrderItem>,
}

/// Update order payload. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    #[validate(length(min = 1, message = "customer_name must not be empty"))]
    pub customer_name: Option<String>,
    #[validate(length(min = 1, message = "order must contain at least one item"), nested)]
    pub items: Option<Vec<OrderItem>>,
}
