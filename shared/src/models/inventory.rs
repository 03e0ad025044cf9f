//! Inventory Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inventory entity: available stock for one ingredient.
///
/// Invariant: `quantity` is never negative after a committed adjustment.
/// Any adjustment that would drive it below zero is rejected before being
/// applied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InventoryItem {
    #[validate(length(min = 1, message = "ingredient_id must not be empty"))]
    pub ingredient_id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "quantity must not be negative"))]
    pub quantity: f64,
    /// Measurement unit ("g", "ml", "shots", ...). Diagnostic only.
    #[serde(default)]
    pub unit: String,
}
