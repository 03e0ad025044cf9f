//! Menu Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu item entity: a sellable product and its ingredient recipe.
///
/// Edits do not retroactively affect historical orders; every order
/// snapshots its resolved ingredient requirements at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    #[validate(length(min = 1, message = "product_id must not be empty"))]
    pub product_id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: f64,
    #[validate(nested)]
    pub ingredients: Vec<MenuItemIngredient>,
}

/// One recipe line: ingredient consumed per unit of the product sold.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemIngredient {
    #[validate(length(min = 1, message = "ingredient_id must not be empty"))]
    pub ingredient_id: String,
    /// Quantity per unit, in the ingredient's own unit.
    #[validate(range(exclusive_min = 0.0, message = "ingredient quantity must be positive"))]
    pub quantity: f64,
}
