//! Data models
//!
//! Field names match the on-disk JSON layout (`menu_items.json`,
//! `inventory.json`, `orders.json`), one file per entity type holding the
//! full current collection as an array of records.

pub mod inventory;
pub mod menu;
pub mod order;
pub mod report;

// Re-exports
pub use inventory::*;
pub use menu::*;
pub use order::*;
pub use report::*;
