//! Brew Server - flat-file order management backend for a coffee shop
//!
//! # Architecture
//!
//! ```text
//! brew-server/src/
//! ├── core/       # config, state, errors, HTTP server
//! ├── store/      # per-entity flat-file record store (atomic replace + lock)
//! ├── menu/       # product/recipe CRUD and lookup
//! ├── inventory/  # stock CRUD and atomic batch adjustments
//! ├── orders/     # order lifecycle (the consistency contract)
//! ├── reports/    # sales statistics over closed orders
//! ├── api/        # axum routes and handlers
//! └── utils/      # logging
//! ```
//!
//! State is persisted as one JSON file per entity type in the configured
//! data directory; every read-modify-write cycle runs under that store's
//! exclusive lock.

pub mod api;
pub mod core;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod reports;
pub mod store;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerError, ServerState, ServiceError};
pub use inventory::InventoryService;
pub use menu::MenuService;
pub use orders::OrderManager;
pub use reports::ReportsService;
pub use store::{RecordStore, StoreError};
pub use utils::logger::{init_logger, init_logger_with_level};

/// Load `.env` and set up logging.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}
