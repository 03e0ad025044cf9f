//! Server State
//!
//! All services share the three record stores constructed here once at
//! startup; there is no ambient global state. Menu and inventory CRUD go
//! through the same stores the order lifecycle reads, so lifecycle reads
//! always observe committed writes.

use std::sync::Arc;

use shared::models::{InventoryItem, MenuItem, Order};

use crate::core::{Config, ServerError};
use crate::inventory::InventoryService;
use crate::menu::MenuService;
use crate::orders::OrderManager;
use crate::reports::ReportsService;
use crate::store::RecordStore;

const MENU_FILE: &str = "menu_items.json";
const INVENTORY_FILE: &str = "inventory.json";
const ORDERS_FILE: &str = "orders.json";

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub menu: MenuService,
    pub inventory: InventoryService,
    pub orders: OrderManager,
    pub reports: ReportsService,
}

impl ServerState {
    pub fn initialize(config: &Config) -> Result<Self, ServerError> {
        let menu_store: Arc<RecordStore<MenuItem>> =
            Arc::new(RecordStore::open(&config.work_dir, MENU_FILE).map_err(anyhow::Error::from)?);
        let inventory_store: Arc<RecordStore<InventoryItem>> = Arc::new(
            RecordStore::open(&config.work_dir, INVENTORY_FILE).map_err(anyhow::Error::from)?,
        );
        let order_store: Arc<RecordStore<Order>> = Arc::new(
            RecordStore::open(&config.work_dir, ORDERS_FILE).map_err(anyhow::Error::from)?,
        );

        let menu = MenuService::new(menu_store.clone());
        let inventory = InventoryService::new(inventory_store);
        let orders = OrderManager::new(order_store.clone(), menu.clone(), inventory.clone());
        let reports = ReportsService::new(order_store, menu_store);

        tracing::info!(work_dir = %config.work_dir, "record stores initialized");

        Ok(Self {
            menu,
            inventory,
            orders,
            reports,
        })
    }
}
