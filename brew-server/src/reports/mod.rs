//! Reporting aggregator
//!
//! Read-only statistics over closed orders against the current menu.
//! Orders whose products have since left the menu are skipped; no
//! consistency concerns beyond the record-store snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use shared::models::{MenuItem, Order, PopularItem, TotalSales};

use crate::core::ServiceResult;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct ReportsService {
    orders: Arc<RecordStore<Order>>,
    menu: Arc<RecordStore<MenuItem>>,
}

impl ReportsService {
    pub fn new(orders: Arc<RecordStore<Order>>, menu: Arc<RecordStore<MenuItem>>) -> Self {
        Self { orders, menu }
    }

    pub fn total_sales(&self) -> ServiceResult<TotalSales> {
        let orders = self.orders.read_all()?;
        let menu = self.menu_by_id()?;

        let mut total_sales = 0.0;
        for order in orders.iter().filter(|o| o.is_closed()) {
            for line in &order.items {
                if let Some(menu_item) = menu.get(line.product_id.as_str()) {
                    total_sales += menu_item.price * f64::from(line.quantity);
                }
            }
        }

        Ok(TotalSales { total_sales })
    }

    /// Units sold and revenue per product, closed orders only, sorted by
    /// units descending.
    pub fn popular_items(&self) -> ServiceResult<Vec<PopularItem>> {
        let orders = self.orders.read_all()?;
        let menu = self.menu_by_id()?;

        let mut popularity: HashMap<String, PopularItem> = HashMap::new();
        for order in orders.iter().filter(|o| o.is_closed()) {
            for line in &order.items {
                let Some(menu_item) = menu.get(line.product_id.as_str()) else {
                    continue;
                };
                let entry = popularity
                    .entry(line.product_id.clone())
                    .or_insert_with(|| PopularItem {
                        product_id: line.product_id.clone(),
                        name: menu_item.name.clone(),
                        total_orders: 0,
                        total_sales: 0.0,
                    });
                entry.total_orders += u64::from(line.quantity);
                entry.total_sales += menu_item.price * f64::from(line.quantity);
            }
        }

        let mut result: Vec<PopularItem> = popularity.into_values().collect();
        result.sort_by(|a, b| b.total_orders.cmp(&a.total_orders));
        Ok(result)
    }

    fn menu_by_id(&self) -> ServiceResult<HashMap<String, MenuItem>> {
        let items = self.menu.read_all()?;
        Ok(items
            .into_iter()
            .map(|item| (item.product_id.clone(), item))
            .collect())
    }
}
