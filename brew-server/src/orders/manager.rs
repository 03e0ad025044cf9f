//! Order lifecycle manager
//!
//! Owns the order/inventory consistency contract:
//!
//! - an order is persisted `open` only after its full ingredient
//!   requirement was deducted in one atomic batch;
//! - deleting an open order restores exactly the quantities it reserved
//!   at creation (the snapshot travels on the record, so recipe edits in
//!   between cannot skew the restock);
//! - closing is a pure status transition and never touches inventory.
//!
//! Lock order: where order and inventory mutations nest, the orders store
//! lock is taken first and the inventory lock inside it. `create` is the
//! exception and runs them as two separate critical sections; a crash
//! between the deduction and the order write leaves inventory deducted
//! with no matching record. That window is a documented limitation: the
//! failure is logged with the reserved quantities so the mismatch can be
//! reconciled from the files, and a failed order write triggers an
//! immediate compensating restock.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use shared::models::{CreateOrderRequest, Order, OrderItem, OrderStatus, UpdateOrderRequest};
use tracing::{error, info, warn};
use validator::Validate;

use crate::core::{ServiceError, ServiceResult};
use crate::inventory::InventoryService;
use crate::menu::MenuService;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct OrderManager {
    store: Arc<RecordStore<Order>>,
    menu: MenuService,
    inventory: InventoryService,
}

impl OrderManager {
    pub fn new(
        store: Arc<RecordStore<Order>>,
        menu: MenuService,
        inventory: InventoryService,
    ) -> Self {
        Self {
            store,
            menu,
            inventory,
        }
    }

    // ========== Operations ==========

    pub fn create(&self, req: CreateOrderRequest) -> ServiceResult<Order> {
        req.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        let customer_name = req.customer_name.trim();
        if customer_name.is_empty() {
            return Err(ServiceError::Validation(
                "customer_name must not be blank".to_string(),
            ));
        }

        // Resolve recipes before touching inventory; a missing product
        // aborts with no side effect.
        let required = self.resolve_requirements(&req.items)?;

        // Deduct the whole requirement in one atomic batch. Any failure
        // leaves inventory untouched and the order is never persisted.
        self.inventory.apply_batch(&negate(&required))?;

        let order = Order {
            order_id: uuid::Uuid::new_v4().to_string(),
            customer_name: customer_name.to_string(),
            items: req.items,
            status: OrderStatus::Open,
            created_at: Utc::now(),
            reserved: required.clone(),
        };

        let persisted = self.store.update(|orders| {
            orders.push(order.clone());
            Ok::<_, ServiceError>(())
        });

        if let Err(err) = persisted {
            error!(
                order_id = %order.order_id,
                reserved = ?required,
                error = %err,
                "order write failed after inventory deduction, attempting compensating restock"
            );
            if let Err(restock_err) = self.inventory.apply_batch(&required) {
                error!(
                    order_id = %order.order_id,
                    reserved = ?required,
                    error = %restock_err,
                    "compensating restock failed, inventory requires manual reconciliation"
                );
            }
            return Err(err);
        }

        info!(order_id = %order.order_id, customer = %order.customer_name, "order created");
        Ok(order)
    }

    pub fn get(&self, id: &str) -> ServiceResult<Order> {
        let orders = self.store.read_all()?;
        orders
            .into_iter()
            .find(|o| o.order_id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("order {id}")))
    }

    pub fn list(&self) -> ServiceResult<Vec<Order>> {
        Ok(self.store.read_all()?)
    }

    /// Transition an open order to `closed`. Exactly-once: closing an
    /// already-closed order is rejected and changes nothing.
    pub fn close(&self, id: &str) -> ServiceResult<Order> {
        let order = self.store.update(|orders| {
            let order = orders
                .iter_mut()
                .find(|o| o.order_id == id)
                .ok_or_else(|| ServiceError::NotFound(format!("order {id}")))?;
            if order.is_closed() {
                return Err(ServiceError::AlreadyClosed(id.to_string()));
            }
            order.status = OrderStatus::Closed;
            Ok(order.clone())
        })?;

        info!(order_id = %id, "order closed");
        Ok(order)
    }

    /// Delete an order. An open order's reserved ingredients are restocked
    /// before the record is removed; a restock failure (ingredient deleted
    /// from inventory since) is logged and does not block the deletion.
    /// Deleting a closed order leaves inventory alone: the sale stands.
    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        let mut restocked: Option<BTreeMap<String, f64>> = None;
        let removed = self.store.update(|orders| {
            let pos = orders
                .iter()
                .position(|o| o.order_id == id)
                .ok_or_else(|| ServiceError::NotFound(format!("order {id}")))?;

            if orders[pos].status == OrderStatus::Open {
                match self.inventory.apply_batch(&orders[pos].reserved) {
                    Ok(()) => restocked = Some(orders[pos].reserved.clone()),
                    Err(err) => warn!(
                        order_id = %id,
                        error = %err,
                        "inventory restock failed during order deletion, deleting order anyway"
                    ),
                }
            }
            orders.remove(pos);
            Ok::<_, ServiceError>(())
        });

        if let Err(err) = removed {
            // The restock committed to the inventory file before the order
            // record write failed; take the stock back so a retried delete
            // restocks only once.
            if let Some(reserved) = restocked {
                error!(
                    order_id = %id,
                    reserved = ?reserved,
                    error = %err,
                    "order removal failed after inventory restock, attempting compensating deduction"
                );
                if let Err(deduct_err) = self.inventory.apply_batch(&negate(&reserved)) {
                    error!(
                        order_id = %id,
                        reserved = ?reserved,
                        error = %deduct_err,
                        "compensating deduction failed, inventory requires manual reconciliation"
                    );
                }
            }
            return Err(err);
        }

        info!(order_id = %id, "order deleted");
        Ok(())
    }

    /// Update an open order. Closed orders are immutable (`Conflict`).
    ///
    /// An item change re-runs the same resolution and availability path as
    /// creation: the difference between the new requirement and the
    /// reserved snapshot is applied as one atomic batch, and the snapshot
    /// is replaced. Insufficient stock rejects the update with no change
    /// to either store.
    pub fn update(&self, id: &str, req: UpdateOrderRequest) -> ServiceResult<Order> {
        req.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        if let Some(name) = &req.customer_name
            && name.trim().is_empty()
        {
            return Err(ServiceError::Validation(
                "customer_name must not be blank".to_string(),
            ));
        }

        // Resolve the new requirement outside the orders lock; menu reads
        // take their own store lock.
        let new_requirement = match &req.items {
            Some(items) => Some(self.resolve_requirements(items)?),
            None => None,
        };

        let order = self.store.update(|orders| {
            let order = orders
                .iter_mut()
                .find(|o| o.order_id == id)
                .ok_or_else(|| ServiceError::NotFound(format!("order {id}")))?;
            if order.is_closed() {
                return Err(ServiceError::Conflict(format!(
                    "order {id} is closed and cannot be updated"
                )));
            }

            if let (Some(items), Some(required)) = (req.items, new_requirement) {
                // delta < 0 consumes additional stock, delta > 0 returns
                // the excess; rejected deltas leave both stores untouched.
                let mut delta = BTreeMap::new();
                for (ingredient_id, qty) in &required {
                    *delta.entry(ingredient_id.clone()).or_insert(0.0) -= qty;
                }
                for (ingredient_id, qty) in &order.reserved {
                    *delta.entry(ingredient_id.clone()).or_insert(0.0) += qty;
                }
                delta.retain(|_, d| *d != 0.0);

                self.inventory.apply_batch(&delta)?;
                order.items = items;
                order.reserved = required;
            }
            if let Some(name) = req.customer_name {
                order.customer_name = name.trim().to_string();
            }

            Ok(order.clone())
        })?;

        info!(order_id = %id, "order updated");
        Ok(order)
    }

    // ========== Requirement resolution ==========

    /// Aggregate the ingredient quantities the given line items require,
    /// summing when the same ingredient appears in several products.
    fn resolve_requirements(&self, items: &[OrderItem]) -> ServiceResult<BTreeMap<String, f64>> {
        let mut required = BTreeMap::new();
        for line in items {
            let menu_item = self
                .menu
                .get(&line.product_id)?
                .ok_or_else(|| ServiceError::ProductNotFound(line.product_id.clone()))?;
            for ingredient in &menu_item.ingredients {
                *required.entry(ingredient.ingredient_id.clone()).or_insert(0.0) +=
                    ingredient.quantity * f64::from(line.quantity);
            }
        }
        Ok(required)
    }
}

fn negate(adjustments: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    adjustments.iter().map(|(k, v)| (k.clone(), -v)).collect()
}
