//! Inventory ledger
//!
//! Stock levels per ingredient, plus the batched relative adjustment the
//! order lifecycle runs (negative delta = consume, positive = restock).
//!
//! `apply_batch` is the central correctness primitive: the whole batch is
//! checked and applied inside one record-store critical section, so an
//! order touching five ingredients can never deduct three and fail on the
//! fourth.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::models::InventoryItem;
use tracing::info;
use validator::Validate;

use crate::core::{ServiceError, ServiceResult};
use crate::store::RecordStore;

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<RecordStore<InventoryItem>>,
}

impl InventoryService {
    pub fn new(store: Arc<RecordStore<InventoryItem>>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> ServiceResult<Vec<InventoryItem>> {
        Ok(self.store.read_all()?)
    }

    pub fn get(&self, ingredient_id: &str) -> ServiceResult<Option<InventoryItem>> {
        let items = self.store.read_all()?;
        Ok(items.into_iter().find(|i| i.ingredient_id == ingredient_id))
    }

    pub fn create(&self, item: InventoryItem) -> ServiceResult<InventoryItem> {
        item.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        self.store.update(|items| {
            if items.iter().any(|i| i.ingredient_id == item.ingredient_id) {
                return Err(ServiceError::Conflict(format!(
                    "inventory item already exists: {}",
                    item.ingredient_id
                )));
            }
            items.push(item.clone());
            Ok(())
        })?;

        info!(ingredient_id = %item.ingredient_id, "inventory item created");
        Ok(item)
    }

    pub fn update(&self, ingredient_id: &str, mut item: InventoryItem) -> ServiceResult<InventoryItem> {
        item.ingredient_id = ingredient_id.to_string();
        item.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        self.store.update(|items| {
            let existing = items
                .iter_mut()
                .find(|i| i.ingredient_id == ingredient_id)
                .ok_or_else(|| ServiceError::NotFound(format!("inventory item {ingredient_id}")))?;
            *existing = item.clone();
            Ok::<_, ServiceError>(())
        })?;

        info!(ingredient_id = %ingredient_id, "inventory item updated");
        Ok(item)
    }

    pub fn delete(&self, ingredient_id: &str) -> ServiceResult<()> {
        self.store.update(|items| {
            let pos = items
                .iter()
                .position(|i| i.ingredient_id == ingredient_id)
                .ok_or_else(|| ServiceError::NotFound(format!("inventory item {ingredient_id}")))?;
            items.remove(pos);
            Ok::<_, ServiceError>(())
        })?;

        info!(ingredient_id = %ingredient_id, "inventory item deleted");
        Ok(())
    }

    /// Apply a batch of relative quantity adjustments, all-or-nothing.
    ///
    /// Every referenced ingredient must exist and every resulting quantity
    /// must stay non-negative; the first violation rejects the entire
    /// batch and no stored quantity changes. Runs as a single critical
    /// section on the inventory store.
    pub fn apply_batch(&self, adjustments: &BTreeMap<String, f64>) -> ServiceResult<()> {
        if adjustments.is_empty() {
            return Ok(());
        }

        self.store.update(|items| {
            for (ingredient_id, delta) in adjustments {
                let item = items
                    .iter_mut()
                    .find(|i| i.ingredient_id == *ingredient_id)
                    .ok_or_else(|| ServiceError::IngredientNotFound(ingredient_id.clone()))?;

                let next = item.quantity + delta;
                if next < 0.0 {
                    return Err(ServiceError::InsufficientStock {
                        ingredient_id: ingredient_id.clone(),
                        name: item.name.clone(),
                        unit: item.unit.clone(),
                        required: -delta,
                        available: item.quantity,
                    });
                }
                item.quantity = next;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(dir: &tempfile::TempDir) -> InventoryService {
        InventoryService::new(Arc::new(
            RecordStore::open(dir.path(), "inventory.json").unwrap(),
        ))
    }

    fn item(id: &str, quantity: f64) -> InventoryItem {
        InventoryItem {
            ingredient_id: id.to_string(),
            name: id.to_string(),
            quantity,
            unit: "g".to_string(),
        }
    }

    fn batch(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(id, delta)| (id.to_string(), *delta))
            .collect()
    }

    #[test]
    fn test_apply_batch_deducts_and_restocks() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(&dir);
        inventory.create(item("flour", 100.0)).unwrap();

        inventory.apply_batch(&batch(&[("flour", -30.0)])).unwrap();
        assert_eq!(inventory.get("flour").unwrap().unwrap().quantity, 70.0);

        inventory.apply_batch(&batch(&[("flour", 30.0)])).unwrap();
        assert_eq!(inventory.get("flour").unwrap().unwrap().quantity, 100.0);
    }

    #[test]
    fn test_apply_batch_is_all_or_nothing_on_insufficient_stock() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(&dir);
        inventory.create(item("flour", 100.0)).unwrap();
        inventory.create(item("sugar", 5.0)).unwrap();

        // flour would succeed, sugar fails; neither may change
        let result = inventory.apply_batch(&batch(&[("flour", -50.0), ("sugar", -10.0)]));
        match result {
            Err(ServiceError::InsufficientStock {
                ingredient_id,
                required,
                available,
                ..
            }) => {
                assert_eq!(ingredient_id, "sugar");
                assert_eq!(required, 10.0);
                assert_eq!(available, 5.0);
            }
            other => panic!("expected insufficient stock, got {other:?}"),
        }

        assert_eq!(inventory.get("flour").unwrap().unwrap().quantity, 100.0);
        assert_eq!(inventory.get("sugar").unwrap().unwrap().quantity, 5.0);
    }

    #[test]
    fn test_apply_batch_unknown_ingredient_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(&dir);
        inventory.create(item("flour", 100.0)).unwrap();

        let result = inventory.apply_batch(&batch(&[("flour", -10.0), ("ghost", -1.0)]));
        assert!(matches!(result, Err(ServiceError::IngredientNotFound(id)) if id == "ghost"));
        assert_eq!(inventory.get("flour").unwrap().unwrap().quantity, 100.0);
    }

    #[test]
    fn test_apply_batch_allows_exact_depletion() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(&dir);
        inventory.create(item("flour", 25.0)).unwrap();

        inventory.apply_batch(&batch(&[("flour", -25.0)])).unwrap();
        assert_eq!(inventory.get("flour").unwrap().unwrap().quantity, 0.0);
    }

    #[test]
    fn test_create_duplicate_is_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(&dir);
        inventory.create(item("flour", 10.0)).unwrap();
        assert!(matches!(
            inventory.create(item("flour", 5.0)),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn test_create_rejects_negative_quantity() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = service(&dir);
        assert!(matches!(
            inventory.create(item("flour", -1.0)),
            Err(ServiceError::Validation(_))
        ));
    }
}
