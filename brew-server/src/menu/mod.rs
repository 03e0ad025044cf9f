//! Menu service
//!
//! CRUD over the menu record store plus the read-through lookup the order
//! lifecycle uses to resolve line items into recipes. No caching: callers
//! see whatever snapshot the record store holds.

use std::sync::Arc;

use shared::models::MenuItem;
use tracing::info;
use validator::Validate;

use crate::core::{ServiceError, ServiceResult};
use crate::store::RecordStore;

#[derive(Clone)]
pub struct MenuService {
    store: Arc<RecordStore<MenuItem>>,
}

impl MenuService {
    pub fn new(store: Arc<RecordStore<MenuItem>>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> ServiceResult<Vec<MenuItem>> {
        Ok(self.store.read_all()?)
    }

    /// Look up one product. `Ok(None)` means the product does not exist;
    /// callers decide whether that is `NotFound` or `ProductNotFound`.
    pub fn get(&self, product_id: &str) -> ServiceResult<Option<MenuItem>> {
        let items = self.store.read_all()?;
        Ok(items.into_iter().find(|i| i.product_id == product_id))
    }

    pub fn create(&self, item: MenuItem) -> ServiceResult<MenuItem> {
        item.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        self.store.update(|items| {
            if items.iter().any(|i| i.product_id == item.product_id) {
                return Err(ServiceError::Conflict(format!(
                    "menu item already exists: {}",
                    item.product_id
                )));
            }
            items.push(item.clone());
            Ok(())
        })?;

        info!(product_id = %item.product_id, "menu item created");
        Ok(item)
    }

    pub fn update(&self, product_id: &str, mut item: MenuItem) -> ServiceResult<MenuItem> {
        // The path parameter wins over whatever id the payload carries.
        item.product_id = product_id.to_string();
        item.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        self.store.update(|items| {
            let existing = items
                .iter_mut()
                .find(|i| i.product_id == product_id)
                .ok_or_else(|| ServiceError::NotFound(format!("menu item {product_id}")))?;
            *existing = item.clone();
            Ok::<_, ServiceError>(())
        })?;

        info!(product_id = %product_id, "menu item updated");
        Ok(item)
    }

    pub fn delete(&self, product_id: &str) -> ServiceResult<()> {
        self.store.update(|items| {
            let pos = items
                .iter()
                .position(|i| i.product_id == product_id)
                .ok_or_else(|| ServiceError::NotFound(format!("menu item {product_id}")))?;
            items.remove(pos);
            Ok::<_, ServiceError>(())
        })?;

        info!(product_id = %product_id, "menu item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MenuItemIngredient;

    fn service(dir: &tempfile::TempDir) -> MenuService {
        MenuService::new(Arc::new(
            RecordStore::open(dir.path(), "menu_items.json").unwrap(),
        ))
    }

    fn latte() -> MenuItem {
        MenuItem {
            product_id: "latte".to_string(),
            name: "Caffe Latte".to_string(),
            description: String::new(),
            price: 3.5,
            ingredients: vec![MenuItemIngredient {
                ingredient_id: "milk".to_string(),
                quantity: 200.0,
            }],
        }
    }

    #[test]
    fn test_create_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let menu = service(&dir);

        menu.create(latte()).unwrap();
        let found = menu.get("latte").unwrap().unwrap();
        assert_eq!(found.name, "Caffe Latte");
        assert!(menu.get("mocha").unwrap().is_none());
    }

    #[test]
    fn test_create_duplicate_is_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let menu = service(&dir);

        menu.create(latte()).unwrap();
        match menu.create(latte()) {
            Err(ServiceError::Conflict(_)) => {}
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(menu.list().unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_non_positive_price() {
        let dir = tempfile::tempdir().unwrap();
        let menu = service(&dir);

        let mut item = latte();
        item.price = 0.0;
        match menu.create(item) {
            Err(ServiceError::Validation(_)) => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let menu = service(&dir);

        match menu.update("latte", latte()) {
            Err(ServiceError::NotFound(_)) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let menu = service(&dir);

        menu.create(latte()).unwrap();
        menu.delete("latte").unwrap();
        assert!(menu.get("latte").unwrap().is_none());
        assert!(matches!(
            menu.delete("latte"),
            Err(ServiceError::NotFound(_))
        ));
    }
}
