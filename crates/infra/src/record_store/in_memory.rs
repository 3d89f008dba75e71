use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Context;

use stockroom_core::ItemId;
use stockroom_inventory::{InventoryItem, NewInventoryItem, RecordStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Records {
    rows: BTreeMap<ItemId, InventoryItem>,
    last_id: u64,
}

/// In-memory inventory table.
///
/// Intended for tests/dev. Ids are assigned from 1 and never reused, like an
/// autoincrement primary key.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Records>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated from a JSON array of new items.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let items: Vec<NewInventoryItem> =
            serde_json::from_str(json).context("failed to parse inventory seed data")?;

        let store = Self::new();
        for (idx, item) in items.into_iter().enumerate() {
            store
                .insert(item)
                .with_context(|| format!("failed to insert seed item at index {idx}"))?;
        }
        tracing::debug!(items = store.len()?, "seeded in-memory record store");
        Ok(store)
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.rows.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Records>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Records>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }
}

impl RecordStore for InMemoryRecordStore {
    fn find_by_id(&self, id: ItemId) -> StoreResult<Option<InventoryItem>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    fn insert(&self, item: NewInventoryItem) -> StoreResult<ItemId> {
        let mut records = self.write()?;

        let next = records
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("id sequence exhausted".to_string()))?;
        let id = ItemId::new(next).map_err(|e| StoreError::Backend(e.to_string()))?;
        let row = InventoryItem::from_new(id, item)
            .map_err(|e| StoreError::Constraint(e.to_string()))?;

        records.last_id = next;
        records.rows.insert(id, row);
        Ok(id)
    }

    fn update_quantity(&self, id: ItemId, quantity: i64) -> StoreResult<u64> {
        if quantity < 0 {
            return Err(StoreError::Constraint(format!(
                "quantity for item {id} cannot be negative (got {quantity})"
            )));
        }

        let mut records = self.write()?;
        let Some(row) = records.rows.get_mut(&id) else {
            return Ok(0);
        };
        *row = row
            .with_quantity(quantity)
            .map_err(|e| StoreError::Constraint(e.to_string()))?;
        Ok(1)
    }

    fn delete(&self, id: ItemId) -> StoreResult<u64> {
        let mut records = self.write()?;
        Ok(u64::from(records.rows.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::Price;

    fn new_book(name: &str, quantity: i64) -> NewInventoryItem {
        NewInventoryItem {
            name: name.to_string(),
            price: Price::from_minor_units(19_900),
            quantity,
            supplier_name: "Manning".to_string(),
            supplier_phone: "555-0123".to_string(),
        }
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let store = InMemoryRecordStore::new();
        let a = store.insert(new_book("A", 1)).unwrap();
        let b = store.insert(new_book("B", 2)).unwrap();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = InMemoryRecordStore::new();
        let a = store.insert(new_book("A", 1)).unwrap();
        assert_eq!(store.delete(a).unwrap(), 1);
        let b = store.insert(new_book("B", 1)).unwrap();
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn insert_refuses_invalid_rows() {
        let store = InMemoryRecordStore::new();
        assert!(matches!(
            store.insert(new_book("", 1)),
            Err(StoreError::Constraint(_))
        ));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn update_reports_rows_affected() {
        let store = InMemoryRecordStore::new();
        let id = store.insert(new_book("A", 1)).unwrap();
        let missing = ItemId::new(99).unwrap();

        assert_eq!(store.update_quantity(id, 8).unwrap(), 1);
        assert_eq!(store.find_by_id(id).unwrap().unwrap().quantity(), 8);
        assert_eq!(store.update_quantity(missing, 8).unwrap(), 0);
    }

    #[test]
    fn update_refuses_negative_quantity() {
        let store = InMemoryRecordStore::new();
        let id = store.insert(new_book("A", 1)).unwrap();

        assert!(matches!(
            store.update_quantity(id, -1),
            Err(StoreError::Constraint(_))
        ));
        assert_eq!(store.find_by_id(id).unwrap().unwrap().quantity(), 1);
    }

    #[test]
    fn poisoned_lock_is_reported_as_backend_failure() {
        let store = std::sync::Arc::new(InMemoryRecordStore::new());
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.len(), Err(StoreError::Backend(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Backend(_))));
        assert!(matches!(store.find_all(), Err(StoreError::Backend(_))));
    }

    #[test]
    fn delete_of_missing_row_affects_nothing() {
        let store = InMemoryRecordStore::new();
        assert_eq!(store.delete(ItemId::new(1).unwrap()).unwrap(), 0);
    }

    #[test]
    fn find_all_is_ordered_by_id() {
        let store = InMemoryRecordStore::new();
        for name in ["C", "A", "B"] {
            store.insert(new_book(name, 1)).unwrap();
        }
        let names: Vec<_> = store
            .find_all()
            .unwrap()
            .iter()
            .map(|item| item.name().to_string())
            .collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn seeds_from_json() {
        let store = InMemoryRecordStore::from_json(
            r#"[
                {"name": "Head First Java", "price": 45000, "quantity": 3,
                 "supplier_name": "O'Reilly", "supplier_phone": "555-0001"},
                {"name": "Effective Java", "price": 52500, "quantity": 0,
                 "supplier_name": "Addison-Wesley", "supplier_phone": "555-0002"}
            ]"#,
        )
        .unwrap();

        let items = store.find_all().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name(), "Effective Java");
        assert_eq!(items[1].price().to_string(), "525.00");
        assert!(!items[1].in_stock());
    }

    #[test]
    fn seed_rejects_invalid_rows_with_context() {
        let err = InMemoryRecordStore::from_json(
            r#"[{"name": "", "price": 1, "quantity": 1,
                 "supplier_name": "", "supplier_phone": ""}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("index 0"));
    }
}
