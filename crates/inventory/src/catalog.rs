//! Read model and record lifecycle: list, detail, add, remove.

use thiserror::Error;

use stockroom_core::{DomainError, ItemId};

use crate::adjustment::PersistenceError;
use crate::item::{InventoryItem, NewInventoryItem};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("item {item_id} not found")]
    NotFound { item_id: ItemId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A delete the store acknowledged.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Removed {
    pub item_id: ItemId,
    pub rows_affected: u64,
}

/// Every record, ordered by id (the list screen).
pub fn list_items<S>(store: &S) -> Result<Vec<InventoryItem>, CatalogError>
where
    S: RecordStore + ?Sized,
{
    Ok(store.find_all()?)
}

/// One record by id (the detail screen).
pub fn find_item<S>(store: &S, item_id: ItemId) -> Result<InventoryItem, CatalogError>
where
    S: RecordStore + ?Sized,
{
    store.find_by_id(item_id)?.ok_or(CatalogError::NotFound { item_id })
}

/// Validate and insert a new record.
pub fn add_item<S>(store: &S, item: NewInventoryItem) -> Result<ItemId, CatalogError>
where
    S: RecordStore + ?Sized,
{
    item.validate()?;
    let item_id = store.insert(item)?;
    tracing::debug!(%item_id, "inventory item added");
    Ok(item_id)
}

/// Delete a record; zero rows deleted is a failure, as with quantity writes.
pub fn remove_item<S>(store: &S, item_id: ItemId) -> Result<Removed, PersistenceError>
where
    S: RecordStore + ?Sized,
{
    let rows_affected = store.delete(item_id)?;
    if rows_affected == 0 {
        tracing::warn!(%item_id, "delete matched no rows");
        return Err(PersistenceError::NoRowsAffected { item_id });
    }

    tracing::debug!(%item_id, "inventory item removed");
    Ok(Removed {
        item_id,
        rows_affected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Price;
    use crate::store::MockRecordStore;
    use mockall::predicate::eq;

    fn test_item_id() -> ItemId {
        ItemId::new(21).unwrap()
    }

    fn new_book(name: &str) -> NewInventoryItem {
        NewInventoryItem {
            name: name.to_string(),
            price: Price::from_minor_units(25_000),
            quantity: 2,
            supplier_name: "O'Reilly".to_string(),
            supplier_phone: "555-0199".to_string(),
        }
    }

    #[test]
    fn find_item_maps_missing_record_to_not_found() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_by_id()
            .with(eq(test_item_id()))
            .returning(|_| Ok(None));

        assert_eq!(
            find_item(&store, test_item_id()),
            Err(CatalogError::NotFound {
                item_id: test_item_id()
            })
        );
    }

    #[test]
    fn find_item_returns_stored_record() {
        let item = InventoryItem::from_new(test_item_id(), new_book("Programming Rust")).unwrap();
        let expected = item.clone();
        let mut store = MockRecordStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(item.clone())));

        assert_eq!(find_item(&store, test_item_id()).unwrap(), expected);
    }

    #[test]
    fn list_items_passes_through_store_order() {
        let first = InventoryItem::from_new(ItemId::new(1).unwrap(), new_book("A")).unwrap();
        let second = InventoryItem::from_new(ItemId::new(2).unwrap(), new_book("B")).unwrap();
        let rows = vec![first, second];
        let expected = rows.clone();
        let mut store = MockRecordStore::new();
        store.expect_find_all().returning(move || Ok(rows.clone()));

        assert_eq!(list_items(&store).unwrap(), expected);
    }

    #[test]
    fn add_item_validates_before_inserting() {
        let mut store = MockRecordStore::new();
        store.expect_insert().never();

        assert!(matches!(
            add_item(&store, new_book("  ")),
            Err(CatalogError::Domain(DomainError::Validation(_)))
        ));
    }

    #[test]
    fn add_item_returns_assigned_id() {
        let mut store = MockRecordStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_| Ok(ItemId::new(21).unwrap()));

        assert_eq!(add_item(&store, new_book("Rust in Action")).unwrap(), test_item_id());
    }

    #[test]
    fn remove_item_reports_zero_rows_as_failure() {
        let mut store = MockRecordStore::new();
        store
            .expect_delete()
            .with(eq(test_item_id()))
            .times(1)
            .returning(|_| Ok(0));

        assert_eq!(
            remove_item(&store, test_item_id()),
            Err(PersistenceError::NoRowsAffected {
                item_id: test_item_id()
            })
        );
    }

    #[test]
    fn remove_item_acknowledges_deleted_row() {
        let mut store = MockRecordStore::new();
        store.expect_delete().times(1).returning(|_| Ok(1));

        assert_eq!(
            remove_item(&store, test_item_id()),
            Ok(Removed {
                item_id: test_item_id(),
                rows_affected: 1,
            })
        );
    }
}
