//! Record store boundary.
//!
//! The core never owns persistence. Anything that can find, insert, update and
//! delete inventory records by id can back it: a relational table, a content
//! provider, or the in-memory store shipped in `stockroom-infra`.

use std::sync::Arc;

use thiserror::Error;

use stockroom_core::ItemId;

use crate::item::{InventoryItem, NewInventoryItem};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by the backing store itself (not a "nothing matched").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record store backend failure: {0}")]
    Backend(String),

    /// The store refused a write that would break one of its constraints.
    #[error("record store constraint violated: {0}")]
    Constraint(String),
}

/// Read/update contract for inventory records.
///
/// `update_quantity` and `delete` report the number of rows they touched so
/// callers can tell "nothing matched" apart from "applied".
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore: Send + Sync {
    fn find_by_id(&self, id: ItemId) -> StoreResult<Option<InventoryItem>>;

    /// All records, ordered by id.
    fn find_all(&self) -> StoreResult<Vec<InventoryItem>>;

    fn insert(&self, item: NewInventoryItem) -> StoreResult<ItemId>;

    fn update_quantity(&self, id: ItemId, quantity: i64) -> StoreResult<u64>;

    fn delete(&self, id: ItemId) -> StoreResult<u64>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn find_by_id(&self, id: ItemId) -> StoreResult<Option<InventoryItem>> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> StoreResult<Vec<InventoryItem>> {
        (**self).find_all()
    }

    fn insert(&self, item: NewInventoryItem) -> StoreResult<ItemId> {
        (**self).insert(item)
    }

    fn update_quantity(&self, id: ItemId, quantity: i64) -> StoreResult<u64> {
        (**self).update_quantity(id, quantity)
    }

    fn delete(&self, id: ItemId) -> StoreResult<u64> {
        (**self).delete(id)
    }
}
