//! Inventory domain module.
//!
//! Stock-quantity mutation with boundary checking, plus the record-store
//! boundary and read-model operations needed to drive it. Pure validation
//! (`adjust_quantity`) is kept apart from the single side-effecting write
//! (`apply_quantity`), so the former is testable without any store.

pub mod adjustment;
pub mod catalog;
pub mod item;
pub mod service;
pub mod store;

pub use adjustment::{Applied, OutOfRangeError, PersistenceError, adjust_quantity, apply_quantity};
pub use catalog::{CatalogError, Removed, add_item, find_item, list_items, remove_item};
pub use item::{InventoryItem, NewInventoryItem, Price, SupplierContact};
pub use service::{DEFAULT_STEP, StockAdjustmentService, StockError};
pub use store::{RecordStore, StoreError, StoreResult};
