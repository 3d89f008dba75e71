//! Infrastructure layer: record store adapters and configuration.

pub mod config;
pub mod record_store;


pub use config::InventoryConfig;
pub use record_store::InMemoryRecordStore;
