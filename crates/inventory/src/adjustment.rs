//! Stock-quantity mutation with boundary checking.
//!
//! - `adjust_quantity` is pure: current quantity + signed delta, refused when
//!   the result would be negative.
//! - `apply_quantity` issues exactly one update to the record store and maps
//!   rows affected onto an outcome. It is never retried.

use thiserror::Error;

use stockroom_core::ItemId;

use crate::store::{RecordStore, StoreError};

/// The adjustment would drive the quantity below zero (or out of `i64`).
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[error("cannot adjust quantity {current} by {delta}: result out of range")]
pub struct OutOfRangeError {
    pub current: i64,
    pub delta: i64,
}

/// The write did not take effect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Zero rows affected: the record is gone, or the update was a no-op.
    #[error("no rows affected when writing item {item_id}")]
    NoRowsAffected { item_id: ItemId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A quantity write the store acknowledged.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Applied {
    pub item_id: ItemId,
    pub quantity: i64,
    pub rows_affected: u64,
}

/// Compute the quantity after applying `delta`.
///
/// `current` is trusted to be non-negative; it is the caller's last read.
pub fn adjust_quantity(current: i64, delta: i64) -> Result<i64, OutOfRangeError> {
    match current.checked_add(delta) {
        Some(candidate) if candidate >= 0 => Ok(candidate),
        _ => Err(OutOfRangeError { current, delta }),
    }
}

/// Persist `new_quantity` for `item_id`, setting only the quantity field.
pub fn apply_quantity<S>(
    item_id: ItemId,
    new_quantity: i64,
    store: &S,
) -> Result<Applied, PersistenceError>
where
    S: RecordStore + ?Sized,
{
    let rows_affected = store.update_quantity(item_id, new_quantity)?;
    if rows_affected == 0 {
        return Err(PersistenceError::NoRowsAffected { item_id });
    }

    Ok(Applied {
        item_id,
        quantity: new_quantity,
        rows_affected,
    })
}
