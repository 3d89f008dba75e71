//! Stock adjustment service: validate, then write at most once.

use core::num::NonZeroU32;

use thiserror::Error;

use stockroom_core::ItemId;

use crate::adjustment::{
    Applied, OutOfRangeError, PersistenceError, adjust_quantity, apply_quantity,
};
use crate::store::RecordStore;

/// Step used by the increase/decrease/sell buttons unless configured otherwise.
pub const DEFAULT_STEP: NonZeroU32 = NonZeroU32::MIN;

/// Outcome of a failed adjustment request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("item {item_id} not found")]
    NotFound { item_id: ItemId },
}

/// Adjusts stock for one item per call against an injected record store.
///
/// Holds no per-item state: the id and last-known quantity are passed in on
/// every call. Concurrent adjustments to the same item are not coordinated
/// here; the store decides.
#[derive(Debug)]
pub struct StockAdjustmentService<S> {
    store: S,
    step: i64,
}

impl<S> StockAdjustmentService<S>
where
    S: RecordStore,
{
    pub fn new(store: S) -> Self {
        Self::with_step(store, DEFAULT_STEP)
    }

    pub fn with_step(store: S, step: NonZeroU32) -> Self {
        Self {
            store,
            step: i64::from(step.get()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Apply `delta` to `current` and persist the result.
    ///
    /// A refused adjustment never reaches the store.
    pub fn adjust(
        &self,
        item_id: ItemId,
        current: i64,
        delta: i64,
    ) -> Result<Applied, StockError> {
        let new_quantity = match adjust_quantity(current, delta) {
            Ok(q) => q,
            Err(err) => {
                tracing::warn!(%item_id, current, delta, "stock adjustment refused: {err}");
                return Err(err.into());
            }
        };

        match apply_quantity(item_id, new_quantity, &self.store) {
            Ok(applied) => {
                tracing::debug!(%item_id, from = current, to = new_quantity, "stock adjusted");
                Ok(applied)
            }
            Err(err) => {
                tracing::warn!(%item_id, quantity = new_quantity, "stock write failed: {err}");
                Err(err.into())
            }
        }
    }

    pub fn increase(&self, item_id: ItemId, current: i64) -> Result<Applied, StockError> {
        self.adjust(item_id, current, self.step)
    }

    pub fn decrease(&self, item_id: ItemId, current: i64) -> Result<Applied, StockError> {
        self.adjust(item_id, current, -self.step)
    }

    /// Record a sale from the list view; one step out of stock.
    pub fn sell(&self, item_id: ItemId, current: i64) -> Result<Applied, StockError> {
        self.decrease(item_id, current)
    }

    /// Re-read the record, then adjust from its stored quantity.
    ///
    /// The read and the write are separate store calls; another writer can
    /// land in between.
    pub fn refresh_and_adjust(
        &self,
        item_id: ItemId,
        delta: i64,
    ) -> Result<Applied, StockError> {
        let item = self
            .store
            .find_by_id(item_id)
            .map_err(PersistenceError::from)?
            .ok_or(StockError::NotFound { item_id })?;

        self.adjust(item_id, item.quantity(), delta)
    }
}
