//! Configuration loading from environment variables.

use core::num::NonZeroU32;

use anyhow::Context;

use stockroom_inventory::{DEFAULT_STEP, RecordStore, StockAdjustmentService};
use stockroom_observability::{LogConfig, LogFormat};

/// Units added or removed by one increase/decrease/sell.
pub const ADJUSTMENT_STEP_VAR: &str = "STOCKROOM_ADJUSTMENT_STEP";

/// `json` or `pretty`.
pub const LOG_FORMAT_VAR: &str = "STOCKROOM_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    pub adjustment_step: NonZeroU32,
    pub log: LogConfig,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            adjustment_step: DEFAULT_STEP,
            log: LogConfig::default(),
        }
    }
}

impl InventoryConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables fall back to defaults; malformed ones are errors.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ADJUSTMENT_STEP_VAR) {
            config.adjustment_step = raw.trim().parse().with_context(|| {
                format!("{ADJUSTMENT_STEP_VAR} must be a positive integer, got {raw:?}")
            })?;
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log.format = raw
                .parse::<LogFormat>()
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?;
        }

        Ok(config)
    }

    /// Stock adjustment service over `store` using the configured step.
    pub fn adjustment_service<S>(&self, store: S) -> StockAdjustmentService<S>
    where
        S: RecordStore,
    {
        StockAdjustmentService::with_step(store, self.adjustment_step)
    }
}
