use super::fx_model::{Currency, DataSource, Rate};
use crate::errors::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait defining the contract for FX repository operations.
///
/// Only the latest rate per currency pair is kept.
#[async_trait]
pub trait FxRepositoryTrait: Send + Sync {
    fn get_latest_rate(&self, from: Currency, to: Currency) -> Result<Option<Rate>>;
    async fn save_rate(&self, rate: Rate) -> Result<Rate>;
}

/// An external lookup that can quote the current exchange rate.
#[async_trait]
pub trait RateSourceTrait: Send + Sync {
    fn data_source(&self) -> DataSource;

    /// Returns how many `to` units one `from` unit buys.
    async fn fetch_rate(&self, from: Currency, to: Currency) -> Result<Decimal>;
}

/// Trait defining the contract for FX service operations.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    /// Loads the persisted rate into memory.
    fn initialize(&self) -> Result<()>;

    fn get_current(&self) -> Result<Option<Rate>>;

    /// Like `get_current` but fails with `FxError::RateUnavailable` when no rate exists.
    fn require_current(&self) -> Result<Rate>;

    /// Fetches a new rate from the configured source and swaps it in.
    /// On failure the previous rate stays in effect.
    async fn refresh(&self) -> Result<Rate>;

    async fn set_manual(&self, value: Decimal) -> Result<Rate>;
}
