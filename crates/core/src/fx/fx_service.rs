use super::fx_errors::FxError;
use super::fx_model::{Currency, DataSource, Rate};
use super::fx_traits::{FxRepositoryTrait, FxServiceTrait, RateSourceTrait};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

/// Owns the process-wide current rate.
///
/// The rate lives behind a lock inside the service, which is shared as
/// `Arc<dyn FxServiceTrait>` with everything that needs to convert amounts.
#[derive(Clone)]
pub struct FxService {
    repository: Arc<dyn FxRepositoryTrait>,
    source: Arc<dyn RateSourceTrait>,
    current: Arc<RwLock<Option<Rate>>>,
}

impl FxService {
    pub fn new(repository: Arc<dyn FxRepositoryTrait>, source: Arc<dyn RateSourceTrait>) -> Self {
        Self {
            repository,
            source,
            current: Arc::new(RwLock::new(None)),
        }
    }

    fn replace_current(&self, rate: Rate) -> Result<()> {
        let mut current = self
            .current
            .write()
            .map_err(|e| FxError::CacheError(e.to_string()))?;
        *current = Some(rate);
        Ok(())
    }

    async fn fetch_and_store(&self) -> Result<Rate> {
        let value = self
            .source
            .fetch_rate(Currency::Foreign, Currency::Base)
            .await?;
        let rate = Rate::new(value, self.source.data_source())?;
        self.repository.save_rate(rate).await
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    fn initialize(&self) -> Result<()> {
        match self
            .repository
            .get_latest_rate(Currency::Foreign, Currency::Base)?
        {
            Some(rate) => {
                log::info!(
                    "Loaded {}->{} rate {} ({}, {})",
                    rate.from_currency,
                    rate.to_currency,
                    rate.value,
                    rate.source.as_str(),
                    rate.as_of
                );
                self.replace_current(rate)
            }
            None => {
                log::warn!("No exchange rate stored yet, foreign entries cannot be converted");
                Ok(())
            }
        }
    }

    fn get_current(&self) -> Result<Option<Rate>> {
        let current = self
            .current
            .read()
            .map_err(|e| FxError::CacheError(e.to_string()))?;
        Ok(current.clone())
    }

    fn require_current(&self) -> Result<Rate> {
        self.get_current()?.ok_or_else(|| {
            FxError::RateUnavailable {
                from: Currency::Foreign,
                to: Currency::Base,
            }
            .into()
        })
    }

    async fn refresh(&self) -> Result<Rate> {
        match self.fetch_and_store().await {
            Ok(rate) => {
                log::info!(
                    "Refreshed {}->{} rate from {}: {}",
                    rate.from_currency,
                    rate.to_currency,
                    rate.source.as_str(),
                    rate.value
                );
                self.replace_current(rate.clone())?;
                Ok(rate)
            }
            Err(e) => {
                log::warn!("Exchange rate refresh failed: {}", e);
                Err(match e {
                    Error::Fx(FxError::RateFetch(_)) => e,
                    other => FxError::RateFetch(other.to_string()).into(),
                })
            }
        }
    }

    async fn set_manual(&self, value: Decimal) -> Result<Rate> {
        let rate = Rate::new(value, DataSource::Manual)?;
        let saved = self.repository.save_rate(rate).await?;
        log::info!("Exchange rate set manually to {}", saved.value);
        self.replace_current(saved.clone())?;
        Ok(saved)
    }
}
