use std::time::Duration;

use async_trait::async_trait;
use pennywise_market_data::errors::{MarketDataError, RetryClass};
use pennywise_market_data::provider::cnb::CnbProvider;
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_model::{Currency, DataSource};
use super::fx_traits::RateSourceTrait;
use crate::errors::Result;

const DEFAULT_MAX_ATTEMPTS: u32 = 2;
const DEFAULT_BACKOFF: Duration = Duration::from_secs(2);

/// Rate source backed by the Czech National Bank daily fixing.
///
/// CNB quotes everything as CZK per unit of the other currency, so the
/// CZK→GBP rate is the inverse of the GBP row.
pub struct CnbRateSource {
    provider: CnbProvider,
    max_attempts: u32,
    backoff: Duration,
}

impl CnbRateSource {
    pub fn new(provider: CnbProvider) -> Self {
        Self {
            provider,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
        }
    }

    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff = backoff;
        self
    }

    async fn czk_per_unit(&self, code: &str) -> std::result::Result<Decimal, MarketDataError> {
        let mut attempt = 1;
        loop {
            match self.provider.czk_per_unit(code).await {
                Ok(value) => return Ok(value),
                Err(e) if e.retry_class() == RetryClass::WithBackoff && attempt < self.max_attempts => {
                    log::debug!(
                        "CNB request failed (attempt {}/{}), retrying: {}",
                        attempt,
                        self.max_attempts,
                        e
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl RateSourceTrait for CnbRateSource {
    fn data_source(&self) -> DataSource {
        DataSource::Cnb
    }

    async fn fetch_rate(&self, from: Currency, to: Currency) -> Result<Decimal> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        let czk_per_gbp = self
            .czk_per_unit(Currency::Base.code())
            .await
            .map_err(|e| FxError::RateFetch(e.to_string()))?;
        match from {
            Currency::Foreign => Ok(Decimal::ONE / czk_per_gbp),
            Currency::Base => Ok(czk_per_gbp),
        }
    }
}
