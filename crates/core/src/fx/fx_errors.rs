use rust_decimal::Decimal;
use thiserror::Error;

use super::fx_model::Currency;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("No {from}->{to} exchange rate is available yet")]
    RateUnavailable { from: Currency, to: Currency },

    #[error("Failed to refresh exchange rate, keeping the previous one: {0}")]
    RateFetch(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(Decimal),

    #[error("Rate cache error: {0}")]
    CacheError(String),
}
