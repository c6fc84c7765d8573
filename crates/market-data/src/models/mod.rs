//! Parsed CNB publication types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// One currency row of the daily fixing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CnbRate {
    pub country: String,
    pub currency_name: String,
    /// Number of foreign units `rate` is quoted for (e.g. 100 for JPY).
    pub quantity: u32,
    /// ISO 4217 code.
    pub code: String,
    /// CZK paid for `quantity` units.
    pub rate: Decimal,
}

impl CnbRate {
    /// CZK paid for one unit of the foreign currency.
    pub fn per_unit(&self) -> Decimal {
        self.rate / Decimal::from(self.quantity)
    }
}

/// One daily publication.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CnbDailyRates {
    pub published: NaiveDate,
    /// Running number of the publication within the year.
    pub sequence: Option<u32>,
    pub rates: Vec<CnbRate>,
}

impl CnbDailyRates {
    pub fn find(&self, code: &str) -> Option<&CnbRate> {
        self.rates
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(code))
    }

    /// CZK per one unit of `code`.
    pub fn czk_per_unit(&self, code: &str) -> Result<Decimal, MarketDataError> {
        self.find(code)
            .map(CnbRate::per_unit)
            .ok_or_else(|| MarketDataError::CurrencyNotFound(code.to_uppercase()))
    }
}
