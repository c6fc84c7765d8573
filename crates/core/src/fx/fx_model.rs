use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::fx_errors::FxError;
use crate::constants::{BASE_CURRENCY, FOREIGN_CURRENCY, RATE_DECIMAL_PRECISION};
use crate::errors::{Result, ValidationError};

/// The two currencies a ledger entry can be recorded in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    #[serde(rename = "GBP")]
    Base,
    #[serde(rename = "CZK")]
    Foreign,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Base => BASE_CURRENCY,
            Currency::Foreign => FOREIGN_CURRENCY,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let code = s.trim();
        if code.eq_ignore_ascii_case(BASE_CURRENCY) {
            Ok(Currency::Base)
        } else if code.eq_ignore_ascii_case(FOREIGN_CURRENCY) {
            Ok(Currency::Foreign)
        } else {
            Err(ValidationError::InvalidInput(format!(
                "Unknown currency '{}', expected {} or {}",
                code, BASE_CURRENCY, FOREIGN_CURRENCY
            )))
        }
    }
}

/// Where the current rate came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataSource {
    Cnb,
    Manual,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Cnb => "CNB",
            DataSource::Manual => "MANUAL",
        }
    }
}

impl FromStr for DataSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CNB" => Ok(DataSource::Cnb),
            "MANUAL" => Ok(DataSource::Manual),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown rate source '{}'",
                other
            ))),
        }
    }
}

/// The current foreign→base exchange rate.
///
/// `value` is the number of base units one foreign unit buys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub value: Decimal,
    pub source: DataSource,
    pub as_of: DateTime<Utc>,
}

impl Rate {
    /// Builds a CZK→GBP rate stamped now, rounded to the stored precision.
    pub fn new(value: Decimal, source: DataSource) -> Result<Self> {
        Self::with_timestamp(value, source, Utc::now())
    }

    pub fn with_timestamp(value: Decimal, source: DataSource, as_of: DateTime<Utc>) -> Result<Self> {
        let value =
            value.round_dp_with_strategy(RATE_DECIMAL_PRECISION, RoundingStrategy::MidpointNearestEven);
        if value <= Decimal::ZERO {
            return Err(FxError::InvalidRate(value).into());
        }
        Ok(Self {
            from_currency: Currency::Foreign,
            to_currency: Currency::Base,
            value,
            source,
            as_of,
        })
    }

    /// Converts an amount recorded in `currency` into the base currency.
    /// Exact; callers round the final figure. `None` on overflow.
    pub fn to_base(&self, amount: Decimal, currency: Currency) -> Option<Decimal> {
        match currency {
            Currency::Base => Some(amount),
            Currency::Foreign => amount.checked_mul(self.value),
        }
    }

    /// Expresses a base-currency amount in the foreign currency. `None` on overflow.
    pub fn to_foreign(&self, base_amount: Decimal) -> Option<Decimal> {
        base_amount.checked_div(self.value)
    }
}
