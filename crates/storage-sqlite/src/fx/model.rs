//! Database model for the latest exchange rate per currency pair.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use pennywise_core::fx::{Currency, DataSource, Rate};
use rust_decimal::Decimal;

use crate::errors::StorageError;

#[derive(
    Queryable,
    Selectable,
    Insertable,
    AsChangeset,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::exchange_rates)]
#[diesel(primary_key(from_currency, to_currency))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeRateDB {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: String,
    pub source: String,
    pub as_of: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn corrupt(e: impl std::fmt::Display) -> StorageError {
    StorageError::SerializationError(e.to_string())
}

impl TryFrom<ExchangeRateDB> for Rate {
    type Error = StorageError;

    fn try_from(db: ExchangeRateDB) -> Result<Self, Self::Error> {
        Ok(Self {
            from_currency: Currency::from_str(&db.from_currency).map_err(corrupt)?,
            to_currency: Currency::from_str(&db.to_currency).map_err(corrupt)?,
            value: Decimal::from_str(&db.rate).map_err(corrupt)?,
            source: DataSource::from_str(&db.source).map_err(corrupt)?,
            as_of: DateTime::from_naive_utc_and_offset(db.as_of, Utc),
        })
    }
}

impl From<&Rate> for ExchangeRateDB {
    fn from(domain: &Rate) -> Self {
        Self {
            from_currency: domain.from_currency.code().to_string(),
            to_currency: domain.to_currency.code().to_string(),
            rate: domain.value.to_string(),
            source: domain.source.as_str().to_string(),
            as_of: domain.as_of.naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
