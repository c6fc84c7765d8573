//! Database models for ledger transactions.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use pennywise_core::fx::Currency;
use pennywise_core::ledger::{Transaction, TransactionKind};
use rust_decimal::Decimal;

use crate::errors::StorageError;

/// Database model for ledger transactions. Decimals are stored as TEXT.
#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Insertable,
    AsChangeset,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub kind: String,
    pub amount: String,
    pub currency: String,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub remaining: Option<String>,
    pub expected_ref_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw).map_err(|e| {
        StorageError::SerializationError(format!("invalid {} '{}': {}", column, raw, e))
    })
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: TransactionKind::from_str(&db.kind)
                .map_err(|e| StorageError::SerializationError(e.to_string()))?,
            amount: parse_decimal("amount", &db.amount)?,
            currency: Currency::from_str(&db.currency)
                .map_err(|e| StorageError::SerializationError(e.to_string()))?,
            remaining: db
                .remaining
                .as_deref()
                .map(|r| parse_decimal("remaining", r))
                .transpose()?,
            id: db.id,
            date: db.date,
            description: db.description,
            expected_ref_id: db.expected_ref_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Transaction> for TransactionDB {
    fn from(domain: Transaction) -> Self {
        Self {
            id: domain.id,
            kind: domain.kind.as_str().to_string(),
            amount: domain.amount.to_string(),
            currency: domain.currency.code().to_string(),
            date: domain.date,
            description: domain.description,
            remaining: domain.remaining.map(|r| r.to_string()),
            expected_ref_id: domain.expected_ref_id,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
