//! Ledger domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ledger_errors::LedgerError;
use crate::constants::{AMOUNT_DECIMAL_PRECISION, MAX_AMOUNT, MAX_DESCRIPTION_LEN};
use crate::errors::{Result, ValidationError};
use crate::fx::Currency;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Cost,
    ExpectedCost,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Cost => "COST",
            TransactionKind::ExpectedCost => "EXPECTED_COST",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "INCOME" => Ok(TransactionKind::Income),
            "COST" => Ok(TransactionKind::Cost),
            "EXPECTED_COST" | "EXPECTED" => Ok(TransactionKind::ExpectedCost),
            _ => Err(ValidationError::InvalidInput(format!(
                "Unknown transaction kind '{}'",
                s.trim()
            ))),
        }
    }
}

/// A persisted ledger entry.
///
/// `remaining` is only set on expected costs and is expressed in the entry's
/// own currency. `expected_ref_id` is only set on costs cut from an expected cost.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub currency: Currency,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub remaining: Option<Decimal>,
    pub expected_ref_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Part of an expected cost that has not been realized yet. Zero for other kinds.
    pub fn outstanding(&self) -> Decimal {
        match self.kind {
            TransactionKind::ExpectedCost => self.remaining.unwrap_or(self.amount),
            _ => Decimal::ZERO,
        }
    }

    /// Part of an expected cost already turned into real costs.
    pub fn realized(&self) -> Decimal {
        match self.kind {
            TransactionKind::ExpectedCost => self.amount - self.outstanding(),
            _ => Decimal::ZERO,
        }
    }

    fn ensure_expected(&self) -> Result<()> {
        if self.kind != TransactionKind::ExpectedCost {
            return Err(LedgerError::NotAnExpectedCost {
                id: self.id.clone(),
                kind: self.kind,
            }
            .into());
        }
        Ok(())
    }

    /// Moves `amount` from this expected cost's remaining into realized.
    pub fn apply_cut(&mut self, amount: Decimal) -> Result<()> {
        self.ensure_expected()?;
        let remaining = self.outstanding();
        if amount <= Decimal::ZERO || amount > remaining {
            return Err(LedgerError::CutExceedsRemaining {
                requested: amount,
                remaining,
            }
            .into());
        }
        self.remaining = Some(remaining - amount);
        Ok(())
    }

    /// Gives a previously cut amount back, never exceeding the expected amount.
    pub fn restore_cut(&mut self, amount: Decimal) -> Result<()> {
        self.ensure_expected()?;
        let restored = (self.outstanding() + amount).min(self.amount);
        self.remaining = Some(restored.max(Decimal::ZERO));
        Ok(())
    }

    /// Changes the amount. Expected costs keep what was already realized.
    pub fn reprice(&mut self, new_amount: Decimal) -> Result<()> {
        if self.kind == TransactionKind::ExpectedCost {
            let realized = self.realized();
            if new_amount < realized {
                return Err(LedgerError::BelowRealized {
                    amount: new_amount,
                    realized,
                }
                .into());
            }
            self.remaining = Some(new_amount - realized);
        }
        self.amount = new_amount;
        Ok(())
    }
}

/// Input for creating a ledger entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub currency: Currency,
    pub date: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub expected_ref_id: Option<String>,
}

impl NewTransaction {
    /// Builds an entry from raw form values, rejecting anything malformed.
    pub fn parse(
        kind: &str,
        amount: &str,
        currency: &str,
        date: Option<&str>,
        description: Option<String>,
    ) -> Result<Self> {
        let new = Self {
            kind: kind.parse()?,
            amount: parse_amount(amount)?,
            currency: currency.parse()?,
            date: date.map(parse_date).transpose()?,
            description: clean_description(description),
            expected_ref_id: None,
        };
        new.validate()?;
        Ok(new)
    }

    pub fn with_expected_ref(mut self, expected_id: impl Into<String>) -> Self {
        self.expected_ref_id = Some(expected_id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_description(self.description.as_deref())?;
        if self.expected_ref_id.is_some() && self.kind != TransactionKind::Cost {
            return Err(LedgerError::InvalidLink(self.kind).into());
        }
        Ok(())
    }
}

/// Editable fields of an existing entry. Kind and currency are fixed at creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub amount: Decimal,
    /// `None` keeps the current date.
    pub date: Option<NaiveDateTime>,
    pub description: Option<String>,
}

impl TransactionUpdate {
    pub fn parse(
        id: impl Into<String>,
        amount: &str,
        date: Option<&str>,
        description: Option<String>,
    ) -> Result<Self> {
        let update = Self {
            id: id.into(),
            amount: parse_amount(amount)?,
            date: date.map(parse_date).transpose()?,
            description: clean_description(description),
        };
        update.validate()?;
        Ok(update)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_amount(self.amount)?;
        validate_description(self.description.as_deref())
    }
}

/// Realizes part of an expected cost. The amount is in the expected cost's currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CutRequest {
    pub amount: Decimal,
    pub date: Option<NaiveDateTime>,
    pub description: Option<String>,
}

impl CutRequest {
    pub fn parse(amount: &str, date: Option<&str>, description: Option<String>) -> Result<Self> {
        let cut = Self {
            amount: parse_amount(amount)?,
            date: date.map(parse_date).transpose()?,
            description: clean_description(description),
        };
        cut.validate()?;
        Ok(cut)
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_description(self.description.as_deref())
    }
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField("amount".to_string()).into());
    }
    Decimal::from_str(raw).map_err(|_| {
        ValidationError::InvalidInput(format!("Amount '{}' is not a number", raw)).into()
    })
}

/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM[:SS]` or an RFC 3339 timestamp.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    Ok(NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")?)
}

pub(crate) fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "Amount must be positive, got {}",
            amount
        ))
        .into());
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::InvalidInput(format!(
            "Amount {} exceeds the maximum of {}",
            amount, MAX_AMOUNT
        ))
        .into());
    }
    if amount.normalize().scale() > AMOUNT_DECIMAL_PRECISION {
        return Err(ValidationError::InvalidInput(format!(
            "Amount {} has more than {} decimal places",
            amount, AMOUNT_DECIMAL_PRECISION
        ))
        .into());
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<()> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LEN => {
            Err(ValidationError::InvalidInput(format!(
                "Description is longer than {} characters",
                MAX_DESCRIPTION_LEN
            ))
            .into())
        }
        _ => Ok(()),
    }
}
