//! Request bodies accepted by the web API.
//!
//! Amounts may arrive as JSON numbers or strings; both are parsed into exact
//! decimals by the core constructors, so malformed input never reaches storage.

use std::str::FromStr;

use pennywise_core::errors::{Error as CoreError, ValidationError};
use pennywise_core::fx::Currency;
use pennywise_core::ledger::{CutRequest, NewTransaction, TransactionKind, TransactionUpdate};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A decimal sent either as `12.5` or `"12.5"`.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum DecimalInput {
    Number(serde_json::Number),
    Text(String),
}

impl DecimalInput {
    pub fn as_text(&self) -> String {
        match self {
            DecimalInput::Number(n) => n.to_string(),
            DecimalInput::Text(s) => s.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionRequest {
    pub kind: String,
    pub amount: DecimalInput,
    /// Defaults to the base currency.
    pub currency: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub expected_ref_id: Option<String>,
}

impl TryFrom<NewTransactionRequest> for NewTransaction {
    type Error = CoreError;

    fn try_from(req: NewTransactionRequest) -> Result<Self, Self::Error> {
        let currency = req
            .currency
            .unwrap_or_else(|| Currency::Base.code().to_string());
        let new = NewTransaction::parse(
            &req.kind,
            &req.amount.as_text(),
            &currency,
            req.date.as_deref(),
            req.description,
        )?;
        Ok(match req.expected_ref_id.filter(|r| !r.trim().is_empty()) {
            Some(expected_id) => new.with_expected_ref(expected_id),
            None => new,
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdateRequest {
    pub amount: DecimalInput,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl TransactionUpdateRequest {
    pub fn into_update(self, id: String) -> Result<TransactionUpdate, CoreError> {
        TransactionUpdate::parse(
            id,
            &self.amount.as_text(),
            self.date.as_deref(),
            self.description,
        )
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CutRequestBody {
    pub amount: DecimalInput,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<CutRequestBody> for CutRequest {
    type Error = CoreError;

    fn try_from(body: CutRequestBody) -> Result<Self, Self::Error> {
        CutRequest::parse(&body.amount.as_text(), body.date.as_deref(), body.description)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ListQuery {
    pub kind: Option<String>,
}

impl ListQuery {
    pub fn kind(&self) -> Result<Option<TransactionKind>, CoreError> {
        match self.kind.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(TransactionKind::from_str(raw)?)),
        }
    }
}

/// Manual override of the CZK to GBP rate.
#[derive(Deserialize, Debug, Clone)]
pub struct ManualRateRequest {
    pub rate: DecimalInput,
}

impl ManualRateRequest {
    pub fn value(&self) -> Result<Decimal, CoreError> {
        let raw = self.rate.as_text();
        Decimal::from_str(raw.trim()).map_err(|_| {
            ValidationError::InvalidInput(format!("Rate '{}' is not a number", raw.trim())).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_strings() {
        let req: NewTransactionRequest =
            serde_json::from_str(r#"{"kind":"income","amount":12.5}"#).unwrap();
        let new = NewTransaction::try_from(req).unwrap();
        assert_eq!(new.amount, Decimal::new(125, 1));
        assert_eq!(new.currency, Currency::Base);

        let req: NewTransactionRequest = serde_json::from_str(
            r#"{"kind":"cost","amount":"249.90","currency":"czk","expectedRefId":"exp-1"}"#,
        )
        .unwrap();
        let new = NewTransaction::try_from(req).unwrap();
        assert_eq!(new.currency, Currency::Foreign);
        assert_eq!(new.expected_ref_id.as_deref(), Some("exp-1"));
    }

    #[test]
    fn rejects_malformed_amount() {
        let req: NewTransactionRequest =
            serde_json::from_str(r#"{"kind":"income","amount":"ten"}"#).unwrap();
        let err = NewTransaction::try_from(req).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn parses_kind_filter() {
        let query = ListQuery {
            kind: Some("expected_cost".to_string()),
        };
        assert_eq!(query.kind().unwrap(), Some(TransactionKind::ExpectedCost));
        assert_eq!(ListQuery::default().kind().unwrap(), None);
        let bad = ListQuery {
            kind: Some("refund".to_string()),
        };
        assert!(bad.kind().is_err());
    }

    #[test]
    fn manual_rate_keeps_precision() {
        let req: ManualRateRequest = serde_json::from_str(r#"{"rate":"0.03552903"}"#).unwrap();
        assert_eq!(req.value().unwrap(), Decimal::new(3552903, 8));
    }
}
