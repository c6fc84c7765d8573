use super::*;
use crate::errors::{Error, Result};
use crate::fx::Currency;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

/// In-memory repository applying the same write plans as the SQLite one.
#[derive(Default)]
struct MockLedgerRepository {
    rows: Mutex<Vec<Transaction>>,
}

impl MockLedgerRepository {
    fn find(rows: &[Transaction], id: Option<&str>) -> Option<Transaction> {
        id.and_then(|id| rows.iter().find(|t| t.id == id).cloned())
    }

    fn put(rows: &mut Vec<Transaction>, row: Transaction) {
        match rows.iter_mut().find(|t| t.id == row.id) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }
    }
}

#[async_trait]
impl LedgerRepositoryTrait for MockLedgerRepository {
    fn list_transactions(&self, kind: Option<TransactionKind>) -> Result<Vec<Transaction>> {
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<Transaction> = rows
            .iter()
            .filter(|t| kind.map_or(true, |k| t.kind == k))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(out)
    }

    fn get_transaction(&self, id: &str) -> Result<Option<Transaction>> {
        Ok(Self::find(&self.rows.lock().unwrap(), Some(id)))
    }

    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        let mut rows = self.rows.lock().unwrap();
        let expected = Self::find(&rows, new.expected_ref_id.as_deref());
        let plan = plan_insert(new, expected, Utc::now().naive_utc())?;
        if let Some(exp) = plan.expected {
            Self::put(&mut rows, exp);
        }
        rows.push(plan.transaction.clone());
        Ok(plan.transaction)
    }

    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction> {
        let mut rows = self.rows.lock().unwrap();
        let current = Self::find(&rows, Some(&update.id))
            .ok_or_else(|| LedgerError::NotFound(update.id.clone()))?;
        let expected = Self::find(&rows, current.expected_ref_id.as_deref());
        let plan = plan_update(current, expected, update, Utc::now().naive_utc())?;
        if let Some(exp) = plan.expected {
            Self::put(&mut rows, exp);
        }
        Self::put(&mut rows, plan.transaction.clone());
        Ok(plan.transaction)
    }

    async fn delete_transaction(&self, id: &str) -> Result<Transaction> {
        let mut rows = self.rows.lock().unwrap();
        let target =
            Self::find(&rows, Some(id)).ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let expected = Self::find(&rows, target.expected_ref_id.as_deref());
        let plan = plan_delete(target, expected, Utc::now().naive_utc())?;
        if let Some(exp) = plan.expected {
            Self::put(&mut rows, exp);
        }
        if plan.unlink_costs {
            for row in rows.iter_mut() {
                if row.expected_ref_id.as_deref() == Some(id) {
                    row.expected_ref_id = None;
                }
            }
        }
        rows.retain(|t| t.id != id);
        Ok(plan.deleted)
    }
}

fn setup() -> (Arc<MockLedgerRepository>, LedgerService) {
    let repo = Arc::new(MockLedgerRepository::default());
    let service = LedgerService::new(repo.clone());
    (repo, service)
}

fn entry(kind: &str, amount: &str, currency: &str) -> NewTransaction {
    NewTransaction::parse(kind, amount, currency, None, None).unwrap()
}

#[tokio::test]
async fn creates_and_lists_by_kind() {
    let (_, service) = setup();
    service
        .create_transaction(entry("income", "100", "GBP"))
        .await
        .unwrap();
    service
        .create_transaction(entry("cost", "20", "GBP"))
        .await
        .unwrap();

    assert_eq!(service.list_transactions(None).unwrap().len(), 2);
    let incomes = service
        .list_transactions(Some(TransactionKind::Income))
        .unwrap();
    assert_eq!(incomes.len(), 1);
    assert_eq!(incomes[0].amount, dec!(100));
}

#[tokio::test]
async fn invalid_input_is_never_persisted() {
    let (repo, service) = setup();
    let bad = NewTransaction {
        kind: TransactionKind::Cost,
        amount: dec!(-3),
        currency: Currency::Base,
        date: None,
        description: None,
        expected_ref_id: None,
    };

    let err = service.create_transaction(bad).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(repo.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn get_missing_transaction_is_not_found() {
    let (_, service) = setup();
    let err = service.get_transaction("missing").unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn cut_creates_linked_cost_and_reduces_remaining() {
    let (_, service) = setup();
    let expected = service
        .create_transaction(
            NewTransaction::parse("expected_cost", "1000", "CZK", None, Some("rent".into()))
                .unwrap(),
        )
        .await
        .unwrap();

    let cost = service
        .cut_expected(&expected.id, CutRequest::parse("250", None, None).unwrap())
        .await
        .unwrap();

    assert_eq!(cost.kind, TransactionKind::Cost);
    assert_eq!(cost.currency, Currency::Foreign);
    assert_eq!(cost.expected_ref_id.as_deref(), Some(expected.id.as_str()));
    assert_eq!(cost.description.as_deref(), Some("cut from expected rent"));
    let expected = service.get_transaction(&expected.id).unwrap();
    assert_eq!(expected.remaining, Some(dec!(750)));
}

#[tokio::test]
async fn cut_cannot_exceed_remaining() {
    let (repo, service) = setup();
    let expected = service
        .create_transaction(entry("expected_cost", "100", "GBP"))
        .await
        .unwrap();

    let err = service
        .cut_expected(&expected.id, CutRequest::parse("100.01", None, None).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Ledger(LedgerError::CutExceedsRemaining { .. })
    ));
    assert_eq!(repo.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn cut_from_non_expected_is_rejected() {
    let (_, service) = setup();
    let income = service
        .create_transaction(entry("income", "100", "GBP"))
        .await
        .unwrap();

    let err = service
        .cut_expected(&income.id, CutRequest::parse("10", None, None).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Ledger(LedgerError::NotAnExpectedCost { .. })
    ));
}

#[tokio::test]
async fn deleting_cut_cost_restores_remaining() {
    let (_, service) = setup();
    let expected = service
        .create_transaction(entry("expected_cost", "300", "CZK"))
        .await
        .unwrap();
    let cost = service
        .cut_expected(&expected.id, CutRequest::parse("120", None, None).unwrap())
        .await
        .unwrap();

    service.delete_transaction(&cost.id).await.unwrap();

    let expected = service.get_transaction(&expected.id).unwrap();
    assert_eq!(expected.remaining, Some(dec!(300)));
}

#[tokio::test]
async fn deleting_expected_keeps_costs_but_unlinks_them() {
    let (_, service) = setup();
    let expected = service
        .create_transaction(entry("expected_cost", "300", "CZK"))
        .await
        .unwrap();
    let cost = service
        .cut_expected(&expected.id, CutRequest::parse("120", None, None).unwrap())
        .await
        .unwrap();

    service.delete_transaction(&expected.id).await.unwrap();

    let cost = service.get_transaction(&cost.id).unwrap();
    assert!(cost.expected_ref_id.is_none());
    assert_eq!(cost.amount, dec!(120));
}

#[tokio::test]
async fn updating_expected_keeps_realized_part() {
    let (_, service) = setup();
    let expected = service
        .create_transaction(entry("expected_cost", "300", "CZK"))
        .await
        .unwrap();
    service
        .cut_expected(&expected.id, CutRequest::parse("100", None, None).unwrap())
        .await
        .unwrap();

    let updated = service
        .update_transaction(TransactionUpdate::parse(&expected.id, "400", None, None).unwrap())
        .await
        .unwrap();
    assert_eq!(updated.remaining, Some(dec!(300)));

    let err = service
        .update_transaction(TransactionUpdate::parse(&expected.id, "50", None, None).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Ledger(LedgerError::BelowRealized { .. })));
}

#[tokio::test]
async fn linked_cost_currency_must_match() {
    let (_, service) = setup();
    let expected = service
        .create_transaction(entry("expected_cost", "300", "CZK"))
        .await
        .unwrap();

    let err = service
        .create_transaction(entry("cost", "10", "GBP").with_expected_ref(expected.id.clone()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Ledger(LedgerError::CurrencyMismatch { .. })
    ));
    assert_eq!(
        service.get_transaction(&expected.id).unwrap().remaining,
        Some(Decimal::from(300))
    );
}

#[tokio::test]
async fn update_of_missing_transaction_is_not_found() {
    let (_, service) = setup();
    let err = service
        .update_transaction(TransactionUpdate::parse("ghost", "1", None, None).unwrap())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
