use std::sync::Arc;

use async_trait::async_trait;

use super::ledger_errors::LedgerError;
use super::ledger_model::{
    CutRequest, NewTransaction, Transaction, TransactionKind, TransactionUpdate,
};
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::constants::MAX_DESCRIPTION_LEN;
use crate::errors::Result;

pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn get_expected(&self, id: &str) -> Result<Transaction> {
        let expected = self.get_transaction(id)?;
        if expected.kind != TransactionKind::ExpectedCost {
            return Err(LedgerError::NotAnExpectedCost {
                id: expected.id,
                kind: expected.kind,
            }
            .into());
        }
        Ok(expected)
    }
}

fn cut_description(expected: &Transaction) -> String {
    let label = match &expected.description {
        Some(d) => format!("cut from expected {}", d),
        None => "cut from expected cost".to_string(),
    };
    label.chars().take(MAX_DESCRIPTION_LEN).collect()
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    fn list_transactions(&self, kind: Option<TransactionKind>) -> Result<Vec<Transaction>> {
        self.repository.list_transactions(kind)
    }

    fn get_transaction(&self, id: &str) -> Result<Transaction> {
        self.repository
            .get_transaction(id)?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()).into())
    }

    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        new.validate()?;
        if let Some(ref_id) = &new.expected_ref_id {
            let expected = self.get_expected(ref_id)?;
            if expected.currency != new.currency {
                return Err(LedgerError::CurrencyMismatch {
                    expected: expected.currency,
                    actual: new.currency,
                }
                .into());
            }
        }

        let created = self.repository.create_transaction(new).await?;
        log::debug!(
            "Created {} {} {} ({})",
            created.kind,
            created.amount,
            created.currency,
            created.id
        );
        Ok(created)
    }

    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction> {
        update.validate()?;
        self.get_transaction(&update.id)?;
        let updated = self.repository.update_transaction(update).await?;
        log::debug!("Updated transaction {}", updated.id);
        Ok(updated)
    }

    async fn delete_transaction(&self, id: &str) -> Result<Transaction> {
        self.get_transaction(id)?;
        let deleted = self.repository.delete_transaction(id).await?;
        log::debug!("Deleted {} {}", deleted.kind, deleted.id);
        Ok(deleted)
    }

    async fn cut_expected(&self, expected_id: &str, cut: CutRequest) -> Result<Transaction> {
        cut.validate()?;
        let expected = self.get_expected(expected_id)?;
        let remaining = expected.outstanding();
        if cut.amount > remaining {
            return Err(LedgerError::CutExceedsRemaining {
                requested: cut.amount,
                remaining,
            }
            .into());
        }

        let cost = NewTransaction {
            kind: TransactionKind::Cost,
            amount: cut.amount,
            currency: expected.currency,
            date: cut.date,
            description: cut.description.or_else(|| Some(cut_description(&expected))),
            expected_ref_id: Some(expected.id.clone()),
        };
        let created = self.repository.create_transaction(cost).await?;
        log::info!(
            "Cut {} {} from expected cost {}",
            created.amount,
            created.currency,
            expected.id
        );
        Ok(created)
    }
}
