use super::ledger_model::{
    CutRequest, NewTransaction, Transaction, TransactionKind, TransactionUpdate,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for ledger repository operations
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Newest first.
    fn list_transactions(&self, kind: Option<TransactionKind>) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, id: &str) -> Result<Option<Transaction>>;
    /// A cost linked to an expected cost reduces its remaining in the same write.
    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction>;
    /// Restores or unlinks related rows in the same write.
    async fn delete_transaction(&self, id: &str) -> Result<Transaction>;
}

/// Trait for ledger service operations
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    fn list_transactions(&self, kind: Option<TransactionKind>) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, id: &str) -> Result<Transaction>;
    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction>;
    async fn delete_transaction(&self, id: &str) -> Result<Transaction>;
    /// Turns part of an expected cost into a real cost.
    async fn cut_expected(&self, expected_id: &str, cut: CutRequest) -> Result<Transaction>;
}
