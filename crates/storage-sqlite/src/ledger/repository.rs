use pennywise_core::ledger::{
    plan_delete, plan_insert, plan_update, LedgerError, LedgerRepositoryTrait, NewTransaction,
    Transaction, TransactionKind, TransactionUpdate,
};
use pennywise_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::transactions;
use crate::schema::transactions::dsl::*;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct LedgerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn find_transaction(conn: &mut SqliteConnection, tx_id: &str) -> Result<Option<Transaction>> {
    let row = transactions
        .find(tx_id)
        .first::<TransactionDB>(conn)
        .optional()
        .into_core()?;
    Ok(row.map(Transaction::try_from).transpose()?)
}

fn find_optional(conn: &mut SqliteConnection, tx_id: Option<&str>) -> Result<Option<Transaction>> {
    match tx_id {
        Some(tx_id) => find_transaction(conn, tx_id),
        None => Ok(None),
    }
}

fn save_transaction(conn: &mut SqliteConnection, row: Transaction) -> Result<()> {
    let row_db = TransactionDB::from(row);
    diesel::update(transactions.find(row_db.id.clone()))
        .set(&row_db)
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

impl LedgerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        LedgerRepository { pool, writer }
    }

    fn to_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>> {
        rows.into_iter()
            .map(|r| Transaction::try_from(r).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    fn list_transactions(&self, kind_filter: Option<TransactionKind>) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions.into_boxed();
        if let Some(k) = kind_filter {
            query = query.filter(kind.eq(k.as_str()));
        }
        let rows = query
            .order((date.desc(), created_at.desc()))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn get_transaction(&self, tx_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        find_transaction(&mut conn, tx_id)
    }

    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let expected = find_optional(conn, new.expected_ref_id.as_deref())?;
                let plan = plan_insert(new, expected, Utc::now().naive_utc())?;
                if let Some(exp) = plan.expected {
                    save_transaction(conn, exp)?;
                }

                let result_db = diesel::insert_into(transactions::table)
                    .values(TransactionDB::from(plan.transaction))
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::try_from(result_db)?)
            })
            .await
    }

    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let current = find_transaction(conn, &update.id)?
                    .ok_or_else(|| LedgerError::NotFound(update.id.clone()))?;
                let expected = find_optional(conn, current.expected_ref_id.as_deref())?;
                let plan = plan_update(current, expected, update, Utc::now().naive_utc())?;
                if let Some(exp) = plan.expected {
                    save_transaction(conn, exp)?;
                }
                save_transaction(conn, plan.transaction.clone())?;
                Ok(plan.transaction)
            })
            .await
    }

    async fn delete_transaction(&self, tx_id: &str) -> Result<Transaction> {
        let tx_id = tx_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let target = find_transaction(conn, &tx_id)?
                    .ok_or_else(|| LedgerError::NotFound(tx_id.clone()))?;
                let linked = find_optional(conn, target.expected_ref_id.as_deref())?;
                let plan = plan_delete(target, linked, Utc::now().naive_utc())?;

                if let Some(exp) = plan.expected {
                    save_transaction(conn, exp)?;
                }
                if plan.unlink_costs {
                    let unlinked = diesel::update(transactions.filter(expected_ref_id.eq(&tx_id)))
                        .set(expected_ref_id.eq(None::<String>))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    log::debug!("Unlinked {} costs from expected cost {}", unlinked, tx_id);
                }
                diesel::delete(transactions.find(&tx_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(plan.deleted)
            })
            .await
    }
}
