//! Pure planning of ledger writes.
//!
//! Repositories load the affected rows inside their write transaction, call one
//! of these functions and persist whatever the plan says. Keeping the rules here
//! lets every storage backend share them.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::ledger_errors::LedgerError;
use super::ledger_model::{NewTransaction, Transaction, TransactionKind, TransactionUpdate};
use crate::errors::Result;

/// Rows to write for an insert or update.
#[derive(Debug, Clone, PartialEq)]
pub struct WritePlan {
    pub transaction: Transaction,
    /// Expected cost whose remaining changed alongside, if any.
    pub expected: Option<Transaction>,
}

/// Rows to touch when deleting an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletePlan {
    pub deleted: Transaction,
    /// Expected cost that gets the deleted cost's amount back.
    pub expected: Option<Transaction>,
    /// Costs cut from the deleted entry must lose their link.
    pub unlink_costs: bool,
}

/// Builds the row for a new entry. `expected` must be the row named by
/// `new.expected_ref_id`, or `None` when that id does not exist.
pub fn plan_insert(
    new: NewTransaction,
    expected: Option<Transaction>,
    now: NaiveDateTime,
) -> Result<WritePlan> {
    new.validate()?;

    let expected = match (&new.expected_ref_id, expected) {
        (None, _) => None,
        (Some(ref_id), None) => return Err(LedgerError::NotFound(ref_id.clone()).into()),
        (Some(_), Some(mut exp)) => {
            if exp.currency != new.currency {
                return Err(LedgerError::CurrencyMismatch {
                    expected: exp.currency,
                    actual: new.currency,
                }
                .into());
            }
            exp.apply_cut(new.amount)?;
            exp.updated_at = now;
            Some(exp)
        }
    };

    let remaining = (new.kind == TransactionKind::ExpectedCost).then_some(new.amount);
    let transaction = Transaction {
        id: Uuid::new_v4().to_string(),
        kind: new.kind,
        amount: new.amount,
        currency: new.currency,
        date: new.date.unwrap_or(now),
        description: new.description,
        remaining,
        expected_ref_id: new.expected_ref_id,
        created_at: now,
        updated_at: now,
    };

    Ok(WritePlan {
        transaction,
        expected,
    })
}

/// Applies an edit. `expected` is the expected cost `current` was cut from, if any.
pub fn plan_update(
    current: Transaction,
    expected: Option<Transaction>,
    update: TransactionUpdate,
    now: NaiveDateTime,
) -> Result<WritePlan> {
    update.validate()?;

    let mut transaction = current;
    let previous_amount = transaction.amount;
    transaction.reprice(update.amount)?;
    if let Some(date) = update.date {
        transaction.date = date;
    }
    transaction.description = update.description;
    transaction.updated_at = now;

    let delta = transaction.amount - previous_amount;
    let expected = match expected {
        Some(mut exp)
            if !delta.is_zero()
                && transaction.expected_ref_id.as_deref() == Some(exp.id.as_str()) =>
        {
            if delta > Decimal::ZERO {
                exp.apply_cut(delta)?;
            } else {
                exp.restore_cut(-delta)?;
            }
            exp.updated_at = now;
            Some(exp)
        }
        _ => None,
    };

    Ok(WritePlan {
        transaction,
        expected,
    })
}

/// Works out the side effects of deleting `target`.
pub fn plan_delete(
    target: Transaction,
    expected: Option<Transaction>,
    now: NaiveDateTime,
) -> Result<DeletePlan> {
    let unlink_costs = target.kind == TransactionKind::ExpectedCost;
    let expected = match expected {
        Some(mut exp)
            if target.kind == TransactionKind::Cost
                && target.expected_ref_id.as_deref() == Some(exp.id.as_str()) =>
        {
            exp.restore_cut(target.amount)?;
            exp.updated_at = now;
            Some(exp)
        }
        _ => None,
    };

    Ok(DeletePlan {
        deleted: target,
        expected,
        unlink_costs,
    })
}
