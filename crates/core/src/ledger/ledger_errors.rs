use rust_decimal::Decimal;
use thiserror::Error;

use super::ledger_model::TransactionKind;
use crate::fx::Currency;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Transaction '{0}' not found")]
    NotFound(String),

    #[error("Transaction '{id}' is {kind}, not an expected cost")]
    NotAnExpectedCost { id: String, kind: TransactionKind },

    #[error("Only costs can be linked to an expected cost, got {0}")]
    InvalidLink(TransactionKind),

    #[error("Currency mismatch: expected cost is in {expected}, entry is in {actual}")]
    CurrencyMismatch { expected: Currency, actual: Currency },

    #[error("Cannot cut {requested} from an expected cost with {remaining} remaining")]
    CutExceedsRemaining {
        requested: Decimal,
        remaining: Decimal,
    },

    #[error("Amount {amount} is below the {realized} already realized from this expected cost")]
    BelowRealized { amount: Decimal, realized: Decimal },
}
