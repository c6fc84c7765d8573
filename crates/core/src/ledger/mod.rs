//! Ledger module - incomes, costs and expected costs.

mod ledger_errors;
mod ledger_model;
mod ledger_rules;
mod ledger_service;
mod ledger_traits;

#[cfg(test)]
mod ledger_service_tests;

pub use ledger_errors::LedgerError;
pub use ledger_model::{
    CutRequest, NewTransaction, Transaction, TransactionKind, TransactionUpdate,
};
pub use ledger_rules::{plan_delete, plan_insert, plan_update, DeletePlan, WritePlan};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
