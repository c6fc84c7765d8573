//! Balance module - current and projected balance over the ledger.

mod balance_calculator;
mod balance_model;
mod balance_service;
mod balance_traits;

pub use balance_calculator::calculate_balance;
pub use balance_model::{BalanceSummary, ForeignTotals};
pub use balance_service::BalanceService;
pub use balance_traits::BalanceServiceTrait;
