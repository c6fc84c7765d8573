use super::balance_model::BalanceSummary;
use crate::errors::Result;

/// Trait for balance service operations
pub trait BalanceServiceTrait: Send + Sync {
    fn get_balance(&self) -> Result<BalanceSummary>;
}
