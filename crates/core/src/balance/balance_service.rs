use std::sync::Arc;

use super::balance_calculator::calculate_balance;
use super::balance_model::BalanceSummary;
use super::balance_traits::BalanceServiceTrait;
use crate::errors::Result;
use crate::fx::FxServiceTrait;
use crate::ledger::LedgerRepositoryTrait;

/// Reads the whole ledger and the current rate, then runs the calculator.
pub struct BalanceService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
}

impl BalanceService {
    pub fn new(
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        fx_service: Arc<dyn FxServiceTrait>,
    ) -> Self {
        Self {
            ledger_repository,
            fx_service,
        }
    }
}

impl BalanceServiceTrait for BalanceService {
    fn get_balance(&self) -> Result<BalanceSummary> {
        let transactions = self.ledger_repository.list_transactions(None)?;
        let rate = self.fx_service.get_current()?;
        calculate_balance(&transactions, rate.as_ref()).map_err(|e| {
            log::warn!("Balance calculation failed: {}", e);
            e
        })
    }
}
