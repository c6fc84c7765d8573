use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fx::{Currency, Rate};

/// Balance figures in the base currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub currency: Currency,
    /// Incomes minus realized costs, taken from the rounded totals so it
    /// always equals `total_income - total_costs`.
    pub balance: Decimal,
    /// Balance minus what is still expected to be spent.
    pub projected_balance: Decimal,
    pub total_income: Decimal,
    pub total_costs: Decimal,
    pub total_expected_remaining: Decimal,
    pub transaction_count: usize,
    /// Rate the figures were converted with.
    pub rate: Option<Rate>,
    /// The same figures in the foreign currency, when a rate is known.
    /// Each one is converted from the exact base figure and rounded on its own.
    pub foreign: Option<ForeignTotals>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForeignTotals {
    pub currency: Currency,
    pub balance: Decimal,
    pub projected_balance: Decimal,
    pub total_income: Decimal,
    pub total_costs: Decimal,
    pub total_expected_remaining: Decimal,
}
