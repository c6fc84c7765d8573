//! Balance computation.
//!
//! Sums are accumulated exactly; only the reported figures are rounded
//! (half-even, two places).

use rust_decimal::{Decimal, RoundingStrategy};

use super::balance_model::{BalanceSummary, ForeignTotals};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::fx::{Currency, FxError, Rate};
use crate::ledger::{Transaction, TransactionKind};

#[derive(Default)]
struct Totals {
    income: Decimal,
    costs: Decimal,
    expected_remaining: Decimal,
}

/// Rounded figures. Balances are derived from the rounded totals so that
/// `balance == total_income - total_costs` holds exactly in the report.
/// `exact_*` keep the unrounded balances for the foreign conversion.
struct Reported {
    income: Decimal,
    costs: Decimal,
    expected_remaining: Decimal,
    balance: Decimal,
    projected: Decimal,
    exact_balance: Decimal,
    exact_projected: Decimal,
}

fn overflow(what: &str) -> Error {
    Error::Unexpected(format!("Balance overflowed while {}", what))
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointNearestEven,
    )
}

impl Totals {
    fn add(total: &mut Decimal, amount: Decimal) -> Result<()> {
        *total = total
            .checked_add(amount)
            .ok_or_else(|| overflow("summing entries"))?;
        Ok(())
    }

    fn report(&self) -> Result<Reported> {
        let exact_balance = self
            .income
            .checked_sub(self.costs)
            .ok_or_else(|| overflow("computing the balance"))?;
        let exact_projected = exact_balance
            .checked_sub(self.expected_remaining)
            .ok_or_else(|| overflow("computing the projected balance"))?;
        let income = round(self.income);
        let costs = round(self.costs);
        let expected_remaining = round(self.expected_remaining);
        let balance = income
            .checked_sub(costs)
            .ok_or_else(|| overflow("computing the balance"))?;
        let projected = balance
            .checked_sub(expected_remaining)
            .ok_or_else(|| overflow("computing the projected balance"))?;
        Ok(Reported {
            income,
            costs,
            expected_remaining,
            balance,
            projected,
            exact_balance,
            exact_projected,
        })
    }
}

fn to_base(amount: Decimal, currency: Currency, rate: Option<&Rate>) -> Result<Decimal> {
    match (currency, rate) {
        (Currency::Base, _) => Ok(amount),
        (Currency::Foreign, Some(rate)) => rate
            .to_base(amount, currency)
            .ok_or_else(|| overflow("converting an entry")),
        (Currency::Foreign, None) => Err(FxError::RateUnavailable {
            from: Currency::Foreign,
            to: Currency::Base,
        }
        .into()),
    }
}

/// Computes the current and projected balance over `transactions`.
///
/// Fails with `FxError::RateUnavailable` when a foreign entry is present and
/// `rate` is `None`. Order of `transactions` does not matter. Figures too large
/// for a decimal yield `Error::Unexpected` instead of a panic.
pub fn calculate_balance(
    transactions: &[Transaction],
    rate: Option<&Rate>,
) -> Result<BalanceSummary> {
    let mut totals = Totals::default();

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => {
                Totals::add(&mut totals.income, to_base(tx.amount, tx.currency, rate)?)?
            }
            TransactionKind::Cost => {
                Totals::add(&mut totals.costs, to_base(tx.amount, tx.currency, rate)?)?
            }
            TransactionKind::ExpectedCost => Totals::add(
                &mut totals.expected_remaining,
                to_base(tx.outstanding(), tx.currency, rate)?,
            )?,
        }
    }

    let report = totals.report()?;
    let foreign = match rate {
        Some(r) => {
            let convert = |v: Decimal| {
                r.to_foreign(v)
                    .map(round)
                    .ok_or_else(|| overflow("converting totals"))
            };
            Some(ForeignTotals {
                currency: r.from_currency,
                balance: convert(report.exact_balance)?,
                projected_balance: convert(report.exact_projected)?,
                total_income: convert(totals.income)?,
                total_costs: convert(totals.costs)?,
                total_expected_remaining: convert(totals.expected_remaining)?,
            })
        }
        None => None,
    };

    Ok(BalanceSummary {
        currency: Currency::Base,
        balance: report.balance,
        projected_balance: report.projected,
        total_income: report.income,
        total_costs: report.costs,
        total_expected_remaining: report.expected_remaining,
        transaction_count: transactions.len(),
        rate: rate.cloned(),
        foreign,
    })
}
