//! Balance reconciliation.
//!
//! Two independent checks gate every parse: the declared category totals
//! must explain the declared ending balance, and so must the parsed
//! transactions. Statements round their printed figures, so both sides
//! are compared after rounding to one decimal place.

use rust_decimal::Decimal;

use crate::error::{BalanceCheck, Error, Result};
use crate::types::Transaction;

fn round1(value: Decimal) -> Decimal {
    value.round_dp(1)
}

/// Beginning balance plus declared category subtotals (sign already
/// applied) must equal the declared ending balance.
pub fn check_summary(
    beginning: Decimal,
    ending: Decimal,
    declared: &[(String, Decimal)],
) -> Result<()> {
    let computed = beginning + declared.iter().map(|(_, v)| *v).sum::<Decimal>();
    if round1(computed) != round1(ending) {
        return Err(Error::BalanceMismatch {
            check: BalanceCheck::Summary,
            expected: ending.round_dp(2),
            computed: computed.round_dp(2),
        });
    }
    Ok(())
}

/// Beginning balance plus the sum of parsed transaction amounts must
/// equal the declared ending balance.
pub fn check_transactions(
    beginning: Decimal,
    ending: Decimal,
    transactions: &[Transaction],
) -> Result<()> {
    let computed = beginning + transactions.iter().map(|tx| tx.amount).sum::<Decimal>();
    if round1(computed) != round1(ending) {
        return Err(Error::BalanceMismatch {
            check: BalanceCheck::Transactions,
            expected: ending.round_dp(2),
            computed: computed.round_dp(2),
        });
    }
    Ok(())
}

/// A declared per-category subtotal (sign already applied) must match the
/// transactions parsed for that category so far. Runs as each category
/// section closes.
pub fn check_subtotal(
    category: &str,
    declared: Decimal,
    transactions: &[Transaction],
) -> Result<()> {
    let computed: Decimal = transactions
        .iter()
        .filter(|tx| tx.category == category)
        .map(|tx| tx.amount)
        .sum();
    if round1(computed) != round1(declared) {
        return Err(Error::BalanceMismatch {
            check: BalanceCheck::Subtotal(category.to_string()),
            expected: declared.round_dp(2),
            computed: computed.round_dp(2),
        });
    }
    Ok(())
}
