//! Transaction filter
//!
//! Two fixed predicates applied in sequence:
//!
//! 1. validity: the transfer is balance-consistent from at least one side
//! 2. fraud: the valid record carries either fraud label
//!
//! Everything here is pure. Records are borrowed in, the fraud subset is
//! cloned out in input order.

use crate::record::Transaction;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places both sides of a balance comparison are rounded to
pub const COMPARISON_SCALE: u32 = 2;

/// Counts and fraud subset produced by [`split`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Records in the input
    pub total: usize,
    /// Records passing the validity predicate
    pub valid: usize,
    /// Valid records carrying a fraud label, in input order
    pub fraud: Vec<Transaction>,
}

impl FilterReport {
    /// Whether there is anything to persist
    pub fn has_fraud(&self) -> bool {
        !self.fraud.is_empty()
    }
}

/// Round to [`COMPARISON_SCALE`] places, ties to even
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(COMPARISON_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Balance-consistency predicate
///
/// Valid when the origin lost at least the amount, or the destination
/// gained at most the amount. Either side is enough.
///
/// A difference or sum outside the `Decimal` range lies beyond every
/// representable value, so it compares by the sign it overflowed towards.
pub fn is_valid(tx: &Transaction) -> bool {
    let origin_side = match tx.old_balance_orig.checked_sub(tx.new_balance_orig) {
        Some(debited) => round2(debited) >= round2(tx.amount),
        None => tx.old_balance_orig.is_sign_positive(),
    };
    let dest_side = match tx.old_balance_dest.checked_add(tx.amount) {
        Some(expected) => round2(expected) >= round2(tx.new_balance_dest),
        None => tx.amount.is_sign_positive(),
    };
    origin_side || dest_side
}

/// Fraud-label predicate
pub fn is_fraud(tx: &Transaction) -> bool {
    tx.is_fraud || tx.is_flagged_fraud
}

/// Records passing the validity predicate
pub fn valid_transactions<'a>(
    records: &'a [Transaction],
) -> impl Iterator<Item = &'a Transaction> + 'a {
    records.iter().filter(|tx| is_valid(tx))
}

/// Valid records that carry a fraud label
pub fn fraud_transactions<'a>(
    records: &'a [Transaction],
) -> impl Iterator<Item = &'a Transaction> + 'a {
    valid_transactions(records).filter(|tx| is_fraud(tx))
}

/// Run both stages and report counts alongside the fraud subset
pub fn split(records: &[Transaction]) -> FilterReport {
    let valid: Vec<&Transaction> = valid_transactions(records).collect();
    let fraud: Vec<Transaction> = valid
        .iter()
        .copied()
        .filter(|tx| is_fraud(tx))
        .cloned()
        .collect();

    FilterReport {
        total: records.len(),
        valid: valid.len(),
        fraud,
    }
}
