//! Balance derivation for the allowance ledger.
//!
//! Balances are never stored: they are recomputed from a child's transactions
//! on every read as the sum of income amounts minus the sum of outcome amounts.

use shared::{Child, Transaction, TransactionType};

/// Totals for a child's overview section
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceSummary {
    pub total_income: f64,
    pub total_outcome: f64,
    pub balance: f64,
    pub transaction_count: usize,
}

/// Net balance of a list of transactions; zero for an empty list
pub fn calculate_balance(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .fold(0.0, |total, transaction| total + transaction.signed_amount())
}

pub fn child_balance(child: &Child) -> f64 {
    child.balance()
}

pub fn summarize(transactions: &[Transaction]) -> BalanceSummary {
    let mut summary = BalanceSummary {
        transaction_count: transactions.len(),
        ..Default::default()
    };

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => summary.total_income += transaction.amount,
            TransactionType::Outcome => summary.total_outcome += transaction.amount,
        }
    }
    summary.balance = summary.total_income - summary.total_outcome;

    summary
}
