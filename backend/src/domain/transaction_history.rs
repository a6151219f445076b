//! Month-grouped view of a child's transaction history.
//!
//! Transactions are grouped by the calendar month (UTC) of their date, newest
//! month first. Inside a group the stored order is kept, so a history that is
//! newest-first stays newest-first.

use chrono::{Datelike, NaiveDate};
use shared::Transaction;

use super::balance_service::calculate_balance;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub transactions: Vec<Transaction>,
}

impl MonthGroup {
    /// First day of the month this group covers
    pub fn start_of_month(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Header label, e.g. "November 2025"
    pub fn label(&self) -> String {
        self.start_of_month().format("%B %Y").to_string()
    }

    /// Net income minus outcome within the month
    pub fn net_total(&self) -> f64 {
        calculate_balance(&self.transactions)
    }
}

pub fn group_by_month(transactions: &[Transaction]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();

    for transaction in transactions {
        let key = (transaction.date.year(), transaction.date.month());
        match groups.iter_mut().find(|g| (g.year, g.month) == key) {
            Some(group) => group.transactions.push(transaction.clone()),
            None => groups.push(MonthGroup {
                year: key.0,
                month: key.1,
                transactions: vec![transaction.clone()],
            }),
        }
    }

    groups.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
    groups
}
