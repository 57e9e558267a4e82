//! Read-only views computed from a `Ledger`: balance, monthly net flow, expenses by category and
//! quick stats. None of these functions have side effects.

use crate::model::{Amount, Category, Ledger};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The net amount for one calendar month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MonthlyNet {
    /// e.g. `2024-01`
    pub year_month: String,
    pub net: Decimal,
}

/// Headline totals for the ledger.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuickStats {
    /// Sum of the positive amounts.
    pub total_income: Decimal,
    /// Magnitude of the sum of the negative amounts.
    pub total_expenses: Decimal,
    /// Number of transactions.
    pub count: usize,
}

/// Sum of all amounts.
pub fn balance(ledger: &Ledger) -> Decimal {
    ledger.iter().map(|t| t.amount()).sum::<Amount>().value()
}

/// The net amount per calendar month, oldest month first. Transactions without a date are left
/// out.
pub fn monthly_net_flow(ledger: &Ledger) -> Vec<MonthlyNet> {
    let mut months: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in ledger {
        if let Some(year_month) = t.year_month() {
            *months.entry(year_month).or_default() += t.amount().value();
        }
    }
    // `YYYY-MM` keys are zero-padded, so the map's string order is chronological.
    months
        .into_iter()
        .map(|(year_month, net)| MonthlyNet { year_month, net })
        .collect()
}

/// Total spent per category, as positive numbers. Categories with no expenses are absent.
pub fn expense_breakdown(ledger: &Ledger) -> BTreeMap<Category, Decimal> {
    let mut sums: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in ledger.iter().filter(|t| t.amount().is_negative()) {
        *sums.entry(t.category()).or_default() += t.amount().value();
    }
    sums.into_iter()
        .map(|(category, sum)| (category, sum.abs()))
        .filter(|(_, magnitude)| !magnitude.is_zero())
        .collect()
}

pub fn quick_stats(ledger: &Ledger) -> QuickStats {
    let mut stats = QuickStats {
        count: ledger.len(),
        ..QuickStats::default()
    };
    for amount in ledger.iter().map(|t| t.amount()) {
        if amount.is_positive() {
            stats.total_income += amount.value();
        } else if amount.is_negative() {
            stats.total_expenses += amount.value();
        }
    }
    stats.total_expenses = stats.total_expenses.abs();
    stats
}

/// Every view of the ledger at once, as shown on the summary page.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub balance: Decimal,
    pub monthly_net_flow: Vec<MonthlyNet>,
    pub expense_breakdown: BTreeMap<Category, Decimal>,
    pub quick_stats: QuickStats,
}

impl Overview {
    pub fn new(ledger: &Ledger) -> Self {
        Self {
            balance: balance(ledger),
            monthly_net_flow: monthly_net_flow(ledger),
            expense_breakdown: expense_breakdown(ledger),
            quick_stats: quick_stats(ledger),
        }
    }
}
