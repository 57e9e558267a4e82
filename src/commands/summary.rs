use crate::aggregate::{Overview, QuickStats};
use crate::commands::{markdown_table, Out};
use crate::model::{Amount, Category};
use crate::{Config, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Computes every view of the ledger: current balance, monthly net flow, expenses by category and
/// quick stats.
///
/// The message is a human-readable report; the structure is the `Overview`.
pub fn summary(config: Config) -> Result<Out<Overview>> {
    let ledger = config.store().load()?;
    let overview = Overview::new(&ledger);
    if ledger.is_empty() {
        return Ok(Out::new(
            "No transactions yet. Add one with 'fin add'.",
            overview,
        ));
    }
    Ok(Out::new(report(&overview), overview))
}

fn report(overview: &Overview) -> String {
    let monthly: Vec<Vec<String>> = overview
        .monthly_net_flow
        .iter()
        .map(|m| vec![m.year_month.clone(), Amount::new(m.net).to_string()])
        .collect();

    let monthly = if monthly.is_empty() {
        String::from("No dated transactions yet.")
    } else {
        markdown_table(&["Month", "Net"], &monthly)
    };

    let breakdown = if overview.expense_breakdown.is_empty() {
        String::from("No expenses yet.")
    } else {
        breakdown_table(
            &overview.expense_breakdown,
            overview.quick_stats.total_expenses,
        )
    };

    format!(
        "Current Balance: {}\n\n\
        Monthly Net Flow\n{monthly}\n\n\
        Expense Breakdown by Category\n{breakdown}\n\n\
        Quick Stats\n{}",
        Amount::new(overview.balance),
        stats_lines(&overview.quick_stats)
    )
}

/// Expenses per category with each category's share of the total, largest first.
fn breakdown_table(breakdown: &BTreeMap<Category, Decimal>, total: Decimal) -> String {
    let mut entries: Vec<(&Category, &Decimal)> = breakdown.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    let rows: Vec<Vec<String>> = entries
        .into_iter()
        .map(|(category, magnitude)| {
            vec![
                category.to_string(),
                Amount::new(*magnitude).to_string(),
                share(*magnitude, total),
            ]
        })
        .collect();
    markdown_table(&["Category", "Amount", "Share"], &rows)
}

fn share(part: Decimal, total: Decimal) -> String {
    if total.is_zero() {
        return String::from("-");
    }
    let percent = (part / total * Decimal::ONE_HUNDRED).round_dp(1);
    format!("{percent:.1}%")
}

fn stats_lines(stats: &QuickStats) -> String {
    format!(
        "Total Income: {}\nTotal Expenses: {}\nTransactions: {}",
        Amount::new(stats.total_income),
        Amount::new(stats.total_expenses),
        stats.count
    )
}
