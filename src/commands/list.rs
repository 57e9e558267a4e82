use crate::args::ListArgs;
use crate::commands::{markdown_table, Out};
use crate::model::Transaction;
use crate::{Config, Result};

const COLUMNS: [&str; 5] = ["Date", "Description", "Amount", "Category", "Type"];

/// Lists transactions newest first, optionally only the most recent `limit` of them.
///
/// The message is a table of the transactions; the structure holds the same transactions.
pub fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let ledger = config.store().load()?;
    if ledger.is_empty() {
        return Ok(Out::new("No transactions to show yet.", Vec::new()));
    }

    let limit = args.limit().unwrap_or(ledger.len());
    let shown: Vec<Transaction> = ledger
        .recent_first()
        .into_iter()
        .take(limit)
        .cloned()
        .collect();

    let mut message = table(&shown);
    if shown.len() < ledger.len() {
        message.push_str(&format!(
            "\n\nShowing {} of {} transactions",
            shown.len(),
            ledger.len()
        ));
    }
    Ok(Out::new(message, shown))
}

/// Renders transactions as a Markdown table.
fn table(transactions: &[Transaction]) -> String {
    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|t| {
            vec![
                t.date()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| String::from("-")),
                t.description().to_string(),
                t.amount().to_string(),
                t.category().to_string(),
                t.transaction_type().to_string(),
            ]
        })
        .collect();
    markdown_table(&COLUMNS, &rows)
}
