use crate::model::Transaction;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// The ordered collection of all recorded transactions, in the order they were entered.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    data: Vec<Transaction>,
}

impl Ledger {
    pub fn new(data: Vec<Transaction>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[Transaction] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.data.iter()
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.data.last()
    }

    /// Returns a new ledger with `transaction` added at the end. `self` is left untouched.
    pub(crate) fn with_appended(&self, transaction: Transaction) -> Ledger {
        let mut data = Vec::with_capacity(self.data.len() + 1);
        data.extend(self.data.iter().cloned());
        data.push(transaction);
        Ledger { data }
    }

    /// The transactions newest first. Transactions without a date go to the end, and transactions
    /// sharing a date keep the order in which they were entered.
    pub fn recent_first(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.data.iter().collect();
        sorted.sort_by_key(|t| (t.date().is_none(), Reverse(t.date())));
        sorted
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Category, TransactionType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn t(date: Option<(i32, u32, u32)>, description: &str) -> Transaction {
        Transaction::new(
            date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            description,
            Amount::new(dec!(-1)),
            Category::Other,
            TransactionType::Expense,
        )
    }

    #[test]
    fn test_with_appended_leaves_original() {
        let ledger = Ledger::new(vec![t(Some((2024, 1, 1)), "a")]);
        let next = ledger.with_appended(t(Some((2024, 1, 2)), "b"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next.last().unwrap().description(), "b");
    }

    #[test]
    fn test_recent_first() {
        let ledger = Ledger::new(vec![
            t(Some((2024, 1, 5)), "old"),
            t(None, "undated"),
            t(Some((2024, 3, 1)), "new"),
            t(Some((2024, 1, 5)), "old second"),
        ]);
        let order: Vec<&str> = ledger
            .recent_first()
            .into_iter()
            .map(|t| t.description())
            .collect();
        assert_eq!(order, vec!["new", "old", "old second", "undated"]);
    }

    #[test]
    fn test_empty() {
        let ledger = Ledger::default();
        assert!(ledger.is_empty());
        assert!(ledger.recent_first().is_empty());
        assert!(ledger.last().is_none());
    }
}
