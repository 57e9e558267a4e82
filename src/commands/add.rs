use crate::aggregate::Overview;
use crate::args::AddArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, Transaction};
use crate::{Config, Result};
use anyhow::Context;
use serde::Serialize;

/// The structured output of `fin add`: the transaction as it was stored and the refreshed views.
#[derive(Debug, Clone, Serialize)]
pub struct Added {
    pub transaction: Transaction,
    pub overview: Overview,
}

/// Records a new transaction.
///
/// The ledger is loaded, the transaction built from `args` is validated and appended, and the
/// whole ledger is written back to the data file. The views are then recomputed from the new
/// ledger.
///
/// # Errors
/// - Returns an `InvalidInput` error if the description is empty or the amount is not greater than
///   zero. The data file is not changed.
/// - Returns a `Storage` error if the data file cannot be read or written.
pub fn add(config: Config, args: AddArgs) -> Result<Out<Added>> {
    let store = config.store();
    let ledger = store.load()?;
    let ledger = store.append(&ledger, &args.candidate())?;

    // Append always adds at the end, so this is the transaction that was just stored.
    let transaction = ledger
        .last()
        .cloned()
        .context("The ledger is empty after adding a transaction")
        .pub_result(ErrorType::Storage)?;
    let overview = Overview::new(&ledger);

    let message = format!(
        "Transaction added! {} {} ({}). Current balance: {}",
        transaction.description(),
        transaction.amount(),
        transaction.category(),
        Amount::new(overview.balance)
    );
    Ok(Out::new(
        message,
        Added {
            transaction,
            overview,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, TransactionType, MAX_MAGNITUDE};
    use rust_decimal::Decimal;
    use crate::test::{date, TestEnv};
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_add() {
        let env = TestEnv::new();
        env.insert_sample_transactions();
        let args = AddArgs::new(
            "Bus pass",
            Amount::from_str("$45.00").unwrap(),
            TransactionType::Expense,
            Category::Transport,
            Some(date("2024-02-03")),
        );

        let out = add(env.config(), args).unwrap();

        assert_eq!(
            out.message(),
            "Transaction added! Bus pass -$45.00 (Transport). Current balance: $705.00"
        );
        let added = out.structure().unwrap();
        assert_eq!(added.transaction.amount().value(), dec!(-45));
        assert_eq!(added.overview.quick_stats.count, 4);
        assert_eq!(env.config().store().load().unwrap().len(), 4);
    }

    #[test]
    fn test_add_amount_over_limit() {
        let env = TestEnv::new();
        let args = AddArgs::new(
            "Windfall",
            Amount::from_str("79228162514264337593543950335").unwrap(),
            TransactionType::Income,
            Category::Salary,
            Some(date("2024-03-01")),
        );
        for _ in 0..2 {
            let err = add(env.config(), args.clone()).unwrap_err();
            assert_eq!(err.error_type(), ErrorType::InvalidInput);
        }
        assert!(env.config().store().load().unwrap().is_empty());
    }

    #[test]
    fn test_add_largest_amount_twice() {
        let env = TestEnv::new();
        let args = AddArgs::new(
            "Windfall",
            Amount::new(Decimal::from(MAX_MAGNITUDE)),
            TransactionType::Income,
            Category::Salary,
            Some(date("2024-03-01")),
        );
        add(env.config(), args.clone()).unwrap();
        let out = add(env.config(), args).unwrap();
        let overview = &out.structure().unwrap().overview;
        assert_eq!(overview.balance, Decimal::from(MAX_MAGNITUDE) * dec!(2));
        assert_eq!(overview.quick_stats.total_income, overview.balance);
    }

    #[test]
    fn test_add_invalid() {
        let env = TestEnv::new();
        let args = AddArgs::new(
            "",
            Amount::from_str("10").unwrap(),
            TransactionType::Income,
            Category::Salary,
            None,
        );
        let err = add(env.config(), args).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidInput);
        assert!(env.config().store().load().unwrap().is_empty());
    }
}
