//! These structs provide the CLI interface for the fin CLI.

use crate::model::{Amount, Candidate, Category, TransactionType};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fin: A command-line tool for tracking personal income and expenses.
///
/// Transactions are kept in a CSV file in your fin home directory. Use `fin add` to record income
/// or expenses, `fin list` to see them, and `fin summary` for your balance, monthly net flow and
/// where your money went.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the fin home directory, its configuration file and an empty data file.
    ///
    /// This is the first command you should run. By default the home directory is $HOME/fin, pass
    /// --fin-home or set FIN_HOME if you want it somewhere else.
    Init,
    /// Record a new income or expense transaction.
    Add(AddArgs),
    /// Show recorded transactions, newest first.
    List(ListArgs),
    /// Show the current balance, monthly net flow, expenses by category and quick stats.
    Summary,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fin data and configuration is held. Defaults to ~/fin
    #[arg(long, env = "FIN_HOME", default_value_t = default_fin_home())]
    fin_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fin_home(&self) -> &DisplayPath {
        &self.fin_home
    }
}

/// Args for the `fin add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// What the transaction was for, e.g. "Groceries". Must not be empty.
    #[arg(long, short = 'd')]
    description: String,

    /// The amount, greater than zero. A dollar sign and commas are allowed, e.g. $1,200.50. Do not
    /// give a sign, whether the amount is added or subtracted is decided by --type.
    #[arg(long, short = 'a', allow_hyphen_values = true)]
    amount: Amount,

    /// Whether this is income or an expense.
    #[arg(long = "type", short = 't', value_enum, default_value_t = TransactionType::Expense)]
    transaction_type: TransactionType,

    /// The category of the transaction.
    #[arg(long, short = 'c', value_enum, default_value_t = Category::Shopping)]
    category: Category,

    /// The date of the transaction as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl AddArgs {
    pub fn new(
        description: impl Into<String>,
        amount: Amount,
        transaction_type: TransactionType,
        category: Category,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            transaction_type,
            category,
            date,
        }
    }

    /// Builds the `Candidate` that will be submitted to the ledger, filling in today's date if none
    /// was given.
    pub fn candidate(&self) -> Candidate {
        Candidate::new(
            self.date.unwrap_or_else(|| Local::now().date_naive()),
            self.description.clone(),
            self.amount.value(),
            self.transaction_type,
            self.category,
        )
    }
}

/// Args for the `fin list` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// Only show this many of the most recent transactions.
    #[arg(long, short = 'n')]
    limit: Option<usize>,
}

impl ListArgs {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

fn default_fin_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fin"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fin-home or FIN_HOME instead of relying on the default \
                fin home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("fin")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_add() {
        let args = Args::try_parse_from([
            "fin",
            "--fin-home",
            "/tmp/fin",
            "add",
            "--description",
            "Paycheck",
            "--amount",
            "$1,000.00",
            "--type",
            "income",
            "--category",
            "salary",
            "--date",
            "2024-01-05",
        ])
        .unwrap();
        assert_eq!(args.common().fin_home().path(), Path::new("/tmp/fin"));
        let Command::Add(add) = args.command() else {
            panic!("expected the add command");
        };
        let candidate = add.candidate();
        assert_eq!(candidate.description, "Paycheck");
        assert_eq!(candidate.amount, dec!(1000));
        assert_eq!(candidate.transaction_type, TransactionType::Income);
        assert_eq!(candidate.category, Category::Salary);
        assert_eq!(candidate.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_parse_add_defaults() {
        let args = Args::try_parse_from(["fin", "add", "-d", "Socks", "-a", "12"]).unwrap();
        let Command::Add(add) = args.command() else {
            panic!("expected the add command");
        };
        let candidate = add.candidate();
        assert_eq!(candidate.transaction_type, TransactionType::Expense);
        assert_eq!(candidate.category, Category::Shopping);
        assert_eq!(candidate.date, Local::now().date_naive());
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
    }

    #[test]
    fn test_parse_add_bad_amount() {
        assert!(Args::try_parse_from(["fin", "add", "-d", "Socks", "-a", "twelve"]).is_err());
    }

    #[test]
    fn test_parse_add_unknown_category() {
        assert!(
            Args::try_parse_from(["fin", "add", "-d", "Socks", "-a", "1", "-c", "groceries"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_list() {
        let args = Args::try_parse_from(["fin", "--log-level", "debug", "list", "-n", "5"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        let Command::List(list) = args.command() else {
            panic!("expected the list command");
        };
        assert_eq!(list.limit(), Some(5));
    }
}
