//! This module is responsible for reading and writing the ledger's CSV data file.
//!
//! The file has one header row, `date,description,amount,category,type`, followed by one row per
//! transaction in the order they were entered. The whole file is rewritten every time a
//! transaction is added.

use crate::error::{ErrorType, IntoResult, Res};
use crate::model::{
    Amount, Candidate, Category, Ledger, Transaction, TransactionType, MAX_MAGNITUDE,
};
use crate::{utils, Result};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The header row of the data file.
pub const HEADERS: [&str; 5] = ["date", "description", "amount", "category", "type"];

/// The format used when writing dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time formats that are also accepted when reading, e.g. `2024-01-05 00:00:00`. These show
/// up when the file has been round-tripped through a tool that treats the column as a timestamp.
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Owns the location of the data file and performs all reads and writes of it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the ledger from the data file.
    ///
    /// - If the file does not exist, an empty data file (header row only) is created and an empty
    ///   `Ledger` is returned.
    /// - Dates that cannot be understood are treated as missing, with a warning, rather than
    ///   failing the load.
    /// - Amounts are re-signed according to the row's type.
    ///
    /// # Errors
    /// - Returns a `Storage` error if the file cannot be read or created, or if a row has a bad
    ///   amount, an unknown category or type, or is missing a column.
    /// - Returns a `Storage` error naming the row if a row has a blank description, an amount of
    ///   zero or an amount larger than `MAX_MAGNITUDE`.
    pub fn load(&self) -> Result<Ledger> {
        self.load_inner().pub_result(ErrorType::Storage)
    }

    /// Validates `candidate`, adds it to the end of `ledger` and writes the result to the data
    /// file. On success the new ledger is returned. `ledger` itself is never modified.
    ///
    /// # Errors
    /// - Returns an `InvalidInput` error if the description is blank or the amount is not greater
    ///   than zero. Nothing is written.
    /// - Returns a `Storage` error if the data file cannot be written. The previous contents of the
    ///   data file are left in place.
    pub fn append(&self, ledger: &Ledger, candidate: &Candidate) -> Result<Ledger> {
        let transaction = candidate.validate()?;
        let next = ledger.with_appended(transaction);
        self.save(&next)
            .context("Unable to save the new transaction")
            .pub_result(ErrorType::Storage)?;
        debug!(
            "Appended transaction {} to {}",
            next.len(),
            self.path.display()
        );
        Ok(next)
    }

    fn load_inner(&self) -> Res<Ledger> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                utils::make_dir(parent)?;
            }
            let ledger = Ledger::default();
            self.save(&ledger)
                .context("Unable to create an empty data file")?;
            info!("Created a new, empty data file at {}", self.path.display());
            return Ok(ledger);
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_path(&self.path)
            .with_context(|| format!("Unable to open data file {}", self.path.display()))?;

        let mut data = Vec::new();
        for (ix, result) in reader.deserialize::<CsvRecord>().enumerate() {
            // The header is row 1.
            let row = ix + 2;
            let record = result.with_context(|| {
                format!("Unable to read row {row} of {}", self.path.display())
            })?;
            let transaction = record.into_transaction(row).with_context(|| {
                format!("Invalid transaction in row {row} of {}", self.path.display())
            })?;
            data.push(transaction);
        }
        debug!(
            "Loaded {} transactions from {}",
            data.len(),
            self.path.display()
        );
        Ok(Ledger::new(data))
    }

    /// Writes the full ledger to a temporary file next to the data file, then moves it into place.
    /// If anything fails the temporary file is removed and the data file is left untouched.
    pub(crate) fn save(&self, ledger: &Ledger) -> Res<()> {
        let tmp = self.tmp_path();
        let result = write_csv(&tmp, ledger).and_then(|_| utils::rename(&tmp, &self.path));
        if result.is_err() && tmp.exists() {
            if let Err(e) = utils::remove(&tmp) {
                warn!("{e:#}");
            }
        }
        result
    }

    fn tmp_path(&self) -> PathBuf {
        let mut s: OsString = self.path.clone().into_os_string();
        s.push(".tmp");
        PathBuf::from(s)
    }
}

fn write_csv(path: &Path, ledger: &Ledger) -> Res<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Unable to create {}", path.display()))?;
    writer
        .write_record(HEADERS)
        .context("Unable to write the header row")?;
    for transaction in ledger {
        writer
            .serialize(CsvRecord::from(transaction))
            .context("Unable to write a transaction row")?;
    }
    writer
        .flush()
        .with_context(|| format!("Unable to flush {}", path.display()))
}

/// One row of the data file, as it is written.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
struct CsvRecord {
    date: String,
    description: String,
    amount: Amount,
    category: Category,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
}

impl CsvRecord {
    /// Converts the raw row into a `Transaction`. `row` is only used for log messages.
    ///
    /// Rows that break the rules `Candidate::validate` enforces, other than the sign, are an
    /// error: a blank description, a zero amount or an amount beyond `MAX_MAGNITUDE`.
    fn into_transaction(self, row: usize) -> Res<Transaction> {
        if self.description.trim().is_empty() {
            bail!("The description is blank");
        }
        if self.amount.is_zero() {
            bail!("The amount is zero");
        }
        if !self.amount.is_within_limit() {
            bail!(
                "The amount {} is larger than {MAX_MAGNITUDE}",
                self.amount.plain()
            );
        }

        let date = match parse_stored_date(&self.date) {
            Ok(date) => date,
            Err(e) => {
                warn!(
                    "Row {row}: unable to understand the date '{}' ({e}), it will be treated as \
                    missing",
                    self.date
                );
                None
            }
        };

        let amount = self.transaction_type.normalize(self.amount.value());
        if amount != self.amount {
            warn!(
                "Row {row}: the amount {} does not match the type {}, using {}",
                self.amount.plain(),
                self.transaction_type,
                amount.plain()
            );
        }

        Ok(Transaction::new(
            date,
            self.description,
            amount,
            self.category,
            self.transaction_type,
        ))
    }
}

impl From<&Transaction> for CsvRecord {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t
                .date()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            description: t.description().to_string(),
            amount: t.amount(),
            category: t.category(),
            transaction_type: t.transaction_type(),
        }
    }
}

/// Parses a date from the data file. An empty string is a missing date and is not an error.
fn parse_stored_date(s: &str) -> std::result::Result<Option<NaiveDate>, chrono::ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let err = match NaiveDate::parse_from_str(s, DATE_FORMAT) {
        Ok(date) => return Ok(Some(date)),
        Err(e) => e,
    };
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Some(dt.date()));
        }
    }
    Err(err)
}
