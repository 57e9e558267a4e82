//! fin: record income and expenses in a local CSV ledger and summarize them.
//!
//! The `LedgerStore` loads and appends to the ledger, the functions in `aggregate` compute the
//! balance, monthly net flow, expense breakdown and quick stats, and `commands` ties the two
//! together for the CLI.

pub mod aggregate;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
mod store;
mod utils;


pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use store::{LedgerStore, HEADERS};
