//! Types that represent the core data model, such as `Transaction` and `Ledger`.
mod amount;
mod category;
mod ledger;
mod transaction;

pub use amount::{Amount, AmountError, MAX_MAGNITUDE};
pub use category::Category;
pub use ledger::Ledger;
pub use transaction::{Candidate, Transaction, TransactionType};
