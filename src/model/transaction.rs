use crate::error::Error;
use crate::model::{Amount, Category, MAX_MAGNITUDE};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether money came in or went out.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

impl TransactionType {
    /// Applies the sign convention: income is stored positive and expenses negative. The sign of
    /// `amount` on the way in is ignored.
    pub fn normalize(&self, amount: Decimal) -> Amount {
        let magnitude = amount.abs();
        match self {
            TransactionType::Income => Amount::new(magnitude),
            TransactionType::Expense => Amount::new(-magnitude),
        }
    }
}

/// A single recorded transaction. Construct one by submitting a `Candidate` to the
/// `LedgerStore`, which validates it and normalizes the sign of the amount.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    /// `None` when a stored date could not be understood.
    date: Option<NaiveDate>,
    description: String,
    /// Positive for income, negative for expenses.
    amount: Amount,
    category: Category,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
}

impl Transaction {
    pub(crate) fn new(
        date: Option<NaiveDate>,
        description: impl Into<String>,
        amount: Amount,
        category: Category,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category,
            transaction_type,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The calendar month of the transaction as `YYYY-MM`, if the date is known.
    pub fn year_month(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m").to_string())
    }
}

/// A transaction as submitted by the user, before validation. The `amount` is the raw magnitude
/// the user typed; its sign is decided by `transaction_type`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Candidate {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
}

impl Candidate {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        transaction_type: TransactionType,
        category: Category,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            transaction_type,
            category,
        }
    }

    /// Checks the candidate and, if it is acceptable, produces the sign-normalized `Transaction`.
    ///
    /// # Errors
    /// - `InvalidInput` if the description is blank.
    /// - `InvalidInput` if the amount is zero or negative.
    /// - `InvalidInput` if the amount is larger than `MAX_MAGNITUDE`.
    pub fn validate(&self) -> crate::Result<Transaction> {
        if self.description.trim().is_empty() {
            return Err(Error::invalid_input(
                "A description is required, please fill in the description",
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "The amount must be greater than zero, got {}",
                self.amount
            )));
        }
        let amount = self.transaction_type.normalize(self.amount);
        if !amount.is_within_limit() {
            return Err(Error::invalid_input(format!(
                "The amount must not be more than {}, got {}",
                Amount::new(Decimal::from(MAX_MAGNITUDE)),
                self.amount
            )));
        }
        Ok(Transaction::new(
            Some(self.date),
            self.description.clone(),
            amount,
            self.category,
            self.transaction_type,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expense_is_stored_negative() {
        let candidate = Candidate::new(
            date(2024, 1, 10),
            "Groceries",
            dec!(200),
            TransactionType::Expense,
            Category::Food,
        );
        let t = candidate.validate().unwrap();
        assert_eq!(t.amount().value(), dec!(-200));
        assert_eq!(t.date(), Some(date(2024, 1, 10)));
        assert_eq!(t.category(), Category::Food);
        assert_eq!(t.transaction_type(), TransactionType::Expense);
    }

    #[test]
    fn test_income_is_stored_positive() {
        let candidate = Candidate::new(
            date(2024, 1, 5),
            "Paycheck",
            dec!(1000),
            TransactionType::Income,
            Category::Salary,
        );
        assert_eq!(candidate.validate().unwrap().amount().value(), dec!(1000));
    }

    #[test]
    fn test_normalize_overrides_sign() {
        assert_eq!(
            TransactionType::Expense.normalize(dec!(-5)).value(),
            dec!(-5)
        );
        assert_eq!(TransactionType::Income.normalize(dec!(-5)).value(), dec!(5));
    }

    #[test]
    fn test_empty_description_rejected() {
        let candidate = Candidate::new(
            date(2024, 1, 5),
            "",
            dec!(10),
            TransactionType::Income,
            Category::Salary,
        );
        let err = candidate.validate().unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidInput);
    }

    #[test]
    fn test_blank_description_rejected() {
        let candidate = Candidate::new(
            date(2024, 1, 5),
            "   ",
            dec!(10),
            TransactionType::Income,
            Category::Salary,
        );
        assert_eq!(
            candidate.validate().unwrap_err().error_type(),
            ErrorType::InvalidInput
        );
    }

    #[test]
    fn test_zero_amount_rejected() {
        let candidate = Candidate::new(
            date(2024, 1, 5),
            "Coffee",
            dec!(0),
            TransactionType::Expense,
            Category::Food,
        );
        let err = candidate.validate().unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidInput);
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let candidate = Candidate::new(
            date(2024, 1, 5),
            "Coffee",
            dec!(-3.5),
            TransactionType::Expense,
            Category::Food,
        );
        assert_eq!(
            candidate.validate().unwrap_err().error_type(),
            ErrorType::InvalidInput
        );
    }

    #[test]
    fn test_amount_over_limit_rejected() {
        let candidate = Candidate::new(
            date(2024, 1, 5),
            "Windfall",
            dec!(79228162514264337593543950335),
            TransactionType::Income,
            Category::Salary,
        );
        let err = candidate.validate().unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidInput);
        assert!(err.to_string().contains("$1,000,000,000,000.00"));
    }

    #[test]
    fn test_amount_at_limit_accepted() {
        let candidate = Candidate::new(
            date(2024, 1, 5),
            "Windfall",
            Decimal::from(MAX_MAGNITUDE),
            TransactionType::Expense,
            Category::Other,
        );
        assert_eq!(
            candidate.validate().unwrap().amount().value(),
            -Decimal::from(MAX_MAGNITUDE)
        );
    }

    #[test]
    fn test_year_month() {
        let t = Transaction::new(
            Some(date(2024, 2, 1)),
            "Lunch",
            Amount::new(dec!(-50)),
            Category::Food,
            TransactionType::Expense,
        );
        assert_eq!(t.year_month().as_deref(), Some("2024-02"));

        let undated = Transaction::new(
            None,
            "Lunch",
            Amount::new(dec!(-50)),
            Category::Food,
            TransactionType::Expense,
        );
        assert_eq!(undated.year_month(), None);
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!(TransactionType::Income.to_string(), "Income");
        assert_eq!(
            "Expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
    }
}
