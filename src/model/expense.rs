use crate::error::ValidationError;
use crate::model::Amount;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The textual pattern every expense date is written in.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The largest amount a single expense may have, one trillion. Keeping single amounts far below
/// `Decimal::MAX` leaves room to sum billions of them.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// One logged expense. Records are immutable once created; the only ways to get one are
/// [`Expense::new`] with already-typed values or [`Expense::parse`] with raw user input.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    category: String,
    amount: Amount,
    date: NaiveDate,
}

impl Expense {
    pub fn new(category: impl Into<String>, amount: Amount, date: NaiveDate) -> Self {
        Self {
            category: category.into(),
            amount,
            date,
        }
    }

    /// Validates raw strings and builds an `Expense` from them.
    ///
    /// # Errors
    /// - `InvalidCategory` if `category` is blank
    /// - `InvalidAmount` if `amount` is not a number, is negative or exceeds [`MAX_AMOUNT`]
    /// - `InvalidDate` if `date` is not a real date written as `YYYY-MM-DD`
    pub fn parse(category: &str, amount: &str, date: &str) -> Result<Self, ValidationError> {
        let category = parse_category(category)?;
        let amount = parse_amount(amount)?;
        let date = parse_date(date)?;
        Ok(Self {
            category,
            amount,
            date,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Renders the way the expense list shows a record, e.g. `Food: $12.50 (2024-01-15)`.
impl Display for Expense {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.category,
            self.amount.dollars(),
            self.date.format(DATE_FORMAT)
        )
    }
}

fn parse_category(s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidCategory);
    }
    Ok(trimmed.to_string())
}

fn parse_amount(s: &str) -> Result<Amount, ValidationError> {
    let amount = Amount::from_str(s).map_err(|e| ValidationError::InvalidAmount {
        value: s.to_string(),
        reason: e.to_string(),
    })?;
    if amount.is_negative() {
        return Err(ValidationError::InvalidAmount {
            value: s.to_string(),
            reason: "an expense amount cannot be negative".to_string(),
        });
    }
    if amount.value() > MAX_AMOUNT {
        return Err(ValidationError::InvalidAmount {
            value: s.to_string(),
            reason: format!(
                "an expense amount cannot exceed {}",
                Amount::new(MAX_AMOUNT).dollars()
            ),
        });
    }
    Ok(amount)
}

/// Accepts exactly `YYYY-MM-DD`. `NaiveDate::parse_from_str` alone would also take unpadded
/// fields like `2024-1-5`, so the shape is checked first.
fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        value: s.to_string(),
    };
    let trimmed = s.trim();
    let bytes = trimmed.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(ix, b)| match ix {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}
