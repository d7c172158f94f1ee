//! Summaries computed over a slice of expenses. Nothing in here reorders or mutates its input.

use crate::error::OverflowError;
use crate::model::{Amount, Expense};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Controls the order in which [`category_totals`] returns its entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryOrder {
    /// Categories appear in the order they were first recorded.
    #[default]
    FirstSeen,
    /// Categories are sorted by name.
    Name,
}

serde_plain::derive_display_from_serialize!(CategoryOrder);
serde_plain::derive_fromstr_from_deserialize!(CategoryOrder);

/// The summed amount of every expense recorded under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryTotal {
    category: String,
    total: Amount,
    count: usize,
}

impl CategoryTotal {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// How many expenses went into `total`.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Returns the sum of every amount in `expenses`, or zero when there are none.
pub fn total(expenses: &[Expense]) -> Result<Decimal, OverflowError> {
    expenses
        .iter()
        .try_fold(Amount::ZERO, |sum, e| sum.checked_add(e.amount()))
        .map(|a| a.value())
        .ok_or(OverflowError)
}

/// Groups `expenses` by category and sums each group. This is the data behind the category bar
/// chart.
pub fn category_totals(
    expenses: &[Expense],
    order: CategoryOrder,
) -> Result<Vec<CategoryTotal>, OverflowError> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        let existing = index.get(expense.category()).copied();
        match existing {
            Some(ix) => {
                let entry = &mut totals[ix];
                entry.total = entry
                    .total
                    .checked_add(expense.amount())
                    .ok_or(OverflowError)?;
                entry.count += 1;
            }
            None => {
                index.insert(expense.category(), totals.len());
                totals.push(CategoryTotal {
                    category: expense.category().to_string(),
                    total: expense.amount(),
                    count: 1,
                });
            }
        }
    }

    if order == CategoryOrder::Name {
        totals.sort_by(|a, b| a.category.cmp(&b.category));
    }
    Ok(totals)
}
