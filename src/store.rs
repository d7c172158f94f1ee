//! The in-memory record store.

use crate::aggregate::{self, CategoryOrder, CategoryTotal};
use crate::csv_file;
use crate::error::{OverflowError, StorageError, ValidationError};
use crate::model::Expense;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::debug;

/// An ordered collection of expenses. Insertion order is display order. Records are never edited
/// in place; the whole sequence can only be swapped out with [`ExpenseStore::replace`], which a
/// successful [`ExpenseStore::load`] does.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `expense` to the end of the sequence.
    pub fn append(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Validates the raw input and appends the resulting expense. The store is unchanged when
    /// validation fails.
    pub fn add_expense(
        &mut self,
        category: &str,
        amount: &str,
        date: &str,
    ) -> Result<&Expense, ValidationError> {
        let expense = Expense::parse(category, amount, date)?;
        debug!("Adding expense {expense}");
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// The current expenses in insertion order.
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    /// Substitutes the entire sequence.
    pub fn replace(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total(&self) -> Result<Decimal, OverflowError> {
        aggregate::total(self.all())
    }

    pub fn category_totals(
        &self,
        order: CategoryOrder,
    ) -> Result<Vec<CategoryTotal>, OverflowError> {
        aggregate::category_totals(self.all(), order)
    }

    /// Writes every expense to `path` as CSV.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        csv_file::save(self.all(), path)
    }

    /// Reads `path` completely and, only if every row parses, replaces the contents of the store
    /// with it. Returns the number of expenses now held.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize, StorageError> {
        let expenses = csv_file::load(path)?;
        self.replace(expenses);
        Ok(self.len())
    }
}

impl From<Vec<Expense>> for ExpenseStore {
    fn from(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[test]
    fn test_append_then_all() {
        let mut store = ExpenseStore::new();
        let first = Expense::parse("Food", "12.50", "2024-01-15").unwrap();
        let second = Expense::parse("Utilities", "80", "2024-01-20").unwrap();
        store.append(first.clone());
        assert_eq!(store.all().last(), Some(&first));
        store.append(second.clone());
        assert_eq!(store.all().last(), Some(&second));
        assert_eq!(store.all(), &[first, second]);
    }

    #[test]
    fn test_append_does_not_dedupe() {
        let mut store = ExpenseStore::new();
        let e = Expense::parse("Food", "1", "2024-01-15").unwrap();
        store.append(e.clone());
        store.append(e);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_expense_invalid_amount_leaves_store_unchanged() {
        let mut store = ExpenseStore::new();
        store.add_expense("Food", "12.50", "2024-01-15").unwrap();
        let before = store.clone();

        let err = store.add_expense("Food", "abc", "2024-01-16").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn test_add_expense_invalid_date_leaves_store_unchanged() {
        let mut store = ExpenseStore::new();
        store.add_expense("Food", "12.50", "2024-01-15").unwrap();
        let before = store.clone();

        let err = store.add_expense("Food", "3", "15-01-2024").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn test_total() {
        let mut store = ExpenseStore::new();
        assert_eq!(store.total().unwrap(), Decimal::ZERO);
        store.add_expense("Food", "12.50", "2024-01-15").unwrap();
        store.add_expense("Transportation", "30.00", "2024-01-16").unwrap();
        assert_eq!(store.total().unwrap(), Decimal::from_str("42.50").unwrap());
    }

    #[test]
    fn test_save_load_scenario() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");

        let mut store = ExpenseStore::new();
        store.add_expense("Food", "12.50", "2024-01-15").unwrap();
        store
            .add_expense("Transportation", "30.00", "2024-01-16")
            .unwrap();
        assert_eq!(store.total().unwrap(), Decimal::from_str("42.50").unwrap());
        store.save(&path).unwrap();

        let mut fresh = ExpenseStore::new();
        assert_eq!(fresh.load(&path).unwrap(), 2);
        assert_eq!(fresh.all(), store.all());
        assert_eq!(fresh.all()[0].category(), "Food");
        assert_eq!(fresh.all()[1].category(), "Transportation");
    }

    #[test]
    fn test_load_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        std::fs::write(&path, "Category,Amount,Date\nUtilities,80,2024-02-01\n").unwrap();

        let mut store = ExpenseStore::new();
        store.add_expense("Food", "12.50", "2024-01-15").unwrap();
        store.load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].category(), "Utilities");
    }

    #[test]
    fn test_failed_load_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "Category,Amount,Date\nFood,5,2024-01-01\nFood,not-a-number,2024-01-02\n",
        )
        .unwrap();

        let mut store = ExpenseStore::new();
        store.add_expense("Entertainment", "15", "2024-01-10").unwrap();
        let before = store.clone();

        let err = store.load(&path).unwrap_err();
        assert!(matches!(err, StorageError::Format { line: 3, .. }));
        assert_eq!(store, before);

        let err = store.load(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(store, before);
    }
}
