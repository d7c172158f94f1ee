use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::{Expense, DATE_FORMAT};
use crate::{Config, Result};
use chrono::Local;
use tracing::warn;

/// Validates and records a new expense, then writes the expenses file.
///
/// When no category is given the first configured category is used, and when no date is given
/// today's date is used.
///
/// # Errors
/// - Returns an error if the amount or date is invalid. The expenses file is not touched.
/// - Returns an error if the expenses file cannot be read or written.
pub fn add(config: Config, args: AddArgs) -> Result<Out<Expense>> {
    let mut store = config.open_store()?;

    let category = args.category().unwrap_or_else(|| config.default_category());
    let date = match args.date() {
        Some(date) => date.to_string(),
        None => today(),
    };

    let expense = store.add_expense(category, args.amount(), &date)?.clone();
    if !config.is_known_category(expense.category()) {
        warn!(
            "'{}' is not one of the configured categories: {}",
            expense.category(),
            config.categories().join(", ")
        );
    }

    config.save_store(&store)?;
    Ok(Out::new(format!("Added {expense}"), expense))
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}
