use crate::commands::Out;
use crate::store::ExpenseStore;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;
use tracing::debug;

/// Writes every recorded expense to `path`.
///
/// # Errors
/// - Returns an error if the expenses file cannot be read or `path` cannot be written.
pub fn save(config: Config, path: &Path) -> Result<Out<usize>> {
    let store = config.open_store()?;
    store
        .save(path)
        .with_context(|| format!("An error occurred while saving expenses to '{}'", path.display()))?;
    Ok(Out::new(
        format!("Saved {} expenses to '{}'", store.len(), path.display()),
        store.len(),
    ))
}

/// Reads `path` and, if every row is valid, makes its contents the recorded expenses.
///
/// # Errors
/// - Returns an error if `path` cannot be read or contains a malformed row. The expenses file is
///   left as it was.
/// - Returns an error if the expenses file cannot be written.
pub fn load(config: Config, path: &Path) -> Result<Out<usize>> {
    let mut store = ExpenseStore::new();
    let count = store.load(path).with_context(|| {
        format!("An error occurred while loading expenses from '{}'", path.display())
    })?;
    debug!(
        "Replacing the contents of '{}' with {count} expenses",
        config.data_path().display()
    );
    config.save_store(&store)?;
    Ok(Out::new(
        format!("Loaded {count} expenses from '{}'", path.display()),
        count,
    ))
}
