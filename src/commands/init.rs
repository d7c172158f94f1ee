use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the expenses home directory, an initial `config.json` with default settings, and an
/// empty expenses file.
///
/// # Errors
/// - Returns an error if the directory is already initialized or if any file operation fails.
pub fn init(expenses_home: &Path) -> Result<Out<()>> {
    let config = Config::create(expenses_home)
        .context("Unable to create the expenses home directory and config")?;
    Ok(format!(
        "Successfully created the expenses home at '{}'",
        config.root().display()
    )
    .into())
}
