//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json` and names the CSV file that
//! holds the expenses along with the list of categories offered when adding one.

use crate::store::ExpenseStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const EXPENSES_CSV: &str = "expenses.csv";
const DEFAULT_CATEGORIES: [&str; 4] = ["Food", "Transportation", "Entertainment", "Utilities"];

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`. It provides
/// the path of the expenses data file and the configured categories.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_path: PathBuf,
}

impl Config {
    /// Creates the home directory and:
    /// - Creates an initial `config.json` file with default settings
    /// - Creates an empty expenses file (header row only) unless one is already there
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or if any file operation fails.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the expenses home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "The expenses home is already initialized, '{}' exists",
                config_path.display()
            )
        }

        let config_file = ConfigFile::default();
        config_file.save(&config_path)?;

        let config = Self {
            data_path: resolve(&root, config_file.data_file()),
            root,
            config_path,
            config_file,
        };

        if config.data_path.is_file() {
            info!(
                "Keeping the existing expenses file '{}'",
                config.data_path.display()
            );
        } else {
            ExpenseStore::new()
                .save(&config.data_path)
                .context("Unable to create the expenses file")?;
        }
        Ok(config)
    }

    /// This will
    /// - validate that the `expenses_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub fn load(expenses_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = expenses_home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The expenses home directory is missing '{}', run 'expenses init' first",
                maybe_relative.display()
            )
        }
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'expenses init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;

        Ok(Self {
            data_path: resolve(&root, config_file.data_file()),
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The CSV file the expenses live in.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn categories(&self) -> &[String] {
        &self.config_file.categories
    }

    /// The category used when none is given: the first configured one.
    pub fn default_category(&self) -> &str {
        self.config_file
            .categories
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORIES[0])
    }

    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories().iter().any(|c| c == category)
    }

    /// Reads the expenses file into a new store. A missing file is treated as an empty store.
    pub fn open_store(&self) -> Result<ExpenseStore> {
        let mut store = ExpenseStore::new();
        if !self.data_path.exists() {
            debug!(
                "No expenses file at '{}', starting empty",
                self.data_path.display()
            );
            return Ok(store);
        }
        store
            .load(&self.data_path)
            .context("Unable to read the expenses file")?;
        Ok(store)
    }

    /// Writes `store` to the expenses file.
    pub fn save_store(&self, store: &ExpenseStore) -> Result<()> {
        store
            .save(&self.data_path)
            .context("Unable to write the expenses file")
    }
}

/// Returns `p` unchanged if it is absolute, otherwise joins it onto `root`.
fn resolve(root: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "data_file": "expenses.csv",
///   "categories": ["Food", "Transportation", "Entertainment", "Utilities"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the expenses CSV file, relative to the home directory or absolute
    #[serde(default = "default_data_file")]
    data_file: PathBuf,

    /// Categories offered when adding an expense. The first one is the default.
    #[serde(default = "default_categories")]
    categories: Vec<String>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(EXPENSES_CSV)
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file: default_data_file(),
            categories: default_categories(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config file version {} is newer than this program supports ({})",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data).context("Unable to write config file")
    }

    fn data_file(&self) -> &Path {
        &self.data_file
    }
}
