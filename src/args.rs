//! These structs provide the CLI interface for the expenses CLI.

use crate::aggregate::CategoryOrder;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for recording personal expenses.
///
/// Expenses are kept in a CSV file inside the expenses home directory. Each one has a category,
/// an amount and a date. Run `expenses init` once, then add expenses and ask for totals or a
/// summary by category.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the expenses home directory, its config file and an empty expenses file.
    ///
    /// By default the home directory is $HOME/expenses. Pass --expenses-home or set
    /// EXPENSES_HOME to keep it somewhere else.
    Init,
    /// Record a new expense.
    Add(AddArgs),
    /// Print every expense in the order it was recorded.
    List,
    /// Print the sum of all expenses.
    Total,
    /// Print the summed amount of each category with a bar chart.
    Summary(SummaryArgs),
    /// Write all expenses to another CSV file.
    Save(PathArgs),
    /// Replace all expenses with the contents of another CSV file.
    ///
    /// The file must have the header row `Category,Amount,Date`. Nothing is replaced unless every
    /// row can be read.
    Load(PathArgs),
    /// Print the configured categories.
    Categories,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the expenses file and configuration are held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, expenses_home: PathBuf) -> Self {
        Self {
            log_level,
            expenses_home: expenses_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The expense category. Defaults to the first category in the config file.
    #[arg(long, short = 'c')]
    category: Option<String>,

    /// The amount spent, e.g. 12.50 or $1,200.00. Must not be negative.
    #[arg(long, short = 'a')]
    amount: String,

    /// The date of the expense in the format YYYY-MM-DD. Defaults to today.
    #[arg(long, short = 'd')]
    date: Option<String>,
}

impl AddArgs {
    pub fn new(category: Option<String>, amount: impl Into<String>, date: Option<String>) -> Self {
        Self {
            category,
            amount: amount.into(),
            date,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// Args for the `expenses summary` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct SummaryArgs {
    /// The order of the categories: "first-seen" or "name"
    #[arg(long, value_enum, default_value_t = CategoryOrder::FirstSeen)]
    order: CategoryOrder,
}

impl SummaryArgs {
    pub fn new(order: CategoryOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> CategoryOrder {
        self.order
    }
}

/// Args for the `expenses save` and `expenses load` commands.
#[derive(Debug, Parser, Clone)]
pub struct PathArgs {
    /// The CSV file to write to or read from.
    path: PathBuf,
}

impl PathArgs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default expenses home directory.",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let args = Args::try_parse_from([
            "expenses",
            "--expenses-home",
            "/tmp/x",
            "add",
            "--category",
            "Food",
            "--amount",
            "12.50",
            "--date",
            "2024-01-15",
        ])
        .unwrap();
        assert_eq!(args.common().expenses_home().path(), Path::new("/tmp/x"));
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.category(), Some("Food"));
                assert_eq!(add.amount(), "12.50");
                assert_eq!(add.date(), Some("2024-01-15"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_defaults() {
        let args = Args::try_parse_from(["expenses", "add", "-a", "3"]).unwrap();
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.category(), None);
                assert_eq!(add.date(), None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_summary_order() {
        let args = Args::try_parse_from(["expenses", "summary", "--order", "name"]).unwrap();
        match args.command() {
            Command::Summary(summary) => assert_eq!(summary.order(), CategoryOrder::Name),
            other => panic!("unexpected command {other:?}"),
        }
        let args = Args::try_parse_from(["expenses", "summary"]).unwrap();
        match args.command() {
            Command::Summary(summary) => assert_eq!(summary.order(), CategoryOrder::FirstSeen),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_log_level() {
        let args = Args::try_parse_from(["expenses", "--log-level", "debug", "list"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_add_requires_amount() {
        assert!(Args::try_parse_from(["expenses", "add", "--category", "Food"]).is_err());
    }
}
