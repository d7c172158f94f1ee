pub mod aggregate;
pub mod args;
pub mod commands;
mod config;
pub mod csv_file;
mod error;
pub mod model;
mod store;
mod utils;


pub use config::Config;
pub use error::{Error, OverflowError, Result, StorageError, ValidationError};
pub use store::ExpenseStore;
