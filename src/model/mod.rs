//! Types that represent the core data model: `Expense` and the `Amount` it carries.
mod amount;
mod expense;

pub use amount::{Amount, AmountError};
pub use expense::{Expense, DATE_FORMAT, MAX_AMOUNT};
