//! Read-only commands: list, total, summary and categories.

use crate::aggregate::{CategoryOrder, CategoryTotal};
use crate::args::SummaryArgs;
use crate::commands::Out;
use crate::model::{Amount, Expense};
use crate::{Config, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// The widest bar drawn by `summary`, in characters.
const BAR_WIDTH: u32 = 40;

/// Lists every expense in insertion order, one per line, e.g. `Food: $12.50 (2024-01-15)`.
pub fn list(config: Config) -> Result<Out<Vec<Expense>>> {
    let store = config.open_store()?;
    if store.is_empty() {
        return Ok(Out::new("No expenses recorded", Vec::new()));
    }
    let lines: Vec<String> = store.all().iter().map(|e| e.to_string()).collect();
    Ok(Out::new(lines.join("\n"), store.all().to_vec()))
}

/// Sums every expense, e.g. `Total Expenses: $42.50`.
pub fn total(config: Config) -> Result<Out<Amount>> {
    let store = config.open_store()?;
    let total = Amount::new(store.total()?);
    Ok(Out::new(
        format!("Total Expenses: {}", total.dollars()),
        total,
    ))
}

/// The structured output of `summary`.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    order: CategoryOrder,
    categories: Vec<CategoryTotal>,
    total: Amount,
}

impl Summary {
    pub fn categories(&self) -> &[CategoryTotal] {
        &self.categories
    }

    pub fn total(&self) -> Amount {
        self.total
    }
}

/// Sums the expenses of each category and renders them as a text bar chart.
pub fn summary(config: Config, args: SummaryArgs) -> Result<Out<Summary>> {
    let store = config.open_store()?;
    let summary = Summary {
        order: args.order(),
        categories: store.category_totals(args.order())?,
        total: Amount::new(store.total()?),
    };
    if summary.categories.is_empty() {
        return Ok(Out::new("No expenses recorded", summary));
    }
    let message = render_chart(&summary.categories);
    Ok(Out::new(message, summary))
}

/// Prints the categories from the config file. The first one is the default for `add`.
pub fn categories(config: Config) -> Result<Out<Vec<String>>> {
    let categories = config.categories().to_vec();
    let message = categories
        .iter()
        .enumerate()
        .map(|(ix, c)| if ix == 0 { format!("{c} (default)") } else { c.clone() })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, categories))
}

fn render_chart(totals: &[CategoryTotal]) -> String {
    let name_width = totals.iter().map(|t| t.category().chars().count()).max().unwrap_or(0);
    let dollars: Vec<String> = totals.iter().map(|t| t.total().dollars()).collect();
    let amount_width = dollars.iter().map(String::len).max().unwrap_or(0);
    let max = totals
        .iter()
        .map(|t| t.total().value())
        .max()
        .unwrap_or(Decimal::ZERO);

    totals
        .iter()
        .zip(dollars)
        .map(|(t, amount)| {
            let bar = "#".repeat(bar_len(t.total().value(), max));
            format!(
                "{:<name_width$}  {:>amount_width$}  {bar}",
                t.category(),
                amount
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scales `value` against `max` onto `BAR_WIDTH` characters.
fn bar_len(value: Decimal, max: Decimal) -> usize {
    if max <= Decimal::ZERO {
        return 0;
    }
    value
        .checked_div(max)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(BAR_WIDTH)))
        .and_then(|len| len.round().to_usize())
        .unwrap_or(0)
}
