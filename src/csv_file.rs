//! Reading and writing the expenses CSV file.
//!
//! The file always starts with the header `Category,Amount,Date` followed by one row per
//! expense:
//!
//! ```text
//! Category,Amount,Date
//! Food,12.50,2024-01-15
//! Transportation,30,2024-01-16
//! ```
//!
//! The first three header fields must read `Category`, `Amount` and `Date`; further columns are
//! ignored. Saving writes a temporary file next to the destination and renames it into place, so
//! the previous file survives a failed write.

use crate::error::StorageError;
use crate::model::{Expense, DATE_FORMAT};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

/// The header row written at the top of every expenses file.
pub const HEADER: [&str; 3] = ["Category", "Amount", "Date"];

/// The on-disk shape of one row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CsvExpense<'a> {
    category: &'a str,
    amount: String,
    date: String,
}

impl<'a> From<&'a Expense> for CsvExpense<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            category: expense.category(),
            amount: expense.amount().to_string(),
            date: expense.date().format(DATE_FORMAT).to_string(),
        }
    }
}

/// Writes `expenses` to `path`, replacing whatever is there.
///
/// The document is encoded in memory, written to a temporary file in the same directory and then
/// renamed over `path`. Either the old file or the complete new one is on disk afterwards.
///
/// # Errors
/// - `StorageError::Io` if the destination cannot be written (permissions, missing directory,
///   full disk).
pub fn save(expenses: &[Expense], path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let mut buf = Vec::new();
    write_expenses(&mut buf, expenses, &origin)?;
    replace_file(path, |file| file.write_all(&buf)).map_err(|source| StorageError::Io {
        action: "write",
        origin,
        source,
    })?;
    debug!("Wrote {} expenses to {}", expenses.len(), path.display());
    Ok(())
}

/// Runs `write` against a new temporary file beside `path`, flushes it to disk and renames it to
/// `path`. The temporary file is removed if any step fails.
fn replace_file<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Reads every expense from `path`. Nothing is returned unless every row parses.
///
/// # Errors
/// - `StorageError::Io` if the file cannot be opened or read.
/// - `StorageError::Format` for a missing header or a malformed row. The error names the line.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Expense>, StorageError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|source| StorageError::Io {
        action: "open",
        origin: origin.clone(),
        source,
    })?;
    let expenses = read_expenses(io::BufReader::new(file), &origin)?;
    debug!("Read {} expenses from {}", expenses.len(), path.display());
    Ok(expenses)
}

/// Encodes `expenses` as CSV into `writer`. `origin` names the destination in error messages.
pub fn write_expenses<W: io::Write>(
    writer: W,
    expenses: &[Expense],
    origin: &str,
) -> Result<(), StorageError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)
        .map_err(|e| csv_error(origin, e))?;
    for expense in expenses {
        wtr.serialize(CsvExpense::from(expense))
            .map_err(|e| csv_error(origin, e))?;
    }
    wtr.flush().map_err(|source| StorageError::Io {
        action: "write",
        origin: origin.to_string(),
        source,
    })
}

/// Decodes CSV from `reader`. The first record must be the header row. Each remaining record
/// needs at least three fields; anything after the third is ignored. `origin` names the source in
/// error messages.
pub fn read_expenses<R: io::Read>(reader: R, origin: &str) -> Result<Vec<Expense>, StorageError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = rdr.records();
    match records.next() {
        Some(header) => {
            let header = header.map_err(|e| csv_error(origin, e))?;
            check_header(&header, origin)?;
            trace!("Skipping header row {:?}", header);
        }
        None => {
            return Err(StorageError::Format {
                origin: origin.to_string(),
                line: 1,
                reason: "the header row is missing".to_string(),
            })
        }
    }

    let mut expenses = Vec::new();
    for result in records {
        let record = result.map_err(|e| csv_error(origin, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let format_error = |reason: String| StorageError::Format {
            origin: origin.to_string(),
            line,
            reason,
        };

        if record.len() < HEADER.len() {
            return Err(format_error(format!(
                "expected {} fields ({}) but found {}",
                HEADER.len(),
                HEADER.join(","),
                record.len()
            )));
        }
        if record.len() > HEADER.len() {
            debug!(
                "Ignoring {} extra fields at line {line} of {origin}",
                record.len() - HEADER.len()
            );
        }

        let expense = Expense::parse(&record[0], &record[1], &record[2])
            .map_err(|e| format_error(e.to_string()))?;
        expenses.push(expense);
    }
    Ok(expenses)
}

/// The first field may carry a UTF-8 byte order mark from spreadsheet exports.
fn check_header(header: &csv::StringRecord, origin: &str) -> Result<(), StorageError> {
    let mut fields = header.iter();
    let first = fields.next().map(|f| f.trim_start_matches('\u{feff}'));
    let matches = header.len() >= HEADER.len()
        && std::iter::once(first)
            .chain(fields.map(Some))
            .zip(HEADER)
            .all(|(found, expected)| found == Some(expected));
    if matches {
        return Ok(());
    }
    Err(StorageError::Format {
        origin: origin.to_string(),
        line: 1,
        reason: format!(
            "expected the header row {} but found '{}'",
            HEADER.join(","),
            header.iter().collect::<Vec<_>>().join(",")
        ),
    })
}

fn csv_error(origin: &str, e: csv::Error) -> StorageError {
    let line = e.position().map(|p| p.line()).unwrap_or_default();
    let reason = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(source) => StorageError::Io {
            action: "access",
            origin: origin.to_string(),
            source,
        },
        _ => StorageError::Format {
            origin: origin.to_string(),
            line,
            reason,
        },
    }
}
