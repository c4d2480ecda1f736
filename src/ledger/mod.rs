use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::StringRecord;
use log::info;

#[cfg(test)]
pub(crate) mod tests;

/// Category value marking a row the upstream export could not classify.
static UNCATEGORIZED: &str = "Uncategorized";

static DATE_FORMAT: &str = "%m-%d-%Y";

/// One parsed ledger entry
#[derive(Debug, Clone)]
pub(crate) struct Transaction {
    pub(crate) date: NaiveDate,
    pub(crate) name: String,
    pub(crate) subcategory: String,
    pub(crate) category: String,
    pub(crate) amount: f32,
}

impl Transaction {
    /// Grouping key for the calendar month this transaction falls in. Two
    /// transactions in the same month compare equal regardless of day.
    pub(crate) fn month_id(&self) -> MonthId {
        MonthId {
            year: self.date.year(),
            month: self.date.month(),
        }
    }
}

static MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A (year, month) pair. Sorts numerically, displays as `Mon-YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct MonthId {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl MonthId {
    /// Absolute ordinal, e.g. 202101 for Jan 2021. Orders by year then month.
    pub(crate) fn ordinal(&self) -> i32 {
        self.year * 100 + self.month as i32
    }
}

impl Ord for MonthId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for MonthId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // chrono guarantees month is within 1..=12
        write!(f, "{}-{}", MONTH_NAMES[self.month as usize - 1], self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    FileNotFound(String),
    InvalidRecord { line: usize, reason: String },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerError::FileNotFound(s) => write!(f, "ledger reading error: file not found: {}", s),
            LedgerError::InvalidRecord { line, reason } => {
                write!(f, "ledger reading error: line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for LedgerError {}

/// Read every transaction from a comma-separated ledger file. Rows whose
/// category is `Uncategorized` are dropped; any other malformed row aborts
/// the whole read.
pub(crate) fn read_transactions(file_path: &Path) -> Result<Vec<Transaction>, LedgerError> {
    if !file_path.exists() {
        return Err(LedgerError::FileNotFound(file_path.display().to_string()));
    }

    info!("Reading ledger from {:?}", file_path);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(file_path)
        .map_err(|e| LedgerError::InvalidRecord { line: 0, reason: format!("unable to open: {}", e) })?;

    let mut transactions: Vec<Transaction> = vec![];
    let mut skipped = 0;
    for (i, record) in rdr.records().enumerate() {
        let line = i + 1;
        let row = record.map_err(|e| LedgerError::InvalidRecord { line, reason: e.to_string() })?;
        match parse_record(&row, line)? {
            Some(t) => transactions.push(t),
            None => skipped += 1,
        }
    }

    info!("Parsed {} transaction(s), skipped {} uncategorized", transactions.len(), skipped);
    Ok(transactions)
}

/// Parse one `date,name,subcategory,category,amount` row. Returns `None` for
/// uncategorized rows; the category check runs before date and amount parsing
/// so a malformed uncategorized row is still just skipped.
fn parse_record(row: &StringRecord, line: usize) -> Result<Option<Transaction>, LedgerError> {
    if row.len() != 5 {
        return Err(LedgerError::InvalidRecord {
            line,
            reason: format!("expected 5 fields, found {}", row.len()),
        });
    }

    let category = row.index(3);
    if category == UNCATEGORIZED {
        return Ok(None);
    }

    Ok(Some(Transaction {
        date: parse_date(row.index(0), line)?,
        name: row.index(1).to_string(),
        subcategory: row.index(2).to_string(),
        category: category.to_string(),
        amount: parse_amount(row.index(4), line)?,
    }))
}

fn parse_date(s: &str, line: usize) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| LedgerError::InvalidRecord {
        line,
        reason: format!("bad date '{}': {}", s, e),
    })
}

/// Strip a single leading currency symbol, then parse as a decimal number.
/// No thousands-separator handling.
fn parse_amount(s: &str, line: usize) -> Result<f32, LedgerError> {
    let digits = s.strip_prefix('$').unwrap_or(s);
    digits.trim().parse::<f32>().map_err(|_| LedgerError::InvalidRecord {
        line,
        reason: format!("bad amount '{}'", s),
    })
}
