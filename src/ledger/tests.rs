use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::ledger::{read_transactions, LedgerError, MonthId};

#[test]
fn test_read_transactions() {
    let transactions = read_transactions(&fixture_filename("ledger.csv")).unwrap();
    assert_eq!(transactions.len(), 4);

    let coffee = &transactions[0];
    assert_eq!(coffee.date, NaiveDate::from_ymd_opt(2021, 1, 15).unwrap());
    assert_eq!(coffee.name, "Coffee");
    assert_eq!(coffee.subcategory, "Food");
    assert_eq!(coffee.category, "Dining");
    assert_eq!(coffee.amount, 4.5);
}

#[test]
fn test_uncategorized_rows_are_dropped() {
    let transactions = read_transactions(&fixture_filename("ledger.csv")).unwrap();
    assert!(transactions.iter().all(|t| t.category != "Uncategorized"));
}

#[test]
fn test_missing_file() {
    let result = read_transactions(Path::new("no-such-ledger.csv"));
    match result {
        Err(LedgerError::FileNotFound(_)) => {}
        other => panic!("Unexpected results: {:?}", other),
    }
}

#[test]
fn test_bad_date_is_fatal() {
    let result = read_transactions(&fixture_filename("bad_date.csv"));
    match result {
        Err(LedgerError::InvalidRecord { line: 2, .. }) => {}
        other => panic!("Unexpected results: {:?}", other),
    }
}

#[test]
fn test_bad_amount_is_fatal() {
    let result = read_transactions(&fixture_filename("bad_amount.csv"));
    match result {
        Err(LedgerError::InvalidRecord { line: 1, .. }) => {}
        other => panic!("Unexpected results: {:?}", other),
    }
}

#[test]
fn test_wrong_field_count_is_fatal() {
    let result = read_transactions(&fixture_filename("short_row.csv"));
    match result {
        Err(LedgerError::InvalidRecord { line: 1, .. }) => {}
        other => panic!("Unexpected results: {:?}", other),
    }
}

#[test]
fn test_month_id_ignores_day() {
    let transactions = read_transactions(&fixture_filename("ledger.csv")).unwrap();
    // Coffee on the 15th and Snack on the 20th share a month
    assert_eq!(transactions[0].month_id(), transactions[2].month_id());
    assert_eq!(transactions[0].month_id().to_string(), "Jan-2021");
}

#[test]
fn test_month_id_orders_by_year_then_month() {
    let dec_2020 = MonthId { year: 2020, month: 12 };
    let jan_2021 = MonthId { year: 2021, month: 1 };
    assert!(dec_2020 < jan_2021);
    assert_eq!(dec_2020.ordinal(), 202012);
    assert_eq!(jan_2021.ordinal(), 202101);
}

/// Return the path to a file within the test data directory
pub(crate) fn fixture_filename(filename: &str) -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("fixture");
    dir.push(filename);
    dir
}
