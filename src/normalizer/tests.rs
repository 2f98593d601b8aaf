use std::path::PathBuf;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::config::{AmountPolicy, ColumnMap};
use crate::normalizer::{
    normalize_rows, parse_amount, parse_date, read_expenses, resolve_columns, ColumnInfo,
    NormalizeError,
};

#[test]
fn test_resolve_columns_from_common_headers() {
    let headers = StringRecord::from(vec!["Data", "Categoria", "Valor"]);
    let info = resolve_columns(&headers, &ColumnMap::default()).unwrap();
    assert_eq!(info, ColumnInfo { date: 0, category: 1, amount: 2 });
}

#[test]
fn test_resolve_columns_with_explicit_mapping() {
    let headers = StringRecord::from(vec!["Quando", "O Que", "Quanto Custou"]);

    // Without a mapping these headers are unrecognizable
    assert!(resolve_columns(&headers, &ColumnMap::default()).is_err());

    let map = ColumnMap {
        date: Some("Quando".to_string()),
        category: Some("O Que".to_string()),
        amount: Some("Quanto Custou".to_string()),
    };
    let info = resolve_columns(&headers, &map).unwrap();
    assert_eq!(info, ColumnInfo { date: 0, category: 1, amount: 2 });
}

#[test]
fn test_resolve_columns_missing_amount() {
    let headers = StringRecord::from(vec!["date", "category"]);
    match resolve_columns(&headers, &ColumnMap::default()) {
        Err(NormalizeError::InvalidFileError(msg)) => assert!(msg.contains("amount")),
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[test]
fn test_parse_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
    assert_eq!(parse_date("2025-02-10"), Some(expected));
    assert_eq!(parse_date("10/02/2025"), Some(expected));
    assert_eq!(parse_date("2025-02-10T09:30:00"), Some(expected));
    assert_eq!(parse_date("10 Feb 2025"), Some(expected));
    assert_eq!(parse_date("yesterday"), None);
    assert_eq!(parse_date(""), None);
}

#[test]
fn test_parse_amount_currency_strings() {
    assert_eq!(parse_amount("500.00"), Some(500.0));
    assert_eq!(parse_amount("R$ 500,00"), Some(500.0));
    assert_eq!(parse_amount("$1,234.56"), Some(1234.56));
    assert_eq!(parse_amount("1.234,56"), Some(1234.56));
    assert_eq!(parse_amount("50"), Some(50.0));
    assert_eq!(parse_amount("-10.00"), None);
    assert_eq!(parse_amount("fifty"), None);
}

#[test]
fn test_normalize_drops_rows_missing_required_fields() {
    let info = ColumnInfo { date: 0, category: 1, amount: 2 };
    let rows = vec![
        StringRecord::from(vec!["2025-01-15", "Alimentação", "500.00"]),
        StringRecord::from(vec!["not-a-date", "Lazer", "300.00"]),
        StringRecord::from(vec!["2025-03-05", "", "450.00"]),
    ];

    let batch = normalize_rows(&rows, &info, AmountPolicy::ZeroFill);
    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.dropped, 2);
    assert_eq!(batch.records.len() + batch.dropped, rows.len());
    assert_eq!(batch.records[0].category, "Alimentação");
}

#[test]
fn test_unparsable_amount_zero_fill_policy() {
    let info = ColumnInfo { date: 0, category: 1, amount: 2 };
    let rows = vec![StringRecord::from(vec!["2025-03-05", "Steam", "fifty"])];

    // Default policy keeps the row with amount 0.0
    let batch = normalize_rows(&rows, &info, AmountPolicy::ZeroFill);
    assert_eq!(batch.dropped, 0);
    assert_eq!(batch.records[0].amount, 0.0);

    // Strict policy drops it
    let batch = normalize_rows(&rows, &info, AmountPolicy::Reject);
    assert_eq!(batch.dropped, 1);
    assert!(batch.records.is_empty());
}

#[test]
fn test_read_expenses_canonical_file() {
    let batch = read_expenses(
        &fixture_filename("canonical.csv"),
        &ColumnMap::default(),
        AmountPolicy::ZeroFill,
    )
    .unwrap();

    assert_eq!(batch.records.len(), 3);
    assert_eq!(batch.dropped, 0);
    assert_eq!(batch.records[2].amount, 1200.0);
}

#[test]
fn test_read_expenses_messy_file() {
    let batch = read_expenses(
        &fixture_filename("messy.csv"),
        &ColumnMap::default(),
        AmountPolicy::ZeroFill,
    )
    .unwrap();

    // bad date and empty category rows dropped, bad amount zero-filled
    assert_eq!(batch.records.len(), 3);
    assert_eq!(batch.dropped, 2);
    assert_eq!(batch.records[0].amount, 500.0);
    assert_eq!(batch.records[1].date, NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
    assert_eq!(batch.records[2].amount, 0.0);
}

#[test]
fn test_read_expenses_mapped_file() {
    let map = ColumnMap {
        date: Some("Quando".to_string()),
        category: Some("O Que".to_string()),
        amount: Some("Quanto Custou".to_string()),
    };
    let batch = read_expenses(&fixture_filename("mapped.csv"), &map, AmountPolicy::ZeroFill).unwrap();

    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[1].date, NaiveDate::from_ymd_opt(2025, 2, 5).unwrap());
    assert_eq!(batch.records[1].amount, 1200.0);
}

#[test]
fn test_read_expenses_missing_file() {
    let result = read_expenses(
        &fixture_filename("does-not-exist.csv"),
        &ColumnMap::default(),
        AmountPolicy::ZeroFill,
    );
    assert!(matches!(result, Err(NormalizeError::FileNotFoundError(_))));
}

#[test]
fn test_read_expenses_no_amount_column() {
    let result = read_expenses(
        &fixture_filename("no_amount.csv"),
        &ColumnMap::default(),
        AmountPolicy::ZeroFill,
    );
    assert!(matches!(result, Err(NormalizeError::InvalidFileError(_))));
}

/// Return the path to a file within the test data directory
pub(crate) fn fixture_filename(filename: &str) -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("fixture");
    dir.push(filename);
    dir
}
