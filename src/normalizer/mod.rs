mod column;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;

use crate::config::{AmountPolicy, ColumnMap};
use crate::expense::Expense;

pub(crate) use column::{resolve_columns, ColumnInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NormalizeError {
    FileNotFoundError(String),
    InvalidFileError(String),
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "spreadsheet reading error: {}",
            match self {
                NormalizeError::FileNotFoundError(s) => s,
                NormalizeError::InvalidFileError(s) => s,
            }
        )
    }
}

impl std::error::Error for NormalizeError {}

/// Result of normalizing a batch of raw rows. Rows that fail validation are
/// counted, never propagated as errors: accepted + dropped == input rows.
#[derive(Debug)]
pub(crate) struct NormalizedBatch {
    pub(crate) records: Vec<Expense>,
    pub(crate) dropped: usize,
}

/// Read a spreadsheet file and normalize every row into an `Expense`.
/// The header row is mandatory; individual bad rows are dropped, not fatal.
pub(crate) fn read_expenses(
    file_path: &Path,
    columns: &ColumnMap,
    policy: AmountPolicy,
) -> Result<NormalizedBatch, NormalizeError> {
    if !file_path.exists() {
        return Err(NormalizeError::FileNotFoundError(format!(
            "File not found: {}",
            file_path.display()
        )));
    }

    info!("Reading expenses from {:?}", file_path);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(file_path)
        .map_err(|e| NormalizeError::InvalidFileError(e.to_string()))?;

    let headers = rdr
        .headers()
        .map_err(|e| NormalizeError::InvalidFileError(e.to_string()))?
        .clone();
    let column_info = resolve_columns(&headers, columns)?;

    let mut rows: Vec<StringRecord> = vec![];
    let mut unreadable = 0usize;
    for record in rdr.records() {
        match record {
            Ok(row) => rows.push(row),
            // A row the csv parser itself rejects counts as dropped
            Err(_) => unreadable += 1,
        }
    }

    let mut batch = normalize_rows(&rows, &column_info, policy);
    batch.dropped += unreadable;
    Ok(batch)
}

/// Coerce raw rows into valid expenses. A row missing a parsable date or a
/// non-empty category is dropped. An unparsable amount follows `policy`.
pub(crate) fn normalize_rows(
    rows: &[StringRecord],
    column_info: &ColumnInfo,
    policy: AmountPolicy,
) -> NormalizedBatch {
    let mut records: Vec<Expense> = vec![];
    let mut dropped = 0usize;

    for row in rows {
        let date = row.get(column_info.date).and_then(parse_date);
        let category = row
            .get(column_info.category)
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let (date, category) = match (date, category) {
            (Some(d), Some(c)) => (d, c),
            _ => {
                dropped += 1;
                continue;
            }
        };

        let amount = match row.get(column_info.amount).and_then(parse_amount) {
            Some(a) => a,
            None => match policy {
                AmountPolicy::ZeroFill => 0.0,
                AmountPolicy::Reject => {
                    dropped += 1;
                    continue;
                }
            },
        };

        records.push(Expense::new(date, category, amount));
    }

    NormalizedBatch { records, dropped }
}

lazy_static! {
    static ref YYYYMMDD: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref YYYYMMDD_T_HHMMSS: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").unwrap();
    static ref DDMMYYYY: Regex = Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap();
    static ref DDMMMYYYY: Regex = Regex::new(r"^\d{1,2} [a-zA-Z]{3} \d{4}$").unwrap();
}

/// Parse a calendar date from the common spellings seen in exported
/// spreadsheets. Returns None instead of failing so callers can drop the row.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if YYYYMMDD.is_match(s) {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    } else if YYYYMMDD_T_HHMMSS.is_match(s) {
        NaiveDateTime::parse_from_str(&s[0..19], "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|dt| dt.date())
    } else if DDMMYYYY.is_match(s) {
        NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
    } else if DDMMMYYYY.is_match(s) {
        NaiveDate::parse_from_str(s, "%d %b %Y").ok()
    } else {
        None
    }
}

/// Parse a non-negative amount from a numeric-like string, tolerating
/// currency symbols, thousands separators and a decimal comma.
pub(crate) fn parse_amount(s: &str) -> Option<f32> {
    let mut cleaned = s.trim().replace("R$", "");
    cleaned = cleaned.replace(['$', ' ', '\u{a0}'], "");

    if let Some(comma) = cleaned.rfind(',') {
        match cleaned.rfind('.') {
            // 1,234.56 style: ',' is the thousands separator
            Some(dot) if dot > comma => cleaned = cleaned.replace(',', ""),
            // 1.234,56 style: ',' is the decimal separator
            Some(_) => cleaned = cleaned.replace('.', "").replace(',', "."),
            // no '.': a trailing ,NN is a decimal comma, anything else thousands
            None => {
                if cleaned.len() - comma <= 3 {
                    cleaned = cleaned.replace(',', ".");
                } else {
                    cleaned = cleaned.replace(',', "");
                }
            }
        }
    }

    match cleaned.parse::<f32>() {
        Ok(v) if v >= 0.0 => Some(v),
        _ => None,
    }
}
