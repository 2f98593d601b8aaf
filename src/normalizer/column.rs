use csv::StringRecord;
use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ColumnMap;
use crate::normalizer::NormalizeError;

/// Contains the column index of each canonical field in a source spreadsheet.
/// Resolved once per import. The column number uses 0-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnInfo {
    pub(crate) date: usize,
    pub(crate) category: usize,
    pub(crate) amount: usize,
}

lazy_static! {
    static ref DATE_HEADER: Regex = Regex::new(r"(?i)date|data|time").unwrap();
    static ref CATEGORY_HEADER: Regex = Regex::new(r"(?i)categor|item|descri").unwrap();
    static ref AMOUNT_HEADER: Regex = Regex::new(r"(?i)amount|valor|value|total|price").unwrap();
}

/// Locate the date, category and amount columns in a header row.
/// An explicit mapping from the config file wins; otherwise fall back to
/// matching the common header spellings.
pub(crate) fn resolve_columns(
    headers: &StringRecord,
    map: &ColumnMap,
) -> Result<ColumnInfo, NormalizeError> {
    let date = resolve_field(headers, map.date.as_deref(), &DATE_HEADER, "date")?;
    let category = resolve_field(headers, map.category.as_deref(), &CATEGORY_HEADER, "category")?;
    let amount = resolve_field(headers, map.amount.as_deref(), &AMOUNT_HEADER, "amount")?;

    Ok(ColumnInfo { date, category, amount })
}

fn resolve_field(
    headers: &StringRecord,
    mapped_name: Option<&str>,
    pattern: &Regex,
    field: &str,
) -> Result<usize, NormalizeError> {
    if let Some(name) = mapped_name {
        for (i, s) in headers.iter().enumerate() {
            if s.trim().eq_ignore_ascii_case(name.trim()) {
                return Ok(i);
            }
        }
        return Err(NormalizeError::InvalidFileError(format!(
            "Mapped column '{}' for field '{}' not found in header",
            name, field
        )));
    }

    for (i, s) in headers.iter().enumerate() {
        if pattern.is_match(s) {
            return Ok(i);
        }
    }

    Err(NormalizeError::InvalidFileError(format!(
        "Unable to locate '{}' column",
        field
    )))
}
