use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One expense entry. A value of this type only exists after all three
/// fields have parsed successfully. Loading always goes through the
/// normalizer, so only serialization is serde-derived.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct Expense {
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
    pub(crate) amount: f32,
}

impl Expense {
    pub(crate) fn new(date: NaiveDate, category: &str, amount: f32) -> Expense {
        Expense {
            date,
            category: category.trim().to_string(),
            amount,
        }
    }

    /// Calendar-month bucket key, e.g. "2025-01". Day of month is discarded.
    pub(crate) fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.date.year(), self.date.month())
    }
}
