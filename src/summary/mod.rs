use std::collections::{BTreeMap, HashMap};

use crate::expense::Expense;

/// Pure aggregate views over the ledger. Nothing here is persisted;
/// everything is recomputed from the current records on demand.

pub(crate) fn total_expenses(records: &[Expense]) -> f32 {
    records.iter().map(|e| e.amount).fold(0.0, |total, amount| total + amount)
}

pub(crate) fn balance(salary: f32, records: &[Expense]) -> f32 {
    salary - total_expenses(records)
}

/// Summed amount per category, in descending-total order for display.
pub(crate) fn by_category(records: &[Expense]) -> Vec<(String, f32)> {
    let mut totals: HashMap<&str, f32> = HashMap::new();
    for e in records {
        let entry = totals.entry(e.category.as_str()).or_insert(0.0);
        *entry += e.amount;
    }

    let mut totals: Vec<(String, f32)> =
        totals.into_iter().map(|(c, v)| (c.to_string(), v)).collect();
    // Descending by total; tie-break on name so output is stable
    totals.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    totals
}

/// Summed amount per calendar month, in ascending chronological order.
/// Keys are "YYYY-MM"; the day of month plays no part.
pub(crate) fn by_month(records: &[Expense]) -> BTreeMap<String, f32> {
    let mut totals: BTreeMap<String, f32> = BTreeMap::new();
    for e in records {
        let entry = totals.entry(e.month_key()).or_insert(0.0);
        *entry += e.amount;
    }
    totals
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn expense(y: i32, m: u32, d: u32, category: &str, amount: f32) -> Expense {
        Expense::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), category, amount)
    }

    #[test]
    fn test_empty_ledger_aggregates() {
        assert_eq!(total_expenses(&[]), 0.0);
        assert_eq!(balance(3000.0, &[]), 3000.0);
        assert!(by_category(&[]).is_empty());
        assert!(by_month(&[]).is_empty());
    }

    #[test]
    fn test_two_month_scenario() {
        let records = vec![
            expense(2025, 1, 15, "Alimentação", 500.00),
            expense(2025, 2, 10, "Moradia", 1200.00),
        ];

        assert_eq!(total_expenses(&records), 1700.0);
        assert_eq!(balance(3000.0, &records), 1300.0);

        let categories = by_category(&records);
        assert_eq!(categories[0], ("Moradia".to_string(), 1200.0));
        assert_eq!(categories[1], ("Alimentação".to_string(), 500.0));

        let months = by_month(&records);
        assert_eq!(months.get("2025-01"), Some(&500.0));
        assert_eq!(months.get("2025-02"), Some(&1200.0));
    }

    #[test]
    fn test_by_category_sums_to_grand_total() {
        let records = vec![
            expense(2025, 1, 15, "Alimentação", 500.00),
            expense(2025, 1, 16, "Alimentação", 42.50),
            expense(2025, 2, 10, "Moradia", 1200.00),
        ];

        let category_sum: f32 = by_category(&records).iter().map(|(_, v)| v).sum();
        assert_eq!(category_sum, total_expenses(&records));
    }

    #[test]
    fn test_by_category_descending_order() {
        let records = vec![
            expense(2025, 1, 1, "Lazer", 300.0),
            expense(2025, 1, 2, "Moradia", 1200.0),
            expense(2025, 1, 3, "Transporte", 200.0),
        ];

        let categories = by_category(&records);
        let names: Vec<&str> = categories.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["Moradia", "Lazer", "Transporte"]);
    }

    #[test]
    fn test_month_bucketing() {
        let records = vec![
            expense(2025, 1, 1, "Contas", 100.0),
            expense(2025, 1, 31, "Contas", 50.0),
            expense(2025, 2, 1, "Contas", 25.0),
        ];

        let months = by_month(&records);
        assert_eq!(months.len(), 2);
        assert_eq!(months.get("2025-01"), Some(&150.0));
        assert_eq!(months.get("2025-02"), Some(&25.0));

        // BTreeMap keys iterate in chronological order
        let keys: Vec<&String> = months.keys().collect();
        assert_eq!(keys, vec!["2025-01", "2025-02"]);
    }
}
