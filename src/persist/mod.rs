use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use log::{info, warn};

use crate::config::Config;
use crate::expense::Expense;
use crate::ledger::Ledger;
use crate::normalizer::{self, NormalizeError};

/// Load the ledger from a spreadsheet file. Startup never hard-fails: a
/// missing file yields the built-in example ledger, and so does any other
/// read or parse failure, after a warning.
pub(crate) fn load(file_path: &Path, config: &Config) -> Ledger {
    match normalizer::read_expenses(file_path, &config.columns, config.amount_policy) {
        Ok(batch) => {
            if batch.dropped > 0 {
                warn!("Dropped {} invalid rows while loading {:?}", batch.dropped, file_path);
            }
            info!("Loaded {} expenses from {:?}", batch.records.len(), file_path);
            Ledger::new(batch.records)
        }
        Err(NormalizeError::FileNotFoundError(_)) => {
            info!("No data file at {:?}, starting with example expenses", file_path);
            Ledger::new(example_expenses())
        }
        Err(e) => {
            warn!("{}. Falling back to example expenses.", e);
            Ledger::new(example_expenses())
        }
    }
}

/// Overwrite the spreadsheet file with the full ledger, canonical header
/// `date,category,amount`. Callers keep the in-memory session authoritative
/// even when this fails.
pub(crate) fn save(ledger: &Ledger, file_path: &Path) -> anyhow::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(file_path)
        .with_context(|| format!("Unable to open {:?} for writing", file_path))?;

    for expense in ledger.snapshot() {
        csv_writer
            .serialize(expense)
            .with_context(|| format!("Unable to write to {:?}", file_path))?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// A small fixed ledger spanning three months, used as a friendly default
/// so the dashboard is never empty on first run.
pub(crate) fn example_expenses() -> Vec<Expense> {
    let entries = [
        (2025, 1, 15, "Alimentação", 500.00),
        (2025, 1, 20, "Transporte", 200.00),
        (2025, 2, 10, "Moradia", 1200.00),
        (2025, 2, 25, "Lazer", 300.00),
        (2025, 3, 5, "Contas", 450.00),
        (2025, 3, 5, "Steam", 50.00),
    ];

    entries
        .iter()
        .map(|(y, m, d, category, amount)| {
            // Dates are fixed literals, known valid
            Expense::new(NaiveDate::from_ymd_opt(*y, *m, *d).unwrap(), category, *amount)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("gastos-test-{}-{}", std::process::id(), name));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_load_missing_file_returns_example_ledger() {
        let ledger = load(Path::new("/no/such/gastos.csv"), &Config::default());
        assert_eq!(ledger.len(), 6);
        assert_eq!(ledger.snapshot()[0].category, "Alimentação");
    }

    #[test]
    fn test_load_unreadable_file_falls_back_to_example_ledger() {
        let path = temp_file("garbage.csv");
        fs::write(&path, "no header to speak of\n\"broken").unwrap();

        let ledger = load(&path, &Config::default());
        assert_eq!(ledger.len(), 6);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_file("roundtrip.csv");
        let original = Ledger::new(example_expenses());

        save(&original, &path).unwrap();
        let reloaded = load(&path, &Config::default());

        assert_eq!(reloaded.snapshot(), original.snapshot());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_writes_canonical_header() {
        let path = temp_file("header.csv");
        save(&Ledger::new(example_expenses()), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("date,category,amount\n"));

        let _ = fs::remove_file(&path);
    }
}
