use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use log::{error, info};

use crate::config::Config;
use crate::expense::Expense;
use crate::ledger::Ledger;
use crate::normalizer::{self, NormalizeError};
use crate::persist;

const DEFAULT_SALARY: f32 = 3000.00;

/// Explicit session context: the ledger, the salary scalar and the backing
/// file path all live here, initialized once at startup. Every external
/// trigger is handled synchronously and completely before the next one.
pub(crate) struct Session {
    pub(crate) ledger: Ledger,
    pub(crate) salary: f32,
    file_path: PathBuf,
    config: Config,
}

/// Row accounting reported back after a bulk import or an inline edit.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BatchOutcome {
    /// The edited table was identical to the current ledger; nothing written.
    Unchanged,
    Replaced { accepted: usize, dropped: usize },
}

impl Session {
    pub(crate) fn open(file_path: PathBuf, config: Config) -> Session {
        let ledger = persist::load(&file_path, &config);
        let salary = config.salary.unwrap_or(DEFAULT_SALARY);
        Session { ledger, salary, file_path, config }
    }

    pub(crate) fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Form submission: validate the single new entry with the normalizer's
    /// per-field rules, append and write through.
    pub(crate) fn add_expense(
        &mut self,
        date: &str,
        category: &str,
        amount: &str,
    ) -> anyhow::Result<Expense> {
        let date =
            normalizer::parse_date(date).ok_or_else(|| anyhow!("Invalid date: '{}'", date))?;

        let category = category.trim();
        if category.is_empty() {
            bail!("Category must not be empty");
        }

        let amount = normalizer::parse_amount(amount)
            .ok_or_else(|| anyhow!("Invalid amount: '{}'", amount))?;

        let expense = Expense::new(date, category, amount);
        self.ledger.append(expense.clone());
        self.write_through();

        Ok(expense)
    }

    /// File upload: normalize the whole uploaded table and replace the
    /// ledger wholesale.
    pub(crate) fn import_file(&mut self, path: &Path) -> Result<BatchOutcome, NormalizeError> {
        let batch =
            normalizer::read_expenses(path, &self.config.columns, self.config.amount_policy)?;

        info!(
            "Imported {} expenses from {:?}, {} rows dropped",
            batch.records.len(),
            path,
            batch.dropped
        );
        let outcome = BatchOutcome::Replaced {
            accepted: batch.records.len(),
            dropped: batch.dropped,
        };

        self.ledger.replace(batch.records);
        self.write_through();

        Ok(outcome)
    }

    /// Inline table edit: the edited grid, re-read from `path`, is a
    /// candidate ledger. Skip persistence entirely when nothing changed.
    pub(crate) fn apply_edit(&mut self, path: &Path) -> Result<BatchOutcome, NormalizeError> {
        let batch =
            normalizer::read_expenses(path, &self.config.columns, self.config.amount_policy)?;

        if batch.records == self.ledger.snapshot() {
            info!("Edited table is identical to the current ledger, skipping write");
            return Ok(BatchOutcome::Unchanged);
        }

        let outcome = BatchOutcome::Replaced {
            accepted: batch.records.len(),
            dropped: batch.dropped,
        };

        self.ledger.replace(batch.records);
        self.write_through();

        Ok(outcome)
    }

    /// Salary is session-scoped: it is never written to the data file.
    pub(crate) fn set_salary(&mut self, amount: &str) -> anyhow::Result<f32> {
        let salary = normalizer::parse_amount(amount)
            .ok_or_else(|| anyhow!("Invalid salary: '{}'", amount))?;
        self.salary = salary;
        Ok(salary)
    }

    /// Write-through after a mutation. A failed write is reported but the
    /// in-memory ledger stays authoritative.
    fn write_through(&self) {
        if let Err(e) = persist::save(&self.ledger, &self.file_path) {
            error!("Unable to save {:?}: {:#}. In-memory data is unchanged.", self.file_path, e);
        }
    }
}
