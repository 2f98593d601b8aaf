use crate::expense::Expense;

/// The full ordered collection of expenses for the current session.
/// Insertion order is preserved for display; duplicates are legal.
/// Holds no derived state and no file handle: persistence is the session
/// controller's job, invoked after every mutation.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Ledger {
    records: Vec<Expense>,
}

impl Ledger {
    pub(crate) fn new(records: Vec<Expense>) -> Ledger {
        Ledger { records }
    }

    pub(crate) fn append(&mut self, expense: Expense) {
        self.records.push(expense);
    }

    /// Atomically swap the whole ledger, used after an import or an
    /// inline edit. Any single-field edit is modeled as a full replace.
    pub(crate) fn replace(&mut self, records: Vec<Expense>) {
        self.records = records;
    }

    pub(crate) fn snapshot(&self) -> &[Expense] {
        &self.records
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
