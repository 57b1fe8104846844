//! Derived views over the stored expenses: the tabulated rows, the overall
//! balance and per-category totals. Nothing is cached; every call re-reads
//! the store.

mod error;
mod table;

use rust_decimal::Decimal;

use crate::db::{Store, StoreError};

pub(crate) use error::AnalysisError;
pub(crate) use table::{CategoryTotals, ExpenseTable, COLUMNS};

pub(crate) struct Analyzer<'a> {
    store: &'a Store,
}

impl<'a> Analyzer<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Every record as a table with columns [`COLUMNS`].
    pub(crate) fn tabulate(&self) -> Result<ExpenseTable, StoreError> {
        let table = ExpenseTable::new(self.store.query_all()?);
        let missing = table.missing_amounts();
        if missing > 0 {
            tracing::warn!(missing, "some amounts are not numeric and are left out of totals");
        }
        Ok(table)
    }

    /// Sum of all numeric amounts; zero for an empty store.
    pub(crate) fn total_balance(&self) -> Result<Decimal, AnalysisError> {
        self.tabulate()?.sum_amount().inspect_err(log_overflow)
    }

    pub(crate) fn category_totals(&self) -> Result<CategoryTotals, AnalysisError> {
        self.tabulate()?.totals_by_category().inspect_err(log_overflow)
    }
}

fn log_overflow(e: &AnalysisError) {
    if let AnalysisError::Overflow(_) = e {
        tracing::warn!("{e}");
    }
}
