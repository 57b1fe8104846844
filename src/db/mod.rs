mod error;
mod schema;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::models::{parse_amount, ExpenseRecord, NewExpense};

pub(crate) use error::StoreError;

/// Append-only store for expense records, backed by one SQLite file.
///
/// The store only remembers where the file lives. Every operation opens its
/// own connection and drops it before returning, on success and on error.
/// Nothing here coordinates concurrent writers.
#[derive(Debug, Clone)]
pub(crate) struct Store {
    path: PathBuf,
}

impl Store {
    /// Construction does no I/O; call [`Store::ensure_ready`] once at startup.
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and the `expenses` table if missing.
    ///
    /// Safe to call any number of times. A directory that cannot be created
    /// is logged and skipped; opening the database will then fail and that
    /// failure is what gets returned.
    pub(crate) fn ensure_ready(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            match std::fs::create_dir_all(dir) {
                Ok(()) => tracing::debug!(dir = %dir.display(), "database directory ready"),
                Err(e) => tracing::error!(
                    dir = %dir.display(),
                    "could not create database directory: {e}"
                ),
            }
        }

        tracing::info!(path = %self.path.display(), "opening database");
        let conn = self.connect()?;
        conn.execute_batch(schema::CREATE_EXPENSES)
            .map_err(StoreError::Schema)
            .inspect_err(log_failure)?;
        tracing::info!("database and {} table initialized", schema::TABLE);
        Ok(())
    }

    /// Append one expense and return its new id.
    pub(crate) fn insert(&self, expense: &NewExpense) -> Result<i64, StoreError> {
        // Near the top of the Decimal range the nearest f64 is out of range
        let amount = expense
            .amount
            .to_f64()
            .filter(|f| amount_from_sql(ValueRef::Real(*f)).is_some())
            .ok_or(StoreError::InvalidAmount(expense.amount))
            .inspect_err(log_failure)?;

        let conn = self.connect()?;
        conn.execute(
            schema::INSERT_EXPENSE,
            params![amount, expense.category, expense.date, expense.description],
        )
        .map_err(StoreError::Insert)
        .inspect_err(log_failure)?;

        let id = conn.last_insert_rowid();
        tracing::info!(
            id,
            "expense added: {} in {} on {}",
            expense.amount,
            expense.category,
            expense.date
        );
        Ok(id)
    }

    /// Every record, newest first. An empty store yields `Ok(vec![])`.
    pub(crate) fn query_all(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        let conn = self.connect()?;
        let records = read_all(&conn)
            .map_err(StoreError::Query)
            .inspect_err(log_failure)?;
        tracing::debug!(count = records.len(), "fetched expenses");
        Ok(records)
    }

    pub(crate) fn count(&self) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        conn.query_row(schema::COUNT_EXPENSES, [], |row| row.get(0))
            .map_err(StoreError::Query)
            .inspect_err(log_failure)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.path)
            .map_err(|source| StoreError::Connect {
                path: self.path.clone(),
                source,
            })
            .inspect_err(log_failure)
    }
}

fn read_all(conn: &Connection) -> rusqlite::Result<Vec<ExpenseRecord>> {
    let mut stmt = conn.prepare(schema::SELECT_ALL_EXPENSES)?;
    let rows = stmt.query_map([], |row| {
        let id: i64 = row.get(0)?;
        let amount = amount_from_sql(row.get_ref(1)?);
        if amount.is_none() {
            tracing::warn!(id, "stored amount is not numeric");
        }
        Ok(ExpenseRecord {
            id,
            amount,
            category: row.get(2)?,
            date: row.get(3)?,
            description: row.get(4)?,
        })
    })?;
    rows.collect()
}

/// Coerce whatever SQLite holds in the `amount` column to a decimal.
/// The REAL column keeps text it cannot convert, so this must not fail.
fn amount_from_sql(value: ValueRef<'_>) -> Option<Decimal> {
    match value {
        ValueRef::Integer(i) => Some(Decimal::from(i)),
        // f64's Display is the shortest round-trip form, so 12.34 stays 12.34
        ValueRef::Real(f) => parse_amount(&f.to_string()),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_amount),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

fn log_failure(e: &StoreError) {
    tracing::error!("{e}");
}
