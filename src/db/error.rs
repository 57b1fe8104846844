use std::path::PathBuf;

use rust_decimal::Decimal;

/// Failures at the store boundary. Every variant has already been logged by
/// the time a caller sees it.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    /// The database file could not be opened (missing directory, permissions,
    /// path is a directory, ...).
    #[error("could not open database {}: {source}", path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// `CREATE TABLE` failed, e.g. the file is not a SQLite database.
    #[error("could not initialize the expenses table: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("could not add expense: {0}")]
    Insert(#[source] rusqlite::Error),

    /// A read failed. Distinct from an empty result.
    #[error("could not read expenses: {0}")]
    Query(#[source] rusqlite::Error),

    /// The amount has no `f64` representation for the REAL column, or that
    /// representation would not read back as a decimal.
    #[error("amount {0} cannot be stored")]
    InvalidAmount(Decimal),
}
