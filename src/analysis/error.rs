use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum AnalysisError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A running sum left the range of `Decimal`.
    #[error("total for {0} is too large to compute")]
    Overflow(String),
}
