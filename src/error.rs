use thiserror::Error;

/// Result alias for `cleave`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the loader and the clustering engines.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested k is zero or larger than the number of records.
    #[error("invalid k: cannot create {k} clusters from {n_records} records")]
    InvalidK {
        /// Requested number of clusters.
        k: usize,
        /// Number of records available.
        n_records: usize,
    },

    /// A data row has a different number of columns than the restriction mask.
    #[error("inconsistent record width on row {row}: expected {expected} columns, found {found}")]
    InconsistentRecordWidth {
        /// Zero-based record row (the mask row is not counted).
        row: usize,
        /// Mask length.
        expected: usize,
        /// Columns found on the row.
        found: usize,
    },

    /// K-means hit its iteration cap before reaching a fixed point.
    #[error("k-means did not converge after {iterations} iterations")]
    NonConvergence {
        /// Number of iterations attempted.
        iterations: usize,
    },

    /// A restriction mask cell was neither `0` nor `1`.
    #[error("invalid mask flag {value:?} in column {column}")]
    InvalidMask {
        /// Zero-based column.
        column: usize,
        /// Offending cell.
        value: String,
    },

    /// A numeric-active cell could not be parsed as a finite number.
    #[error("invalid number {value:?} on row {row}, column {column}")]
    InvalidNumber {
        /// Zero-based record row.
        row: usize,
        /// Zero-based column.
        column: usize,
        /// Offending cell.
        value: String,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// An injected index source produced an out-of-range or repeated index.
    #[error("invalid seed index {index} for {n_records} records")]
    InvalidSeed {
        /// Offending index.
        index: usize,
        /// Number of records available.
        n_records: usize,
    },

    /// Requested cluster count is incompatible with a dendrogram.
    #[error("cannot cut {n_items} leaves into {requested} clusters")]
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of leaves.
        n_items: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Delimited-text parsing failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Reading the input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
