//! # Error types
//!
//! Error taxonomy for the storage and operation layers. All fallible public
//! operations return [`Result`] and propagate failures with `?` rather than
//! panicking on caller-supplied bad input.

use thiserror::Error;

/// A [`Result`](std::result::Result) specialized to this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the storage and operation layers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// Operand dimensions violate the product, mask, or output shape
    /// requirements of an operation.
    #[error(
        "dimension mismatch: expected {expected:?}, found {found:?} for operand '{operand}'"
    )]
    Dimension {
        /// Name of the offending operand, for diagnostics.
        operand: &'static str,
        /// Expected `(nrows, ncols)`.
        expected: (usize, usize),
        /// Actual `(nrows, ncols)`.
        found: (usize, usize),
    },
    /// Element access used a row or column index outside the matrix bounds.
    #[error("index ({row}, {col}) out of bounds for a {nrows}x{ncols} matrix")]
    InvalidIndex {
        /// Row index that was requested.
        row: usize,
        /// Column index that was requested.
        col: usize,
        /// Number of rows in the matrix.
        nrows: usize,
        /// Number of columns in the matrix.
        ncols: usize,
    },
}
