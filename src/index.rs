//! The index type used for row/column addressing throughout this crate.

/// A row or column index.
pub type IndexType = usize;
