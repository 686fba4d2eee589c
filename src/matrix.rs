//! # Sparse matrix (list-of-lists)
//!
//! A matrix of fixed `(nrows, ncols)` dimensions backed by one [`Row`] per
//! row index. `nvals` is maintained as the running sum of row lengths so it
//! never needs a full rescan, except after the bulk [`Matrix::build`] or an
//! explicit [`Matrix::recompute_nvals`].

use crate::algebra::BinaryOperator;
use crate::error::{Error, Result};
use crate::row::Row;
use std::ops::Index;

/// A sparse matrix stored as a sequence of sorted rows.
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    nrows: usize,
    ncols: usize,
    rows: Vec<Row<T>>,
    nvals: usize,
}

impl<T> Matrix<T> {
    /// Creates an empty matrix of the given dimensions.
    ///
    /// # Examples
    /// ```
    /// # use sparsegraph_linalg::matrix::Matrix;
    /// let m: Matrix<f64> = Matrix::new(10, 30);
    /// assert_eq!(m.nrows(), 10);
    /// assert_eq!(m.ncols(), 30);
    /// assert_eq!(m.nvals(), 0);
    /// ```
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Matrix {
            nrows,
            ncols,
            rows: (0..nrows).map(|_| Row::new()).collect(),
            nvals: 0,
        }
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Total number of stored pairs across all rows.
    pub fn nvals(&self) -> usize {
        self.nvals
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.nrows || col >= self.ncols {
            return Err(Error::InvalidIndex {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        Ok(())
    }

    /// In debug builds, checks that `nvals` agrees with a full rescan and
    /// that every column index falls within `ncols`. Rows are sorted by
    /// construction (every write path goes through [`Row`]'s own invariant),
    /// so that half of §3's contract doesn't need rechecking here.
    fn debug_check_invariants(&self) {
        if cfg!(debug_assertions) {
            let actual: usize = self.rows.iter().map(Row::len).sum();
            debug_assert_eq!(self.nvals, actual, "nvals out of sync with stored rows");
            debug_assert!(
                self.rows
                    .iter()
                    .all(|row| row.iter().all(|(c, _)| c < self.ncols)),
                "stored column index out of bounds"
            );
        }
    }

    /// Returns the row at index `i`.
    ///
    /// # Panics
    /// Panics if `i >= nrows()`, matching the behavior of `operator[]` in
    /// the kernel hot loops, where the index is always already known valid.
    pub fn get_row(&self, i: usize) -> &Row<T> {
        &self.rows[i]
    }

    /// Returns an iterator over the `(row, value)` pairs stored in column
    /// `j`. Scans every row, since the storage is row-major.
    pub fn get_col(&self, j: usize) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(move |(i, row)| row.get(j).map(|v| (i, v)))
    }

    /// Replaces row `i` with `row`, maintaining `nvals`. Replacing with an
    /// empty row clears any prior content at that row.
    pub fn set_row(&mut self, i: usize, row: Row<T>) -> Result<()> {
        if i >= self.nrows {
            return Err(Error::InvalidIndex {
                row: i,
                col: 0,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        self.nvals = self.nvals - self.rows[i].len() + row.len();
        self.rows[i] = row;
        self.debug_check_invariants();
        Ok(())
    }

    /// Merges `row` into row `i` via `accum`: for every `(j, v)` in `row`,
    /// the stored value at `(i, j)` becomes `accum(prior, v)` if present, or
    /// `v` if absent. Column ordering is preserved.
    pub fn merge_row<Op>(&mut self, i: usize, row: Row<T>, accum: &Op) -> Result<()>
    where
        T: Clone,
        Op: BinaryOperator<T, T, T>,
    {
        if i >= self.nrows {
            return Err(Error::InvalidIndex {
                row: i,
                col: 0,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        let merged = merge_sorted(self.rows[i].as_slice(), row.as_slice(), accum);
        let new_len = merged.len();
        self.nvals = self.nvals - self.rows[i].len() + new_len;
        self.rows[i] = Row::from_sorted_vec(merged);
        self.debug_check_invariants();
        Ok(())
    }

    /// Populates the matrix from coordinate triples, assuming they are
    /// valid (in-bounds) and free of duplicate `(row, col)` pairs. Any
    /// prior content is discarded.
    pub fn build<I>(&mut self, triples: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut staging: Vec<Vec<(usize, T)>> = (0..self.nrows).map(|_| Vec::new()).collect();
        for (row, col, value) in triples {
            self.check_bounds(row, col)?;
            staging[row].push((col, value));
        }
        let mut nvals = 0;
        for (i, mut entries) in staging.into_iter().enumerate() {
            entries.sort_unstable_by_key(|(c, _)| *c);
            nvals += entries.len();
            self.rows[i] = Row::from_sorted_vec(entries);
        }
        self.nvals = nvals;
        self.debug_check_invariants();
        Ok(())
    }

    /// `true` iff `(row, col)` has a stored pair.
    pub fn has_element(&self, row: usize, col: usize) -> Result<bool> {
        self.check_bounds(row, col)?;
        Ok(self.rows[row].contains(col))
    }

    /// Returns the value stored at `(row, col)`, or `None` if no pair is
    /// stored there.
    pub fn extract_element(&self, row: usize, col: usize) -> Result<Option<&T>> {
        self.check_bounds(row, col)?;
        Ok(self.rows[row].get(col))
    }

    /// Stores `value` at `(row, col)`, overwriting any existing pair.
    pub fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_bounds(row, col)?;
        let had = self.rows[row].contains(col);
        self.rows[row].sorted_insert(col, value);
        if !had {
            self.nvals += 1;
        }
        self.debug_check_invariants();
        Ok(())
    }

    /// Drops all stored pairs; dimensions are preserved.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
        self.nvals = 0;
    }

    /// Exchanges the contents of `self` and `other` in place, without
    /// requiring matching dimensions.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.nrows, &mut other.nrows);
        std::mem::swap(&mut self.ncols, &mut other.ncols);
        std::mem::swap(&mut self.rows, &mut other.rows);
        std::mem::swap(&mut self.nvals, &mut other.nvals);
    }

    /// Recomputes `nvals` from scratch by summing row lengths. Only needed
    /// after direct row manipulation that bypasses the usual accessors.
    pub fn recompute_nvals(&mut self) {
        self.nvals = self.rows.iter().map(Row::len).sum();
    }

    /// Iterates over every stored `(row, col, value)` triple in row-major,
    /// column-ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().map(move |(j, v)| (i, j, v)))
    }
}

impl<T> Index<usize> for Matrix<T> {
    type Output = Row<T>;

    fn index(&self, i: usize) -> &Row<T> {
        &self.rows[i]
    }
}

impl<T: PartialEq> PartialEq for Matrix<T> {
    /// Compares dimensions and stored-pair sets, including pairs whose value
    /// equals the semiring zero (stored-zero semantics). Since rows are
    /// maintained in strictly sorted order, set equality reduces to a plain
    /// per-row vector comparison; no re-sort is needed at comparison time.
    fn eq(&self, other: &Matrix<T>) -> bool {
        self.nrows == other.nrows && self.ncols == other.ncols && self.rows == other.rows
    }
}

impl<T: Eq> Eq for Matrix<T> {}

/// Merges two column-sorted slices into one column-sorted vector, combining
/// overlapping columns via `accum` and carrying non-overlapping columns
/// through unchanged. Shared by [`Matrix::merge_row`] and the masked-accum
/// path of the `mxm`/`kronecker` kernels so both apply the exact same
/// merge-join.
pub(crate) fn merge_sorted<T, Op>(a: &[(usize, T)], b: &[(usize, T)], accum: &Op) -> Vec<(usize, T)>
where
    T: Clone,
    Op: BinaryOperator<T, T, T>,
{
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let mut ai = a.iter();
    let mut bi = b.iter();
    let mut x = ai.next();
    let mut y = bi.next();
    loop {
        match (x, y) {
            (Some((ac, av)), Some((bc, bv))) => {
                if ac < bc {
                    merged.push((*ac, av.clone()));
                    x = ai.next();
                } else if ac > bc {
                    merged.push((*bc, bv.clone()));
                    y = bi.next();
                } else {
                    merged.push((*ac, accum.apply(av.clone(), bv.clone())));
                    x = ai.next();
                    y = bi.next();
                }
            }
            (Some((ac, av)), None) => {
                merged.push((*ac, av.clone()));
                x = ai.next();
            }
            (None, Some((bc, bv))) => {
                merged.push((*bc, bv.clone()));
                y = bi.next();
            }
            (None, None) => break,
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::binary::Plus;

    #[test]
    fn new_matrix_is_empty() {
        let m: Matrix<i32> = Matrix::new(3, 4);
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 4);
        assert_eq!(m.nvals(), 0);
        assert!(m.get_row(0).is_empty());
    }

    #[test]
    fn set_row_updates_nvals() {
        let mut m: Matrix<i32> = Matrix::new(2, 2);
        let mut row = Row::new();
        row.push_back(0, 1);
        row.push_back(1, 2);
        m.set_row(0, row).unwrap();
        assert_eq!(m.nvals(), 2);
        m.set_row(0, Row::new()).unwrap();
        assert_eq!(m.nvals(), 0);
    }

    #[test]
    fn build_from_triples() {
        let mut m: Matrix<i32> = Matrix::new(2, 3);
        m.build(vec![(0, 2, 5), (0, 0, 1), (1, 1, 9)]).unwrap();
        assert_eq!(m.nvals(), 3);
        assert_eq!(m.extract_element(0, 0).unwrap(), Some(&1));
        assert_eq!(m.extract_element(0, 2).unwrap(), Some(&5));
        assert_eq!(m.extract_element(1, 0).unwrap(), None);
    }

    #[test]
    fn build_rejects_out_of_range() {
        let mut m: Matrix<i32> = Matrix::new(2, 2);
        assert!(m.build(vec![(5, 0, 1)]).is_err());
    }

    #[test]
    fn merge_row_combines_with_accum() {
        let mut m: Matrix<i32> = Matrix::new(1, 4);
        m.build(vec![(0, 0, 1), (0, 2, 2)]).unwrap();
        let mut incoming = Row::new();
        incoming.push_back(0, 10);
        incoming.push_back(1, 20);
        m.merge_row(0, incoming, &Plus).unwrap();
        assert_eq!(m.extract_element(0, 0).unwrap(), Some(&11));
        assert_eq!(m.extract_element(0, 1).unwrap(), Some(&20));
        assert_eq!(m.extract_element(0, 2).unwrap(), Some(&2));
        assert_eq!(m.nvals(), 3);
    }

    #[test]
    fn set_element_overwrite_does_not_double_count() {
        let mut m: Matrix<i32> = Matrix::new(1, 1);
        m.set_element(0, 0, 1).unwrap();
        m.set_element(0, 0, 2).unwrap();
        assert_eq!(m.nvals(), 1);
        assert_eq!(m.extract_element(0, 0).unwrap(), Some(&2));
    }

    #[test]
    fn clear_preserves_dimensions() {
        let mut m: Matrix<i32> = Matrix::new(2, 2);
        m.set_element(0, 0, 1).unwrap();
        m.clear();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 2);
        assert_eq!(m.nvals(), 0);
    }

    #[test]
    fn equality_is_stored_zero_aware() {
        let mut a: Matrix<i32> = Matrix::new(1, 2);
        let mut b: Matrix<i32> = Matrix::new(1, 2);
        a.set_element(0, 0, 0).unwrap();
        assert_ne!(a, b);
        b.set_element(0, 0, 0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let m: Matrix<i32> = Matrix::new(2, 2);
        assert!(m.has_element(5, 0).is_err());
    }

    // nvals must always agree with a full rescan, no matter what sequence of
    // set_element calls (including overwrites of the same position) produced
    // the current state.
    #[quickcheck_macros::quickcheck]
    fn nvals_matches_recompute_after_arbitrary_writes(coords: Vec<(u8, u8)>) -> bool {
        let mut m: Matrix<i32> = Matrix::new(4, 4);
        for (r, c) in coords {
            m.set_element((r % 4) as usize, (c % 4) as usize, 1).unwrap();
        }
        let claimed = m.nvals();
        m.recompute_nvals();
        claimed == m.nvals()
    }
}
