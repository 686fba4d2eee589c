//! # Mask views
//!
//! A mask never materializes a new matrix: it is a thin, non-owning wrapper
//! around an existing [`Matrix`] reference plus a tag describing how
//! membership is determined. `structure(m)`, `complement(m)`, and
//! `complement(structure(m))` compose orthogonally, so the dispatcher only
//! ever has to branch on a 2-bit tag (structural?, complemented?).

use crate::matrix::Matrix;

/// Whether a mask consults stored values (`Value`) or only presence
/// (`Structure`), and whether membership is negated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Kind {
    Value,
    Structure,
}

/// A mask view over an existing matrix. Constructed via [`structure`],
/// [`complement`], or used bare as `&Matrix<B>`.
#[derive(Debug, Copy, Clone)]
pub struct Mask<'a, B> {
    matrix: &'a Matrix<B>,
    kind: Kind,
    complemented: bool,
}

impl<'a, B> Mask<'a, B> {
    /// Wraps `m` as a plain, non-complemented value mask.
    pub fn new(m: &'a Matrix<B>) -> Self {
        Mask {
            matrix: m,
            kind: Kind::Value,
            complemented: false,
        }
    }

    /// Reinterprets this mask so only presence (not value) gates membership.
    pub fn structure(self) -> Self {
        Mask {
            kind: Kind::Structure,
            ..self
        }
    }

    /// Negates membership.
    pub fn complement(self) -> Self {
        Mask {
            complemented: !self.complemented,
            ..self
        }
    }

    /// Number of rows of the underlying matrix.
    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of columns of the underlying matrix.
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// `true` iff row `i` of the underlying matrix has no stored pairs.
    ///
    /// This is the *underlying* storage's emptiness, not "no column is a
    /// member of the effective mask" — for a complemented mask those differ:
    /// an empty underlying row means every column is a member.
    pub fn underlying_row_empty(&self, i: usize) -> bool {
        self.matrix.get_row(i).is_empty()
    }

    /// `true` iff this mask negates membership.
    pub fn complemented(&self) -> bool {
        self.complemented
    }
}

impl<'a, B> Mask<'a, B>
where
    B: PartialEq + Default,
{
    /// `true` iff position `(i, j)` is a member of this mask, per §3's plain
    /// vs. structure vs. complement semantics.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        let present = match self.kind {
            Kind::Structure => self.matrix.get_row(i).contains(j),
            Kind::Value => self
                .matrix
                .get_row(i)
                .get(j)
                .map(|v| *v != B::default())
                .unwrap_or(false),
        };
        present != self.complemented
    }
}

/// Wraps `m` as a structure-only mask: presence of a pair is enough for
/// membership, regardless of its value.
pub fn structure<B>(m: &Matrix<B>) -> Mask<'_, B> {
    Mask::new(m).structure()
}

/// Wraps `m` as a complemented (logically negated) mask.
pub fn complement<B>(m: &Matrix<B>) -> Mask<'_, B> {
    Mask::new(m).complement()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mask_is_value_aware() {
        let mut m: Matrix<i32> = Matrix::new(2, 2);
        m.set_element(0, 0, 1).unwrap();
        m.set_element(0, 1, 0).unwrap();
        let mask = Mask::new(&m);
        assert!(mask.contains(0, 0));
        assert!(!mask.contains(0, 1));
        assert!(!mask.contains(1, 0));
    }

    #[test]
    fn structure_mask_ignores_value() {
        let mut m: Matrix<i32> = Matrix::new(1, 2);
        m.set_element(0, 1, 0).unwrap();
        let mask = structure(&m);
        assert!(mask.contains(0, 1));
        assert!(!mask.contains(0, 0));
    }

    #[test]
    fn complement_negates_membership() {
        let mut m: Matrix<i32> = Matrix::new(1, 2);
        m.set_element(0, 0, 1).unwrap();
        let mask = complement(&m);
        assert!(!mask.contains(0, 0));
        assert!(mask.contains(0, 1));
    }

    #[test]
    fn complement_of_structure_composes() {
        let mut m: Matrix<i32> = Matrix::new(1, 1);
        m.set_element(0, 0, 0).unwrap();
        let mask = Mask::new(&m).structure().complement();
        assert!(!mask.contains(0, 0));
    }
}
