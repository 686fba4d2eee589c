//! The masked, accumulated, semiring-parameterized sparse matrix-matrix
//! product and its four transpose-dispatch kernels.

use super::finish::finish;
use super::OutputControl;
use crate::algebra::{BinaryOperator, Semiring};
use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::matrix::Matrix;
use crate::row::Row;
use crate::view::MatrixArg;

/// `row ← row + a·b_row` under `sr`: the inner primitive of sparse
/// matrix-matrix multiplication. Keeps the working row sorted by merging
/// against `b_row` in one linear pass rather than inserting one entry at a
/// time.
fn axpy<D, D3, SR>(working: Vec<(usize, D3)>, a_ik: &D, b_row: &Row<D>, sr: &SR) -> Vec<(usize, D3)>
where
    D: Clone,
    D3: Clone,
    SR: Semiring<D, D, D3>,
{
    let mut merged = Vec::with_capacity(working.len() + b_row.len());
    let mut wi = working.into_iter().peekable();
    let mut bi = b_row.iter().peekable();
    loop {
        match (wi.peek(), bi.peek()) {
            (Some((wc, _)), Some((bc, _))) => {
                if wc < bc {
                    merged.push(wi.next().unwrap());
                } else if wc > bc {
                    let (bc, bv) = bi.next().unwrap();
                    merged.push((bc, sr.mult(a_ik.clone(), bv.clone())));
                } else {
                    let (wc, wv) = wi.next().unwrap();
                    let (_, bv) = bi.next().unwrap();
                    merged.push((wc, sr.add(wv, sr.mult(a_ik.clone(), bv.clone()))));
                }
            }
            (Some(_), None) => merged.push(wi.next().unwrap()),
            (None, Some(_)) => {
                let (bc, bv) = bi.next().unwrap();
                merged.push((bc, sr.mult(a_ik.clone(), bv.clone())));
            }
            (None, None) => break,
        }
    }
    merged
}

/// Dot product of two sparse rows over `sr`, skipping columns where either
/// operand has no stored pair. Returns `None` if the rows share no column
/// (the reduction is trivially empty), per §4.5.6's "nonempty" tie-break.
fn sparse_dot<D, D3, SR>(a: &Row<D>, b: &Row<D>, sr: &SR) -> Option<D3>
where
    D: Clone,
    D3: Clone,
    SR: Semiring<D, D, D3>,
{
    let mut ai = a.iter().peekable();
    let mut bi = b.iter().peekable();
    let mut acc: Option<D3> = None;
    while let (Some((ac, _)), Some((bc, _))) = (ai.peek(), bi.peek()) {
        if ac < bc {
            ai.next();
        } else if ac > bc {
            bi.next();
        } else {
            let (_, av) = ai.next().unwrap();
            let (_, bv) = bi.next().unwrap();
            let prod = sr.mult(av.clone(), bv.clone());
            acc = Some(match acc {
                Some(prev) => sr.add(prev, prod),
                None => prod,
            });
        }
    }
    acc
}

fn transpose_of<D3: Clone>(raw: &Matrix<D3>) -> Matrix<D3> {
    let mut scatter: Vec<Vec<(usize, D3)>> = (0..raw.ncols()).map(|_| Vec::new()).collect();
    for (i, j, v) in raw.iter() {
        scatter[j].push((i, v.clone()));
    }
    let mut t = Matrix::new(raw.ncols(), raw.nrows());
    for (i, mut entries) in scatter.into_iter().enumerate() {
        entries.sort_unstable_by_key(|(c, _)| *c);
        t.set_row(i, Row::from_sorted_vec(entries)).unwrap();
    }
    t
}

/// `AB`: outer loop over rows of `A`, inner axpy with rows of `B`.
fn build_ab<D, D3, SR>(a: &Matrix<D>, b: &Matrix<D>, sr: &SR) -> Matrix<D3>
where
    D: Clone,
    D3: Clone,
    SR: Semiring<D, D, D3>,
{
    let mut t = Matrix::new(a.nrows(), b.ncols());
    for i in 0..a.nrows() {
        let mut working = Vec::new();
        for (k, a_ik) in a.get_row(i).iter() {
            let b_row = b.get_row(k);
            if b_row.is_empty() {
                continue;
            }
            working = axpy(working, a_ik, b_row, sr);
        }
        t.set_row(i, Row::from_sorted_vec(working)).unwrap();
    }
    t
}

/// `A'B`: outer loop over columns of `A` (iterated as rows `k` of the
/// underlying storage); each stored `(i, a_ki)` axpys `a_ki · B[k]` into a
/// per-output-row working buffer indexed by `i`, accumulated across all `k`
/// before being written out.
fn build_atb<D, D3, SR>(a: &Matrix<D>, b: &Matrix<D>, sr: &SR) -> Matrix<D3>
where
    D: Clone,
    D3: Clone,
    SR: Semiring<D, D, D3>,
{
    let out_nrows = a.ncols();
    let mut working: Vec<Vec<(usize, D3)>> = (0..out_nrows).map(|_| Vec::new()).collect();
    for k in 0..a.nrows() {
        let b_row = b.get_row(k);
        if b_row.is_empty() {
            continue;
        }
        for (i, a_ki) in a.get_row(k).iter() {
            let buf = std::mem::take(&mut working[i]);
            working[i] = axpy(buf, a_ki, b_row, sr);
        }
    }
    let mut t = Matrix::new(out_nrows, b.ncols());
    for (i, w) in working.into_iter().enumerate() {
        t.set_row(i, Row::from_sorted_vec(w)).unwrap();
    }
    t
}

/// `AB'`: for each `(i,j)`, the sparse dot product of row `i` of `A` and row
/// `j` of `B` (since `B'[k,j] = B[j,k]`, both operands are indexed by `k`).
fn build_abt<D, D3, SR>(a: &Matrix<D>, b: &Matrix<D>, sr: &SR) -> Matrix<D3>
where
    D: Clone,
    D3: Clone,
    SR: Semiring<D, D, D3>,
{
    let mut t = Matrix::new(a.nrows(), b.nrows());
    for i in 0..a.nrows() {
        let a_row = a.get_row(i);
        let mut row = Vec::new();
        if !a_row.is_empty() {
            for j in 0..b.nrows() {
                if let Some(v) = sparse_dot(a_row, b.get_row(j), sr) {
                    row.push((j, v));
                }
            }
        }
        t.set_row(i, Row::from_sorted_vec(row)).unwrap();
    }
    t
}

/// `A'B'`: computed as the transpose of `B·A`, built row by row and emitted
/// into the result column-wise so columns within any produced row stay
/// sorted.
fn build_atbt<D, D3, SR>(a: &Matrix<D>, b: &Matrix<D>, sr: &SR) -> Matrix<D3>
where
    D: Clone,
    D3: Clone,
    SR: Semiring<D, D, D3>,
{
    transpose_of(&build_ab(b, a, sr))
}

fn check_dims<D, B>(
    c_nrows: usize,
    c_ncols: usize,
    a: &MatrixArg<'_, D>,
    b: &MatrixArg<'_, D>,
    mask: Option<&Mask<'_, B>>,
) -> Result<()> {
    let (a_r, a_c) = a.logical_dims();
    let (b_r, b_c) = b.logical_dims();
    if c_nrows != a_r {
        return Err(Error::Dimension {
            operand: "A",
            expected: (c_nrows, a_c),
            found: (a_r, a_c),
        });
    }
    if c_ncols != b_c {
        return Err(Error::Dimension {
            operand: "B",
            expected: (b_r, c_ncols),
            found: (b_r, b_c),
        });
    }
    if a_c != b_r {
        return Err(Error::Dimension {
            operand: "A*B",
            expected: (a_r, b_r),
            found: (a_r, a_c),
        });
    }
    if let Some(mask) = mask {
        if mask.nrows() != c_nrows || mask.ncols() != c_ncols {
            return Err(Error::Dimension {
                operand: "M",
                expected: (c_nrows, c_ncols),
                found: (mask.nrows(), mask.ncols()),
            });
        }
    }
    Ok(())
}

/// The masked, accumulated, semiring-parameterized sparse matrix-matrix
/// product `C<M,z> = C ⊕ (A ⊗.⊕ B)`.
///
/// `a` and `b` may each be wrapped in [`crate::view::transpose`]; `mask` may
/// be `None`, a plain `&Matrix<B>`-backed mask, or one produced by
/// [`crate::mask::structure`]/[`crate::mask::complement`]. Dimension
/// mismatches return [`Error::Dimension`] before any mutation of `c`.
/// `verbose` prints which of the four transpose-dispatch kernels fired to
/// stderr; it never changes the result.
pub fn mxm<'a, D, D3, SR, B, Op>(
    c: &mut Matrix<D3>,
    mask: Option<&Mask<'_, B>>,
    accum: Option<&Op>,
    sr: &SR,
    a: impl Into<MatrixArg<'a, D>>,
    b: impl Into<MatrixArg<'a, D>>,
    outp: OutputControl,
    verbose: bool,
) -> Result<()>
where
    D: Clone + 'a,
    D3: Clone + PartialEq,
    SR: Semiring<D, D, D3>,
    B: PartialEq + Default,
    Op: BinaryOperator<D3, D3, D3>,
{
    let a = a.into();
    let b = b.into();
    check_dims(c.nrows(), c.ncols(), &a, &b, mask)?;

    if verbose {
        let kernel = match (a.is_transposed(), b.is_transposed()) {
            (false, false) => "AB",
            (true, false) => "A'B",
            (false, true) => "AB'",
            (true, true) => "A'B'",
        };
        eprintln!("mxm: dispatching {} kernel", kernel);
        if a.inner().nvals() == 0 || b.inner().nvals() == 0 {
            eprintln!("mxm: an operand has no stored values, T will be empty");
        }
    }

    let t = match (a.is_transposed(), b.is_transposed()) {
        (false, false) => build_ab(a.inner(), b.inner(), sr),
        (true, false) => build_atb(a.inner(), b.inner(), sr),
        (false, true) => build_abt(a.inner(), b.inner(), sr),
        (true, true) => build_atbt(a.inner(), b.inner(), sr),
    };

    finish(c, mask, accum, &t, outp)
}
