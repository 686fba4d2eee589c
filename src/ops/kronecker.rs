//! The Kronecker product: same mask/accum/output-control matrix as `mxm`,
//! built over a different raw intermediate.

use super::finish::finish;
use super::OutputControl;
use crate::algebra::BinaryOperator;
use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::matrix::Matrix;
use crate::row::Row;

/// `C` has dimensions `(nrows(A)·nrows(B), ncols(A)·ncols(B))`; for each
/// `(i,j)` with `A[i,j]` present and each `(k,l)` with `B[k,l]` present,
/// position `(i·nrows(B)+k, j·ncols(B)+l)` in the raw intermediate equals
/// `binop(A[i,j], B[k,l])`. Reuses the same mask/accum/output-control
/// `finish` stage that `mxm` uses, since both operators reduce to "build a
/// raw product, then thread it through the shared merge semantics."
pub fn kronecker<D1, D2, D3, Binop, B, Op>(
    c: &mut Matrix<D3>,
    mask: Option<&Mask<'_, B>>,
    accum: Option<&Op>,
    binop: &Binop,
    a: &Matrix<D1>,
    b: &Matrix<D2>,
    outp: OutputControl,
    verbose: bool,
) -> Result<()>
where
    D1: Clone,
    D2: Clone,
    D3: Clone + PartialEq,
    Binop: BinaryOperator<D1, D2, D3>,
    B: PartialEq + Default,
    Op: BinaryOperator<D3, D3, D3>,
{
    let out_nrows = a.nrows() * b.nrows();
    let out_ncols = a.ncols() * b.ncols();
    if c.nrows() != out_nrows || c.ncols() != out_ncols {
        return Err(Error::Dimension {
            operand: "A⊗B",
            expected: (out_nrows, out_ncols),
            found: (c.nrows(), c.ncols()),
        });
    }
    if let Some(mask) = mask {
        if mask.nrows() != out_nrows || mask.ncols() != out_ncols {
            return Err(Error::Dimension {
                operand: "M",
                expected: (out_nrows, out_ncols),
                found: (mask.nrows(), mask.ncols()),
            });
        }
    }

    if verbose {
        eprintln!(
            "kronecker: dispatching block-scatter kernel, A is {}x{} with {} stored values, B is {}x{} with {} stored values",
            a.nrows(),
            a.ncols(),
            a.nvals(),
            b.nrows(),
            b.ncols(),
            b.nvals(),
        );
        if a.nvals() == 0 || b.nvals() == 0 {
            eprintln!("kronecker: an operand has no stored values, T will be empty");
        }
    }

    let mut t = Matrix::new(out_nrows, out_ncols);
    let b_nrows = b.nrows();
    let b_ncols = b.ncols();
    for i in 0..a.nrows() {
        let a_row = a.get_row(i);
        if a_row.is_empty() {
            continue;
        }
        // Per-output-row working buffers for the b_nrows output rows this
        // block of A's row contributes to.
        let mut blocks: Vec<Vec<(usize, D3)>> = (0..b_nrows).map(|_| Vec::new()).collect();
        for (j, a_ij) in a_row.iter() {
            for k in 0..b_nrows {
                for (l, b_kl) in b.get_row(k).iter() {
                    blocks[k].push((j * b_ncols + l, binop.apply(a_ij.clone(), b_kl.clone())));
                }
            }
        }
        for (k, mut entries) in blocks.into_iter().enumerate() {
            entries.sort_unstable_by_key(|(col, _)| *col);
            t.set_row(i * b_nrows + k, Row::from_sorted_vec(entries))
                .unwrap();
        }
    }

    finish(c, mask, accum, &t, outp)
}
