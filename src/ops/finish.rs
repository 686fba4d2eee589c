//! The merge stage shared by `mxm` and `kronecker`: given a raw intermediate
//! product `T`, apply the mask, the accumulator, and the replace/merge
//! output control to write the result into `C`.

use super::OutputControl;
use crate::algebra::BinaryOperator;
use crate::error::Result;
use crate::mask::Mask;
use crate::matrix::{merge_sorted, Matrix};
use crate::row::Row;

/// Writes `t` into `c`, applying `mask`/`accum`/`outp` per the semantics of
/// §4.5.3–4.5.5. Masking is applied here, once the raw product is fully
/// built, rather than fused into the build loop — a performance-only
/// deviation that keeps this one routine as the single source of truth for
/// every one of the eight mask/accum/output combinations.
pub(super) fn finish<D3, B, Op>(
    c: &mut Matrix<D3>,
    mask: Option<&Mask<'_, B>>,
    accum: Option<&Op>,
    t: &Matrix<D3>,
    outp: OutputControl,
) -> Result<()>
where
    D3: Clone + PartialEq,
    B: PartialEq + Default,
    Op: BinaryOperator<D3, D3, D3>,
{
    for i in 0..c.nrows() {
        match mask {
            None => write_no_mask_row(c, i, t, accum, outp)?,
            Some(mask) => {
                if mask.complemented() && mask.underlying_row_empty(i) {
                    // Every position is "in" the complement: behaves exactly
                    // like the no-mask kernel for this row.
                    write_no_mask_row(c, i, t, accum, outp)?;
                } else if !mask.complemented() && mask.underlying_row_empty(i) {
                    match outp {
                        OutputControl::Replace => c.set_row(i, Row::new())?,
                        OutputControl::Merge => {}
                    }
                } else {
                    write_masked_row(c, i, mask, t, accum, outp)?;
                }
            }
        }
    }
    Ok(())
}

fn write_no_mask_row<D3, Op>(
    c: &mut Matrix<D3>,
    i: usize,
    t: &Matrix<D3>,
    accum: Option<&Op>,
    outp: OutputControl,
) -> Result<()>
where
    D3: Clone,
    Op: BinaryOperator<D3, D3, D3>,
{
    let t_row: Vec<(usize, D3)> = t.get_row(i).iter().map(|(j, v)| (j, v.clone())).collect();
    match accum {
        // `merge_row` already keeps every column of `c` that `t_row` doesn't
        // touch, so with an accumulator REPLACE and MERGE coincide: there is
        // no mask to restrict which positions count as "written".
        Some(op) => c.merge_row(i, Row::from_sorted_vec(t_row), op),
        None => match outp {
            OutputControl::Replace => c.set_row(i, Row::from_sorted_vec(t_row)),
            OutputControl::Merge => {
                let t_cols: std::collections::HashSet<usize> =
                    t_row.iter().map(|(j, _)| *j).collect();
                let mut merged: Vec<(usize, D3)> = c
                    .get_row(i)
                    .iter()
                    .filter(|(j, _)| !t_cols.contains(j))
                    .map(|(j, v)| (j, v.clone()))
                    .collect();
                merged.extend(t_row);
                merged.sort_unstable_by_key(|(col, _)| *col);
                c.set_row(i, Row::from_sorted_vec(merged))
            }
        },
    }
}

fn write_masked_row<D3, B, Op>(
    c: &mut Matrix<D3>,
    i: usize,
    mask: &Mask<'_, B>,
    t: &Matrix<D3>,
    accum: Option<&Op>,
    outp: OutputControl,
) -> Result<()>
where
    D3: Clone + PartialEq,
    B: PartialEq + Default,
    Op: BinaryOperator<D3, D3, D3>,
{
    let within_mask_t: Vec<(usize, D3)> = t
        .get_row(i)
        .iter()
        .filter(|(j, _)| mask.contains(i, *j))
        .map(|(j, v)| (j, v.clone()))
        .collect();

    let z_row: Vec<(usize, D3)> = match accum {
        None => within_mask_t,
        Some(op) => {
            let c_in_mask: Vec<(usize, D3)> = c
                .get_row(i)
                .iter()
                .filter(|(j, _)| mask.contains(i, *j))
                .map(|(j, v)| (j, v.clone()))
                .collect();
            merge_sorted(&c_in_mask, &within_mask_t, op)
        }
    };

    match outp {
        OutputControl::Replace => c.set_row(i, Row::from_sorted_vec(z_row)),
        OutputControl::Merge => {
            let mut merged: Vec<(usize, D3)> = c
                .get_row(i)
                .iter()
                .filter(|(j, _)| !mask.contains(i, *j))
                .map(|(j, v)| (j, v.clone()))
                .collect();
            merged.extend(z_row);
            merged.sort_unstable_by_key(|(col, _)| *col);
            c.set_row(i, Row::from_sorted_vec(merged))
        }
    }
}
