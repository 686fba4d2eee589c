//! # Operation dispatch layer
//!
//! The masked, accumulated, semiring-parameterized sparse matrix-matrix
//! product, plus the related Kronecker product. Both operators share a
//! two-phase architecture: build a raw intermediate product, then run it
//! through one shared `finish` routine that applies the mask, accumulator,
//! and output-control semantics. See `DESIGN.md` for the aliasing
//! discussion that motivates this shape.

mod finish;
pub mod kronecker;
pub mod mxm;

pub use kronecker::kronecker;
pub use mxm::mxm;

/// Controls whether positions not written by an operation are cleared
/// (`Replace`) or preserved (`Merge`) in the destination.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OutputControl {
    /// Positions not written by this operation are cleared in the
    /// destination.
    Replace,
    /// Positions not written by this operation keep their prior value.
    Merge,
}
