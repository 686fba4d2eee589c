//! # sparsegraph-linalg
//!
//! `sparsegraph_linalg` is a sparse linear-algebra kernel library that
//! realizes graph algorithms as matrix operations over user-chosen
//! algebraic structures. The centerpiece is [`ops::mxm`], the masked,
//! accumulated, semiring-parameterized sparse matrix-matrix product, and
//! its companion [`ops::kronecker`].

pub mod algebra;
pub mod error;
pub mod index;
pub mod mask;
pub mod matrix;
pub mod ops;
pub mod row;
pub mod view;
