//! # Algebra
//!
//! Element-wise unary and binary operators, monoids, and semirings that
//! parameterize the storage and operation layers. Every arithmetic decision
//! in the rest of this crate flows through one of these traits; nothing in
//! the matrix or `mxm` code hardcodes `+`/`*`.

pub mod binary;
pub mod monoid;
pub mod semiring;
pub mod unary;

pub use binary::BinaryOperator;
pub use monoid::Monoid;
pub use semiring::Semiring;
pub use unary::UnaryOperator;
