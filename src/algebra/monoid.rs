//! Monoids: a [`binary::BinaryOperator`](super::binary::BinaryOperator) closed
//! over a single domain, plus an identity element.

use super::binary::{self, BinaryOperator};
use num_traits::Bounded;

/// A binary associative operation over `D` with an identity element.
pub trait Monoid<D> {
    /// The neutral element: `op(identity(), x) == x` for all `x`.
    fn identity(&self) -> D;
    /// Combines `lhs` and `rhs`.
    fn apply(&self, lhs: D, rhs: D) -> D;
}

/// Additive monoid: `(D, +, 0)`.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct PlusMonoid;

impl<D: num_traits::Zero + std::ops::Add<Output = D>> Monoid<D> for PlusMonoid {
    fn identity(&self) -> D {
        D::zero()
    }

    fn apply(&self, lhs: D, rhs: D) -> D {
        binary::Plus.apply(lhs, rhs)
    }
}

/// Multiplicative monoid: `(D, *, 1)`.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct TimesMonoid;

impl<D: num_traits::One + std::ops::Mul<Output = D>> Monoid<D> for TimesMonoid {
    fn identity(&self) -> D {
        D::one()
    }

    fn apply(&self, lhs: D, rhs: D) -> D {
        binary::Times.apply(lhs, rhs)
    }
}

/// Min monoid: `(D, min, max_value)`.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct MinMonoid;

impl<D: Bounded + PartialOrd> Monoid<D> for MinMonoid {
    fn identity(&self) -> D {
        D::max_value()
    }

    fn apply(&self, lhs: D, rhs: D) -> D {
        binary::Min.apply(lhs, rhs)
    }
}

/// Max monoid: `(D, max, min_value)`.
///
/// Unlike the reference this crate is descended from, the identity is the
/// domain's true minimum in every domain rather than a hardcoded zero: for
/// `bool`/unsigned domains `min_value()` already is zero, and for signed or
/// floating-point domains it is the actual lowest representable value, so
/// `Max::apply(identity(), x) == x` holds unconditionally.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct MaxMonoid;

impl<D: Bounded + PartialOrd> Monoid<D> for MaxMonoid {
    fn identity(&self) -> D {
        D::min_value()
    }

    fn apply(&self, lhs: D, rhs: D) -> D {
        binary::Max.apply(lhs, rhs)
    }
}

/// Logical-or monoid: `(bool, ||, false)`.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct LogicalOrMonoid;

impl Monoid<bool> for LogicalOrMonoid {
    fn identity(&self) -> bool {
        false
    }

    fn apply(&self, lhs: bool, rhs: bool) -> bool {
        binary::LogicalOr.apply(lhs, rhs)
    }
}

/// Logical-and monoid: `(bool, &&, true)`.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct LogicalAndMonoid;

impl Monoid<bool> for LogicalAndMonoid {
    fn identity(&self) -> bool {
        true
    }

    fn apply(&self, lhs: bool, rhs: bool) -> bool {
        binary::LogicalAnd.apply(lhs, rhs)
    }
}
