//! Semirings: an additive monoid paired with a multiplicative binary
//! operator, parameterized over up to three scalar domains.

use super::binary::{self, BinaryOperator};
use super::monoid::{self, Monoid};
use std::marker::PhantomData;

/// `(⊕, ⊗, 0)`: `add`/`mult` never hardcode `+`/`*`, every kernel routes
/// arithmetic through this trait instead.
pub trait Semiring<D1, D2 = D1, D3 = D1> {
    /// The additive reduction, `D3 x D3 -> D3`.
    fn add(&self, lhs: D3, rhs: D3) -> D3;
    /// The multiplicative combination, `D1 x D2 -> D3`.
    fn mult(&self, lhs: D1, rhs: D2) -> D3;
    /// The additive identity in `D3`.
    fn zero(&self) -> D3;
}

macro_rules! semiring {
    ($name:ident, $doc:expr, $add_monoid:ty, $mult_op:ty) => {
        #[doc = $doc]
        #[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
        pub struct $name;

        impl<D1, D2, D3> Semiring<D1, D2, D3> for $name
        where
            $add_monoid: Monoid<D3>,
            $mult_op: BinaryOperator<D1, D2, D3>,
        {
            fn add(&self, lhs: D3, rhs: D3) -> D3 {
                <$add_monoid>::default().apply(lhs, rhs)
            }

            fn mult(&self, lhs: D1, rhs: D2) -> D3 {
                <$mult_op>::default().apply(lhs, rhs)
            }

            fn zero(&self) -> D3 {
                <$add_monoid>::default().identity()
            }
        }
    };
}

semiring!(
    ArithmeticSemiring,
    "`(+, *, 0)` over any numeric domain.",
    monoid::PlusMonoid,
    binary::Times
);

semiring!(
    MinPlusSemiring,
    "`(min, +, max_value)`, the tropical semiring used by shortest-path \
     style kernels.",
    monoid::MinMonoid,
    binary::Plus
);

semiring!(
    MaxTimesSemiring,
    "`(max, *, min_value)`.",
    monoid::MaxMonoid,
    binary::Times
);

semiring!(
    MinSelect2ndSemiring,
    "`(min, second, max_value)`.",
    monoid::MinMonoid,
    binary::Second
);

semiring!(
    MaxSelect2ndSemiring,
    "`(max, second, min_value)`.",
    monoid::MaxMonoid,
    binary::Second
);

semiring!(
    MinSelect1stSemiring,
    "`(min, first, max_value)`.",
    monoid::MinMonoid,
    binary::First
);

semiring!(
    MaxSelect1stSemiring,
    "`(max, first, min_value)`.",
    monoid::MaxMonoid,
    binary::First
);

/// `(||, &&, false)` over `bool`.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct LogicalSemiring;

impl Semiring<bool, bool, bool> for LogicalSemiring {
    fn add(&self, lhs: bool, rhs: bool) -> bool {
        monoid::LogicalOrMonoid.apply(lhs, rhs)
    }

    fn mult(&self, lhs: bool, rhs: bool) -> bool {
        binary::LogicalAnd.apply(lhs, rhs)
    }

    fn zero(&self) -> bool {
        monoid::LogicalOrMonoid.identity()
    }
}

/// Adapts a [`Semiring`] into a freestanding multiplicative
/// [`BinaryOperator`], for generic code that only needs the `mult` half.
#[derive(Debug, Clone, Copy)]
pub struct MultiplicativeOpFromSemiring<SR> {
    sr: SR,
}

impl<SR> MultiplicativeOpFromSemiring<SR> {
    /// Wraps `sr`.
    pub fn new(sr: SR) -> Self {
        MultiplicativeOpFromSemiring { sr }
    }
}

impl<D1, D2, D3, SR> BinaryOperator<D1, D2, D3> for MultiplicativeOpFromSemiring<SR>
where
    SR: Semiring<D1, D2, D3>,
{
    fn apply(&self, lhs: D1, rhs: D2) -> D3 {
        self.sr.mult(lhs, rhs)
    }
}

/// Adapts a [`Semiring`] into a freestanding additive [`Monoid`], for generic
/// code that only needs the `add`/`zero` half.
#[derive(Debug, Clone, Copy)]
pub struct AdditiveMonoidFromSemiring<SR, D1, D2, D3> {
    sr: SR,
    _marker: PhantomData<(D1, D2, D3)>,
}

impl<SR, D1, D2, D3> AdditiveMonoidFromSemiring<SR, D1, D2, D3> {
    /// Wraps `sr`.
    pub fn new(sr: SR) -> Self {
        AdditiveMonoidFromSemiring {
            sr,
            _marker: PhantomData,
        }
    }
}

impl<D1, D2, D3, SR> Monoid<D3> for AdditiveMonoidFromSemiring<SR, D1, D2, D3>
where
    SR: Semiring<D1, D2, D3>,
{
    fn identity(&self) -> D3 {
        self.sr.zero()
    }

    fn apply(&self, lhs: D3, rhs: D3) -> D3 {
        self.sr.add(lhs, rhs)
    }
}
