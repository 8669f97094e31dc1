//! Comparisons and mask operations.
//!
//! A mask is a pack of the operand type holding `T::ONE` (true) or `T::ZERO`
//! (false) in every lane. Everything that consumes a mask treats any nonzero
//! lane as true, so `NaN` is true and `-0.0` is false.

use crate::backend::{Register, Width};
use crate::pack::Pack;

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    #[inline(always)]
    pub fn cmp_eq(self, rhs: Self) -> Self {
        Self::from_register(self.into_register().cmp_eq(rhs.into_register()))
    }

    #[inline(always)]
    pub fn cmp_ne(self, rhs: Self) -> Self {
        Self::from_register(self.into_register().cmp_ne(rhs.into_register()))
    }

    #[inline(always)]
    pub fn cmp_lt(self, rhs: Self) -> Self {
        Self::from_register(self.into_register().cmp_lt(rhs.into_register()))
    }

    #[inline(always)]
    pub fn cmp_le(self, rhs: Self) -> Self {
        Self::from_register(self.into_register().cmp_le(rhs.into_register()))
    }

    #[inline(always)]
    pub fn cmp_gt(self, rhs: Self) -> Self {
        Self::from_register(self.into_register().cmp_gt(rhs.into_register()))
    }

    #[inline(always)]
    pub fn cmp_ge(self, rhs: Self) -> Self {
        Self::from_register(self.into_register().cmp_ge(rhs.into_register()))
    }

    /// Blend: lane i is `if_true[i]` where this mask is nonzero, else `if_false[i]`.
    #[inline(always)]
    pub fn select(self, if_true: Self, if_false: Self) -> Self {
        Self::from_register(R::select(
            self.into_register(),
            if_true.into_register(),
            if_false.into_register(),
        ))
    }

    /// Bit i set iff lane i is nonzero, in the low N bits.
    #[inline(always)]
    pub fn movemask(self) -> u32 {
        self.into_register().movemask()
    }

    /// True if any lane is nonzero.
    #[inline(always)]
    pub fn any(self) -> bool {
        self.into_register().any()
    }

    /// True if every lane is nonzero.
    #[inline(always)]
    pub fn all(self) -> bool {
        self.into_register().all()
    }

    /// Canonical mask from booleans.
    #[inline(always)]
    pub fn from_bools(lanes: [bool; N]) -> Self {
        Self::from_array(lanes.map(T::from_bool))
    }

    #[inline(always)]
    pub fn to_bools(self) -> [bool; N] {
        self.to_array().map(T::is_true)
    }

    #[inline(always)]
    pub fn mask_and(self, rhs: Self) -> Self {
        self.normalize().bit_and(rhs.normalize())
    }

    #[inline(always)]
    pub fn mask_or(self, rhs: Self) -> Self {
        self.normalize().bit_or(rhs.normalize())
    }

    /// Logical NOT. Not `bit_not`: the complement of a 0/1 lane is not a mask.
    #[inline(always)]
    pub fn mask_not(self) -> Self {
        self.cmp_eq(Self::splat(T::ZERO))
    }

    // Maps any nonzero lane (NaN included) to ONE.
    #[inline(always)]
    fn normalize(self) -> Self {
        self.mask_not().mask_not()
    }
}
