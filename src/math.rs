//! Float rounding, roots, reciprocals and the fused multiply-add family.

use crate::backend::{FloatRegister, Width};
use crate::element::Float;
use crate::pack::Pack;

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    /// Correctly rounded square root. Negative lanes give NaN.
    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self::from_register(self.into_register().sqrt())
    }

    /// `1 / sqrt(self)`.
    ///
    /// Registers with a hardware estimate refine it with Newton–Raphson steps
    /// `y ← y·(1.5 − 0.5·a·y²)`. Lanes outside the positive normal range
    /// (zero, subnormal, negative, infinite, NaN) take the exact quotient, so
    /// `rsqrt(±0) = ±∞`, `rsqrt(+∞) = 0` and negative input gives NaN.
    #[inline(always)]
    pub fn rsqrt(self) -> Self {
        let one = Self::splat(T::ONE);
        let exact = one / self.sqrt();
        if R::RSQRT_STEPS == 0 {
            return exact;
        }

        let half = Self::splat(T::from_f64(0.5));
        let three_halves = Self::splat(T::from_f64(1.5));
        let mut y = Self::from_register(self.into_register().rsqrt_estimate());
        for _ in 0..R::RSQRT_STEPS {
            y = y * (three_halves - half * self * y * y);
        }

        let normal = self
            .cmp_ge(Self::splat(T::MIN_POSITIVE))
            .mask_and(self.cmp_lt(Self::splat(T::INFINITY)));
        normal.select(y, exact)
    }

    /// `1 / self`.
    ///
    /// Registers with a hardware estimate refine it with `y ← y·(2 − a·y)`.
    /// Lanes whose magnitude is outside `[MIN_POSITIVE, 2^(bias−2)]` take the
    /// exact quotient, so `rcp(±0) = ±∞` and `rcp(±∞) = ±0`.
    #[inline(always)]
    pub fn rcp(self) -> Self {
        let one = Self::splat(T::ONE);
        let exact = one / self;
        if R::RCP_STEPS == 0 {
            return exact;
        }

        let two = Self::splat(T::from_f64(2.0));
        let mut y = Self::from_register(self.into_register().rcp_estimate());
        for _ in 0..R::RCP_STEPS {
            y = y * (two - self * y);
        }

        let mag = self.abs();
        let normal = mag
            .cmp_ge(Self::splat(T::MIN_POSITIVE))
            .mask_and(mag.cmp_le(Self::splat(T::pow2(T::EXPONENT_BIAS - 2))));
        normal.select(y, exact)
    }

    #[inline(always)]
    pub fn abs(self) -> Self {
        Self::from_register(self.into_register().abs())
    }

    #[inline(always)]
    pub fn floor(self) -> Self {
        Self::from_register(self.into_register().floor())
    }

    #[inline(always)]
    pub fn ceil(self) -> Self {
        Self::from_register(self.into_register().ceil())
    }

    /// Round half to even.
    #[inline(always)]
    pub fn round(self) -> Self {
        Self::from_register(self.into_register().round())
    }

    #[inline(always)]
    pub fn trunc(self) -> Self {
        Self::from_register(self.into_register().trunc())
    }

    /// `self - floor(self)`, in `[0, 1)` for finite input.
    #[inline(always)]
    pub fn fract(self) -> Self {
        self - self.floor()
    }

    /// Magnitude of `self` with the sign bit of `sign`.
    #[inline(always)]
    pub fn copysign(self, sign: Self) -> Self {
        let sign_bit = Self::splat(T::from_f64(-0.0));
        (self & !sign_bit) | (sign & sign_bit)
    }

    /// `self·a + b` with a single rounding.
    #[inline(always)]
    pub fn fma(self, a: Self, b: Self) -> Self {
        Self::from_register(self.into_register().mul_add(a.into_register(), b.into_register()))
    }

    /// `self·a − b` with a single rounding.
    #[inline(always)]
    pub fn fmsub(self, a: Self, b: Self) -> Self {
        self.fma(a, -b)
    }

    /// `−(self·a) + b` with a single rounding.
    #[inline(always)]
    pub fn fnmadd(self, a: Self, b: Self) -> Self {
        (-self).fma(a, b)
    }

    /// `−(self·a) − b` with a single rounding.
    #[inline(always)]
    pub fn fnmsub(self, a: Self, b: Self) -> Self {
        (-self).fma(a, -b)
    }

    /// Mask of NaN lanes.
    #[inline(always)]
    pub fn is_nan(self) -> Self {
        self.cmp_ne(self)
    }

    #[inline(always)]
    pub(crate) fn shl_bits(self, count: u32) -> Self {
        Self::from_register(self.into_register().shl_bits(count))
    }

    #[inline(always)]
    pub(crate) fn shr_bits(self, count: u32) -> Self {
        Self::from_register(self.into_register().shr_bits(count))
    }
}
