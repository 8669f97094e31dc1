//! Exponentials and logarithms.
//!
//! Built from register primitives only (exponent-field bit tricks plus a
//! polynomial), so the results are the same on every backend. Two tiers:
//!
//! | tier | exp2 | log2 |
//! |---|---|---|
//! | fast | `k = floor(x)`, degree-5 minimax on `[0, 1)`, flushes to zero below the normal range | exponent + degree-5 minimax of `log2(1 + y)`; subnormal input is not renormalized |
//! | precise | `k = round(x)`, polynomial on `[-0.5, 0.5]`, gradual underflow | `m` in `[√½, √2]`, odd `atanh` series, subnormals renormalized |
//!
//! Special values on both tiers: `exp2(NaN) = NaN`, `exp2(+∞) = +∞`,
//! `exp2(−∞) = 0`; `log2(±0) = −∞`, `log2(+∞) = +∞`, `log2(x < 0) = NaN`.
//! The accuracy each tier reaches is checked by [`crate::accuracy`].

use crate::backend::{FloatRegister, Width};
use crate::element::Float;
use crate::pack::Pack;
use crate::poly::horner;
use core::f64::consts::{LN_2, LOG10_2, LOG2_10, LOG2_E, SQRT_2};

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    #[inline(always)]
    fn constant(value: f64) -> Self {
        Self::splat(T::from_f64(value))
    }

    #[inline(always)]
    fn from_raw_bits(bits: u64) -> Self {
        Self::splat(T::from_raw(bits))
    }

    /// 2^k for integer-valued lanes `k`, by writing `k + bias` into the exponent field.
    ///
    /// The field is clamped to `[0, EXPONENT_MAX]`, so small `k` gives 0 and
    /// large `k` gives +∞.
    #[inline(always)]
    fn pow2i(k: Self) -> Self {
        let max_field = Self::constant(T::EXPONENT_MAX as f64);
        let field = (k + Self::constant(T::EXPONENT_BIAS as f64)).clamp(Self::splat(T::ZERO), max_field);
        // Adding 2^MANT parks the integer in the low mantissa bits.
        let magic = Self::splat(T::pow2(T::MANTISSA_BITS as i32));
        (field + magic).shl_bits(T::MANTISSA_BITS)
    }

    /// Unbiased exponent as a float, and the mantissa with its exponent forced to 0 (`[1, 2)`).
    #[inline(always)]
    fn split_exponent(self) -> (Self, Self) {
        let magic = Self::splat(T::pow2(T::MANTISSA_BITS as i32));
        let field_bits = self.shr_bits(T::MANTISSA_BITS) & Self::from_raw_bits(T::EXPONENT_MAX);
        let e = ((field_bits | magic) - magic) - Self::constant(T::EXPONENT_BIAS as f64);

        let mantissa_mask = Self::from_raw_bits((1u64 << T::MANTISSA_BITS) - 1);
        let m = (self & mantissa_mask) | Self::splat(T::ONE);
        (e, m)
    }

    /// Special cases shared by both log tiers.
    #[inline(always)]
    fn log_fixup(self, result: Self) -> Self {
        let zero = Self::splat(T::ZERO);
        let inf = Self::splat(T::INFINITY);
        let result = self.cmp_eq(inf).select(inf, result);
        let result = self.cmp_eq(zero).select(Self::splat(T::NEG_INFINITY), result);
        self.cmp_lt(zero)
            .mask_or(self.is_nan())
            .select(Self::splat(T::NAN), result)
    }

    // =========================================================================
    // Base 2
    // =========================================================================

    /// 2^x, fast tier.
    #[inline(always)]
    pub fn fast_exp2(self) -> Self {
        let limit = T::EXPONENT_BIAS as f64 + 1.0;
        let x = self.clamp(Self::constant(-limit), Self::constant(limit));
        let k = x.floor();
        let p = horner(x - k, T::FAST_EXP2);
        self.is_nan().select(self, p * Self::pow2i(k))
    }

    /// 2^x, precise tier.
    #[inline(always)]
    pub fn exp2(self) -> Self {
        let bias = T::EXPONENT_BIAS as f64;
        let lo = -(bias + T::MANTISSA_BITS as f64 + 2.0);
        let x = self.clamp(Self::constant(lo), Self::constant(bias + 2.0));
        let k = x.round();
        let p = horner(x - k, T::PRECISE_EXP2);
        // Two factors keep each power of two normal; only the last product rounds.
        let k1 = (k * Self::constant(0.5)).floor();
        let k2 = k - k1;
        let r = (p * Self::pow2i(k1)) * Self::pow2i(k2);
        self.is_nan().select(self, r)
    }

    /// log2(x), fast tier.
    #[inline(always)]
    pub fn fast_log2(self) -> Self {
        let (e, m) = self.split_exponent();
        let r = e + horner(m - Self::splat(T::ONE), T::FAST_LOG2);
        self.log_fixup(r)
    }

    /// log2(x), precise tier.
    #[inline(always)]
    pub fn log2(self) -> Self {
        let one = Self::splat(T::ONE);
        let mant = T::MANTISSA_BITS as i32;

        let tiny = self.cmp_lt(Self::splat(T::MIN_POSITIVE));
        let x = tiny.select(self * Self::splat(T::pow2(mant)), self);
        let (e, m) = x.split_exponent();
        let e = e - tiny.select(Self::constant(mant as f64), Self::splat(T::ZERO));

        let big = m.cmp_gt(Self::constant(SQRT_2));
        let m = big.select(m * Self::constant(0.5), m);
        let e = big.select(e + one, e);

        let r = (m - one) / (m + one);
        let series = r * horner(r * r, T::PRECISE_LOG2);
        self.log_fixup(e + series * Self::constant(2.0 * LOG2_E))
    }

    // =========================================================================
    // Other bases
    // =========================================================================

    /// e^x, fast tier.
    #[inline(always)]
    pub fn fast_exp(self) -> Self {
        (self * Self::constant(LOG2_E)).fast_exp2()
    }

    /// e^x, precise tier.
    #[inline(always)]
    pub fn exp(self) -> Self {
        (self * Self::constant(LOG2_E)).exp2()
    }

    /// ln(x), fast tier.
    #[inline(always)]
    pub fn fast_log(self) -> Self {
        self.fast_log2() * Self::constant(LN_2)
    }

    /// ln(x), precise tier.
    #[inline(always)]
    pub fn log(self) -> Self {
        self.log2() * Self::constant(LN_2)
    }

    /// 10^x, fast tier.
    #[inline(always)]
    pub fn fast_exp10(self) -> Self {
        (self * Self::constant(LOG2_10)).fast_exp2()
    }

    /// 10^x, precise tier.
    #[inline(always)]
    pub fn exp10(self) -> Self {
        (self * Self::constant(LOG2_10)).exp2()
    }

    /// log10(x), fast tier.
    #[inline(always)]
    pub fn fast_log10(self) -> Self {
        self.fast_log2() * Self::constant(LOG10_2)
    }

    /// log10(x), precise tier.
    #[inline(always)]
    pub fn log10(self) -> Self {
        self.log2() * Self::constant(LOG10_2)
    }

    /// `exp2(y · log2(self))`, fast tier. Negative bases give NaN.
    #[inline(always)]
    pub fn fast_pow(self, y: Self) -> Self {
        (y * self.fast_log2()).fast_exp2()
    }

    /// `exp2(y · log2(self))`, precise tier. Negative bases give NaN and `pow(0, 0)` is NaN.
    #[inline(always)]
    pub fn pow(self, y: Self) -> Self {
        (y * self.log2()).exp2()
    }
}
