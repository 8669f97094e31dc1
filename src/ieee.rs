//! Exponent/mantissa decomposition by direct bit manipulation.

use crate::element::{Element, Float};

/// Splits `x` into `(m, e)` with `|m|` in `[0.5, 1)` and `x == m * 2^e`.
///
/// Zero, infinities and NaN are returned unchanged with exponent 0.
/// Subnormals are renormalized first, so `m` is always normal.
#[inline]
pub fn frexp<T: Float>(x: T) -> (T, i32) {
    if x == T::ZERO || !x.is_finite() {
        return (x, 0);
    }

    let mant = T::MANTISSA_BITS;
    let mut raw = x.to_raw();
    let mut adjust = 0;
    if (raw >> mant) & T::EXPONENT_MAX == 0 {
        raw = Element::mul(x, T::pow2(mant as i32)).to_raw();
        adjust = -(mant as i32);
    }

    let field = ((raw >> mant) & T::EXPONENT_MAX) as i32;
    let half_field = (T::EXPONENT_BIAS - 1) as u64;
    let m = T::from_raw((raw & !(T::EXPONENT_MAX << mant)) | (half_field << mant));
    (m, field - (T::EXPONENT_BIAS - 1) + adjust)
}

/// Computes `m * 2^e`.
///
/// Overflow saturates to ±∞ and underflow rounds through the subnormal range
/// to ±0 with a single rounding. Zero, infinities and NaN are returned unchanged.
#[inline]
pub fn ldexp<T: Float>(m: T, e: i32) -> T {
    if m == T::ZERO || !m.is_finite() {
        return m;
    }

    let (frac, fe) = frexp(m);
    // frac is in [0.5, 1): past these limits the result is already ±0 or ±∞.
    let lo = -(T::EXPONENT_BIAS + T::MANTISSA_BITS as i32 + 1);
    let hi = T::EXPONENT_BIAS + 2;
    let e = e.saturating_add(fe).clamp(lo, hi);

    // Two normal factors keep the first product exact, so only the second rounds.
    let k1 = e / 2;
    let k2 = e - k1;
    Element::mul(Element::mul(frac, T::pow2(k1)), T::pow2(k2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frexp_normal_values() {
        assert_eq!(frexp(8.0f32), (0.5, 4));
        assert_eq!(frexp(-3.0f64), (-0.75, 2));
        assert_eq!(frexp(0.75f32), (0.75, 0));
        assert_eq!(frexp(f32::MAX).1, 128);
    }

    #[test]
    fn frexp_specials_pass_through() {
        assert_eq!(frexp(0.0f32), (0.0, 0));
        assert_eq!(frexp(f64::INFINITY), (f64::INFINITY, 0));
        let (m, e) = frexp(f32::NAN);
        assert!(m.is_nan());
        assert_eq!(e, 0);
    }

    #[test]
    fn frexp_renormalizes_subnormals() {
        let tiny = f32::from_bits(1);
        assert_eq!(frexp(tiny), (0.5, -148));
        let (m, e) = frexp(f64::MIN_POSITIVE / 3.0);
        assert!((0.5..1.0).contains(&m));
        assert_eq!(ldexp(m, e), f64::MIN_POSITIVE / 3.0);
    }

    #[test]
    fn ldexp_inverts_frexp() {
        for x in [1.0f32, -7.25, 1.0e-30, 3.0e38, f32::from_bits(12345)] {
            let (m, e) = frexp(x);
            assert_eq!(ldexp(m, e), x);
        }
    }

    #[test]
    fn ldexp_saturates() {
        assert_eq!(ldexp(1.0f32, 128), f32::INFINITY);
        assert_eq!(ldexp(-1.0f32, i32::MAX), f32::NEG_INFINITY);
        assert_eq!(ldexp(1.0f32, -150), 0.0);
        assert_eq!(ldexp(1.0f32, i32::MIN), 0.0);
        assert_eq!(ldexp(1.0f32, -149), f32::from_bits(1));
        assert_eq!(ldexp(1.5f32, -149), f32::from_bits(2));
        assert_eq!(ldexp(f32::MAX, -276), f32::from_bits(2));
    }
}
