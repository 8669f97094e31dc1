//! Horner-form polynomial evaluation.
//!
//! Coefficients are listed lowest degree first: `[c0, c1, c2]` is
//! `c0 + c1·x + c2·x²`, evaluated as `(c2·x + c1)·x + c0`.
//!
//! Each step is a separate multiply and add rather than a fused multiply-add,
//! so every backend rounds identically whether or not it has FMA.

use crate::backend::{FloatRegister, Width};
use crate::element::Float;
use crate::pack::Pack;

/// Evaluates the polynomial with scalar coefficients at every lane of `x`.
///
/// An empty coefficient list evaluates to zero.
///
/// ```
/// use pixelflow_simd::{poly::horner, Pack};
///
/// let x = Pack::<f32, 4>::from_array([0.0, 1.0, 2.0, -1.0]);
/// // 1 + 2x + 3x²
/// assert_eq!(horner(x, &[1.0, 2.0, 3.0]).to_array(), [1.0, 6.0, 17.0, 2.0]);
/// ```
#[inline(always)]
pub fn horner<T, const N: usize, R>(x: Pack<T, N, R>, coeffs: &[T]) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let mut iter = coeffs.iter().rev();
    let Some(&last) = iter.next() else {
        return Pack::splat(T::ZERO);
    };
    iter.fold(Pack::splat(last), |acc, &c| acc * x + Pack::splat(c))
}

/// Evaluates a polynomial whose coefficients differ per lane.
#[inline(always)]
pub fn horner_pack<T, const N: usize, R>(x: Pack<T, N, R>, coeffs: &[Pack<T, N, R>]) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let mut iter = coeffs.iter().rev();
    let Some(&last) = iter.next() else {
        return Pack::splat(T::ZERO);
    };
    iter.fold(last, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_zero_and_empty() {
        let x = Pack::<f64, 2>::from_array([3.0, -2.0]);
        assert_eq!(horner(x, &[]).to_array(), [0.0, 0.0]);
        assert_eq!(horner(x, &[7.5]).to_array(), [7.5, 7.5]);
    }

    #[test]
    fn test_per_lane_coefficients() {
        let x = Pack::<f32, 4>::splat(2.0);
        let c0 = Pack::from_array([1.0, 0.0, 0.0, 5.0]);
        let c1 = Pack::from_array([0.0, 1.0, 0.0, -1.0]);
        let c2 = Pack::from_array([0.0, 0.0, 1.0, 0.5]);
        assert_eq!(horner_pack(x, &[c0, c1, c2]).to_array(), [1.0, 2.0, 4.0, 5.0]);
    }
}
