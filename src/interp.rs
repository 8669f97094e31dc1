//! Clamping, stepping and interpolation.

use crate::backend::{FloatRegister, Register, Width};
use crate::element::Float;
use crate::pack::Pack;
use crate::poly::horner;

/// `min(max(x, lo), hi)` per lane.
#[inline(always)]
pub fn clamp<T, const N: usize, R>(x: Pack<T, N, R>, lo: Pack<T, N, R>, hi: Pack<T, N, R>) -> Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    x.clamp(lo, hi)
}

/// `clamp(x, 0, 1)`.
#[inline(always)]
pub fn saturate<T, const N: usize, R>(x: Pack<T, N, R>) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    x.clamp(Pack::splat(T::ZERO), Pack::splat(T::ONE))
}

/// `x < edge ? 0 : 1` per lane.
#[inline(always)]
pub fn step<T, const N: usize, R>(edge: Pack<T, N, R>, x: Pack<T, N, R>) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    x.cmp_lt(edge).select(Pack::splat(T::ZERO), Pack::splat(T::ONE))
}

/// Linear interpolation `a + (b − a)·t`.
///
/// Evaluated as `a·(1 − t) + b·t`, which returns `a` at `t = 0` and `b` at
/// `t = 1` exactly for finite inputs.
#[inline(always)]
pub fn lerp<T, const N: usize, R>(a: Pack<T, N, R>, b: Pack<T, N, R>, t: Pack<T, N, R>) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    a * (Pack::splat(T::ONE) - t) + b * t
}

/// Alias of [`lerp`].
#[inline(always)]
pub fn mix<T, const N: usize, R>(a: Pack<T, N, R>, b: Pack<T, N, R>, t: Pack<T, N, R>) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    lerp(a, b, t)
}

/// Hermite ease between `edge0` and `edge1`: `t²(3 − 2t)` with `t` clamped to `[0, 1]`.
#[inline(always)]
pub fn smoothstep<T, const N: usize, R>(
    edge0: Pack<T, N, R>,
    edge1: Pack<T, N, R>,
    x: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let t = saturate((x - edge0) / (edge1 - edge0));
    horner(t, &[T::ZERO, T::ZERO, T::from_f64(3.0), T::from_f64(-2.0)])
}

/// Perlin's quintic ease: `t³(t(6t − 15) + 10)` with `t` clamped to `[0, 1]`.
#[inline(always)]
pub fn smootherstep<T, const N: usize, R>(
    edge0: Pack<T, N, R>,
    edge1: Pack<T, N, R>,
    x: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let t = saturate((x - edge0) / (edge1 - edge0));
    let coeffs = [0.0, 0.0, 0.0, 10.0, -15.0, 6.0].map(T::from_f64);
    horner(t, &coeffs)
}

/// Maps `x` from `[from0, from1]` onto `[to0, to1]`. Not clamped.
#[inline(always)]
pub fn remap<T, const N: usize, R>(
    x: Pack<T, N, R>,
    from0: Pack<T, N, R>,
    from1: Pack<T, N, R>,
    to0: Pack<T, N, R>,
    to1: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    lerp(to0, to1, (x - from0) / (from1 - from0))
}

#[cfg(test)]
mod tests {
    use super::*;

    type V = Pack<f32, 4>;

    #[test]
    fn test_clamp() {
        let x = Pack::<i32, 4>::from_array([5, -1, 2, 3]);
        let r = clamp(x, Pack::splat(0), Pack::splat(3));
        assert_eq!(r.to_array(), [3, 0, 2, 3]);
        assert_eq!(saturate(V::from_array([-0.5, 0.25, 1.5, 1.0])).to_array(), [0.0, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn test_step() {
        let r = step(V::splat(0.5), V::from_array([0.0, 0.5, 0.75, -1.0]));
        assert_eq!(r.to_array(), [0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        let a = V::from_array([0.1, -3.7, 1.0e8, 0.3]);
        let b = V::from_array([0.7, 12.9, -1.0, 1.0e-8]);
        assert_eq!(lerp(a, b, V::splat(0.0)), a);
        assert_eq!(lerp(a, b, V::splat(1.0)), b);
        assert_eq!(mix(V::splat(2.0), V::splat(4.0), V::splat(0.5)).x(), 3.0);
    }

    #[test]
    fn test_smoothstep_family() {
        let x = V::from_array([-1.0, 0.0, 0.5, 2.0]);
        let (e0, e1) = (V::splat(0.0), V::splat(1.0));
        assert_eq!(smoothstep(e0, e1, x).to_array(), [0.0, 0.0, 0.5, 1.0]);
        assert_eq!(smootherstep(e0, e1, x).to_array(), [0.0, 0.0, 0.5, 1.0]);
        let q = smoothstep(e0, e1, V::splat(0.25)).x();
        assert!((q - 0.15625).abs() < 1e-7);
    }

    #[test]
    fn test_remap() {
        let r = remap(V::from_array([0.0, 5.0, 10.0, 15.0]), V::splat(0.0), V::splat(10.0), V::splat(100.0), V::splat(200.0));
        assert_eq!(r.to_array(), [100.0, 150.0, 200.0, 250.0]);
    }
}
