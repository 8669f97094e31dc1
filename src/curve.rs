//! Parametric cubic curves.
//!
//! Every curve is expanded to monomial coefficients and evaluated with
//! [`horner_pack`], lowest degree first:
//!
//! ```text
//! p(t) = d + c·t + b·t² + a·t³      p'(t) = c + 2b·t + 3a·t²
//! ```
//!
//! `t` is not clamped; outside `[0, 1]` the polynomial extrapolates. At `t = 0`
//! the result is exactly the first coefficient (the start point).

use crate::backend::{FloatRegister, Width};
use crate::element::Float;
use crate::pack::Pack;
use crate::poly::horner_pack;

/// Cubic in monomial form, `[d, c, b, a]`.
type Cubic<T, const N: usize, R> = [Pack<T, N, R>; 4];

#[inline(always)]
fn k<T, const N: usize, R>(value: f64) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    Pack::splat(T::from_f64(value))
}

#[inline(always)]
fn eval<T, const N: usize, R>(coeffs: Cubic<T, N, R>, t: Pack<T, N, R>) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    horner_pack(t, &coeffs)
}

#[inline(always)]
fn eval_tangent<T, const N: usize, R>(coeffs: Cubic<T, N, R>, t: Pack<T, N, R>) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let [_, c, b, a] = coeffs;
    horner_pack(t, &[c, b * k(2.0), a * k(3.0)])
}

// ============================================================================
// Hermite
// ============================================================================

#[inline(always)]
fn hermite_coeffs<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    m0: Pack<T, N, R>,
    m1: Pack<T, N, R>,
) -> Cubic<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let a = k(2.0) * p0 - k(2.0) * p1 + m0 + m1;
    let b = k(-3.0) * p0 + k(3.0) * p1 - k(2.0) * m0 - m1;
    [p0, m0, b, a]
}

/// Cubic Hermite segment from `p0` (tangent `m0`) to `p1` (tangent `m1`).
#[inline(always)]
pub fn hermite<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    m0: Pack<T, N, R>,
    m1: Pack<T, N, R>,
    t: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    eval(hermite_coeffs(p0, p1, m0, m1), t)
}

/// Derivative of [`hermite`] with respect to `t`.
#[inline(always)]
pub fn hermite_tangent<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    m0: Pack<T, N, R>,
    m1: Pack<T, N, R>,
    t: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    eval_tangent(hermite_coeffs(p0, p1, m0, m1), t)
}

// ============================================================================
// Catmull–Rom and Kochanek–Bartels
// ============================================================================

/// Catmull–Rom segment between `p1` and `p2` with the standard tension 0.5.
#[inline(always)]
pub fn catmull_rom<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    p2: Pack<T, N, R>,
    p3: Pack<T, N, R>,
    t: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    catmull_rom_tau(p0, p1, p2, p3, T::from_f64(0.5), t)
}

/// Catmull–Rom segment with tangents `τ(p2 − p0)` and `τ(p3 − p1)`.
#[inline(always)]
pub fn catmull_rom_tau<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    p2: Pack<T, N, R>,
    p3: Pack<T, N, R>,
    tau: T,
    t: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let tau = Pack::splat(tau);
    hermite(p1, p2, tau * (p2 - p0), tau * (p3 - p1), t)
}

/// Kochanek–Bartels (TCB) segment between `p1` and `p2`.
///
/// `tension`, `continuity` and `bias` all 0 gives Catmull–Rom.
#[inline(always)]
pub fn tcb<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    p2: Pack<T, N, R>,
    p3: Pack<T, N, R>,
    tension: T,
    continuity: T,
    bias: T,
    t: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let (tn, c, b) = (tension.to_f64(), continuity.to_f64(), bias.to_f64());
    let s = (1.0 - tn) * 0.5;
    let (d_in, d_mid, d_out) = (p1 - p0, p2 - p1, p3 - p2);

    let m1 = k(s * (1.0 + b) * (1.0 + c)) * d_in + k(s * (1.0 - b) * (1.0 - c)) * d_mid;
    let m2 = k(s * (1.0 + b) * (1.0 - c)) * d_mid + k(s * (1.0 - b) * (1.0 + c)) * d_out;
    hermite(p1, p2, m1, m2, t)
}

// ============================================================================
// Bézier
// ============================================================================

/// Quadratic Bézier with control points `p0`, `p1`, `p2`.
#[inline(always)]
pub fn bezier_quadratic<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    p2: Pack<T, N, R>,
    t: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let a = p0 - k(2.0) * p1 + p2;
    let b = k(2.0) * (p1 - p0);
    horner_pack(t, &[p0, b, a])
}

#[inline(always)]
fn bezier_cubic_coeffs<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    p2: Pack<T, N, R>,
    p3: Pack<T, N, R>,
) -> Cubic<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    let a = p3 - p0 + k(3.0) * (p1 - p2);
    let b = k(3.0) * (p0 - k(2.0) * p1 + p2);
    let c = k(3.0) * (p1 - p0);
    [p0, c, b, a]
}

/// Cubic Bézier with control points `p0..p3`.
///
/// ```
/// use pixelflow_simd::{curve::bezier_cubic, Pack};
///
/// let p = |v: f32| Pack::<f32, 4>::splat(v);
/// assert_eq!(bezier_cubic(p(0.0), p(0.0), p(1.0), p(1.0), p(0.5)).x(), 0.5);
/// ```
#[inline(always)]
pub fn bezier_cubic<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    p2: Pack<T, N, R>,
    p3: Pack<T, N, R>,
    t: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    eval(bezier_cubic_coeffs(p0, p1, p2, p3), t)
}

/// Derivative of [`bezier_cubic`] with respect to `t`.
#[inline(always)]
pub fn bezier_cubic_tangent<T, const N: usize, R>(
    p0: Pack<T, N, R>,
    p1: Pack<T, N, R>,
    p2: Pack<T, N, R>,
    p3: Pack<T, N, R>,
    t: Pack<T, N, R>,
) -> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
{
    eval_tangent(bezier_cubic_coeffs(p0, p1, p2, p3), t)
}

#[cfg(test)]
mod tests {
    use super::*;

    type V = Pack<f64, 2>;

    fn v(x: f64) -> V {
        V::splat(x)
    }

    #[test]
    fn test_hermite_endpoints_and_tangents() {
        let (p0, p1, m0, m1) = (v(1.0), v(4.0), v(-2.0), v(5.0));
        assert_eq!(hermite(p0, p1, m0, m1, v(0.0)).x(), 1.0);
        assert_eq!(hermite(p0, p1, m0, m1, v(1.0)).x(), 4.0);
        assert_eq!(hermite_tangent(p0, p1, m0, m1, v(0.0)).x(), -2.0);
        assert_eq!(hermite_tangent(p0, p1, m0, m1, v(1.0)).x(), 5.0);
    }

    #[test]
    fn test_catmull_rom_interpolates_inner_points() {
        let (p0, p1, p2, p3) = (v(0.0), v(1.0), v(3.0), v(2.0));
        assert_eq!(catmull_rom(p0, p1, p2, p3, v(0.0)).x(), 1.0);
        assert_eq!(catmull_rom(p0, p1, p2, p3, v(1.0)).x(), 3.0);
        // Collinear evenly spaced points give a straight line.
        let line = catmull_rom(v(0.0), v(1.0), v(2.0), v(3.0), V::from_array([0.25, 0.5]));
        assert_eq!(line.to_array(), [1.25, 1.5]);
    }

    #[test]
    fn test_tcb_zero_params_is_catmull_rom() {
        let (p0, p1, p2, p3) = (v(-1.0), v(2.0), v(0.5), v(4.0));
        let t = V::from_array([0.3, 0.8]);
        let a = tcb(p0, p1, p2, p3, 0.0, 0.0, 0.0, t).to_array();
        let b = catmull_rom(p0, p1, p2, p3, t).to_array();
        for i in 0..2 {
            assert!((a[i] - b[i]).abs() < 1e-12);
        }
        // Full tension zeroes the tangents.
        let tight = tcb(p0, p1, p2, p3, 1.0, 0.0, 0.0, v(0.5)).x();
        assert_eq!(tight, hermite(p1, p2, v(0.0), v(0.0), v(0.5)).x());
    }

    #[test]
    fn test_bezier_endpoints() {
        let (p0, p1, p2, p3) = (v(0.0), v(0.0), v(1.0), v(1.0));
        assert_eq!(bezier_cubic(p0, p1, p2, p3, v(0.0)).x(), 0.0);
        assert_eq!(bezier_cubic(p0, p1, p2, p3, v(1.0)).x(), 1.0);
        assert_eq!(bezier_cubic(p0, p1, p2, p3, v(0.5)).x(), 0.5);
        assert_eq!(bezier_quadratic(v(2.0), v(4.0), v(10.0), v(0.5)).x(), 5.0);
        assert_eq!(bezier_quadratic(v(2.0), v(4.0), v(10.0), v(1.0)).x(), 10.0);
    }

    #[test]
    fn test_bezier_tangent_and_extrapolation() {
        let (p0, p1, p2, p3) = (v(0.0), v(1.0), v(2.0), v(3.0));
        // Evenly spaced controls: p(t) = 3t, p'(t) = 3.
        assert_eq!(bezier_cubic_tangent(p0, p1, p2, p3, v(0.7)).x(), 3.0);
        assert_eq!(bezier_cubic(p0, p1, p2, p3, v(2.0)).x(), 6.0);
        assert_eq!(bezier_cubic(p0, p1, p2, p3, v(-1.0)).x(), -3.0);
    }
}
