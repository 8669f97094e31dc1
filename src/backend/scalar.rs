//! Lane-array fallback backend.
//!
//! `Lanes<T, N>` is a plain `[T; N]` that takes every default method of the
//! register traits. It is selected wherever no native register matches an
//! (element, width) pair, and it is the reference the native registers are
//! tested against.

use super::{F32Register, FloatRegister, I32Register, IntRegister, Register};
use crate::element::{Element, Float, Int};
use core::fmt::{Debug, Formatter};

/// N scalar lanes.
#[derive(Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct Lanes<T, const N: usize>(pub [T; N]);

impl<T: Element, const N: usize> Default for Lanes<T, N> {
    fn default() -> Self {
        Self([T::ZERO; N])
    }
}

impl<T: Element, const N: usize> Debug for Lanes<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Lanes({:?})", self.0)
    }
}

impl<T: Element, const N: usize> Register<T, N> for Lanes<T, N> {
    const BACKEND: &'static str = "lanes";
    const NATIVE: bool = false;

    #[inline(always)]
    fn from_array(lanes: [T; N]) -> Self {
        Self(lanes)
    }

    #[inline(always)]
    fn to_array(self) -> [T; N] {
        self.0
    }
}

impl<T: Float, const N: usize> FloatRegister<T, N> for Lanes<T, N> {}

impl<T: Int, const N: usize> IntRegister<T, N> for Lanes<T, N> {}

impl<const N: usize> F32Register<N> for Lanes<f32, N> {}

impl<const N: usize> I32Register<N> for Lanes<i32, N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimates_are_exact() {
        let a = Lanes::<f32, 4>::from_array([4.0, 0.25, 0.0, -1.0]);
        let r = a.rsqrt_estimate().to_array();
        assert_eq!(&r[..3], &[0.5, 2.0, f32::INFINITY]);
        assert!(r[3].is_nan());
        assert_eq!(
            a.rcp_estimate().to_array(),
            [0.25, 4.0, f32::INFINITY, -1.0]
        );
        assert_eq!(Lanes::<f32, 4>::RSQRT_STEPS, 0);
    }

    #[test]
    fn test_bit_shifts_stay_in_lane_width() {
        let a = Lanes::<f32, 2>::from_array([1.0, -1.0]);
        // Exponent bits shift out of the top of a 32-bit lane.
        let shifted = a.shl_bits(9).to_array();
        assert_eq!(shifted[0].to_bits(), 0x3F80_0000u32 << 9);
        assert_eq!(a.shr_bits(23).to_array()[1].to_bits(), 0x17F);
    }

    #[test]
    fn test_saturating_narrowing() {
        let a = Lanes::<f32, 4>::from_array([255.4, 255.6, -0.4, f32::NAN]);
        assert_eq!(a.saturate_u8(), [255, 255, 0, 0]);
        let a = Lanes::<f32, 4>::from_array([0.5, 1.5, 2.5, 1e9]);
        assert_eq!(a.saturate_u8(), [0, 2, 2, 255]);
        let b = Lanes::<i32, 4>::from_array([40_000, -40_000, 12, -1]);
        assert_eq!(b.saturate_i16(), [32767, -32768, 12, -1]);
    }
}
