//! Lane conversions: half floats, saturating narrowing, casts and bit views.

use crate::backend::{map, F32Register, FloatRegister, I32Register, Register, Width};
use crate::bits::bit_cast;
use crate::element::{Cast, Element, Float};
use crate::ieee;
use crate::pack::Pack;

// ============================================================================
// f32 packs
// ============================================================================

impl<const N: usize, R> Pack<f32, N, R>
where
    f32: Width<N>,
    u16: Width<N>,
    u8: Width<N>,
    R: F32Register<N>,
{
    /// Converts every lane to binary16 bits, rounding to nearest even.
    ///
    /// Uses F16C when compiled in; the software path gives identical bits.
    #[inline(always)]
    pub fn to_half(self) -> Pack<u16, N> {
        Pack::from_array(self.into_register().to_half())
    }

    /// Widens binary16 bits to f32. Exact for every input.
    #[inline(always)]
    pub fn from_half(bits: Pack<u16, N>) -> Self {
        Self::from_register(R::from_half(bits.to_array()))
    }

    /// Rounds to nearest (ties to even) and clamps to `[0, 255]`. NaN becomes 0.
    ///
    /// ```
    /// use pixelflow_simd::Pack;
    ///
    /// let v = Pack::<f32, 4>::from_array([255.4, 255.6, -0.4, 127.5]);
    /// assert_eq!(v.pack_saturate().to_array(), [255, 255, 0, 128]);
    /// ```
    #[inline(always)]
    pub fn pack_saturate(self) -> Pack<u8, N> {
        Pack::from_array(self.into_register().saturate_u8())
    }
}

// ============================================================================
// i32 packs
// ============================================================================

impl<const N: usize, R> Pack<i32, N, R>
where
    i32: Width<N>,
    i16: Width<N>,
    R: I32Register<N>,
{
    /// Clamps every lane to `[-32768, 32767]`.
    #[inline(always)]
    pub fn pack_saturate(self) -> Pack<i16, N> {
        Pack::from_array(self.into_register().saturate_i16())
    }
}

// ============================================================================
// Any element
// ============================================================================

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    /// Converts lanes with Rust `as` semantics.
    #[inline(always)]
    pub fn cast<U>(self) -> Pack<U, N>
    where
        T: Cast<U>,
        U: Width<N>,
    {
        Pack::from_array(map(self.to_array(), T::cast))
    }

    /// Unsigned view of each lane's bit pattern.
    #[inline(always)]
    pub fn to_bits(self) -> Pack<T::Bits, N>
    where
        T::Bits: Width<N>,
    {
        Pack::from_array(map(self.to_array(), T::to_bits))
    }

    #[inline(always)]
    pub fn from_bits(bits: Pack<T::Bits, N>) -> Self
    where
        T::Bits: Width<N>,
    {
        Self::from_array(map(bits.to_array(), T::from_bits))
    }

    /// Reinterprets each lane as `U`, which must have the same size as `T`.
    #[inline(always)]
    pub fn bit_cast<U>(self) -> Pack<U, N>
    where
        U: Width<N>,
    {
        Pack::from_array(map(self.to_array(), bit_cast::<T, U>))
    }
}

// ============================================================================
// Exponent / mantissa
// ============================================================================

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Float + Width<N>,
    R: FloatRegister<T, N>,
    i32: Width<N>,
{
    /// Per-lane [`ieee::frexp`]: `self == m * 2^e` with `|m|` in `[0.5, 1)`.
    #[inline(always)]
    pub fn frexp(self) -> (Self, Pack<i32, N>) {
        let parts = map(self.to_array(), ieee::frexp);
        (
            Self::from_array(map(parts, |(m, _)| m)),
            Pack::from_array(map(parts, |(_, e)| e)),
        )
    }

    /// Per-lane [`ieee::ldexp`]: `self * 2^e`, saturating to 0 and ±∞.
    #[inline(always)]
    pub fn ldexp(self, e: Pack<i32, N>) -> Self {
        let m = self.to_array();
        let e = e.to_array();
        Self::from_array(core::array::from_fn(|i| ieee::ldexp(m[i], e[i])))
    }
}
