//! Register traits and the register selection table.
//!
//! # Architecture
//!
//! The SIMD operations are split into two layers:
//!
//! - **Registers** (this module): operations that map 1:1 (or near 1:1) to
//!   hardware instructions. [`Register`] carries a lane-by-lane default for every
//!   method, so a register type only overrides what its ISA accelerates.
//!   [`Lanes`] overrides nothing and is the fallback for every (element, width).
//!
//! - **Compounds** (`crate::transcendental`, `crate::interp`, `crate::curve`):
//!   higher-level operations built on [`crate::Pack`], which works over any
//!   register. They behave identically on every backend because they only use
//!   register methods.
//!
//! # Selection
//!
//! [`Width`] maps an (element type, lane count) pair to the register used by
//! default. It is implemented for N = 2, 4 and 8 only, so any other lane count
//! fails to compile. The table is resolved by the `pixelflow_*` cfg flags that
//! `build.rs` derives from the target features; nothing is detected at run time.
//!
//! # Masks
//!
//! Comparisons return a register of the operand type whose lanes are exactly
//! `T::ONE` (true) or `T::ZERO` (false) on every backend. Native registers
//! normalize the hardware all-ones result. Consumers of masks (`select`, `any`,
//! `all`, `movemask`, masked memory access) treat any nonzero lane as true.

use crate::element::{Element, Float, Int};
use crate::half::{f32_to_half, half_to_f32};
use core::fmt::Debug;

pub mod scalar;

#[cfg(all(target_arch = "x86_64", pixelflow_sse2))]
pub mod x86;

#[cfg(all(target_arch = "aarch64", pixelflow_neon))]
pub mod arm;

pub use scalar::Lanes;

// ============================================================================
// Lane helpers for default methods
// ============================================================================

#[inline(always)]
pub(crate) fn map<T: Copy, U, const N: usize>(a: [T; N], f: impl Fn(T) -> U) -> [U; N] {
    core::array::from_fn(|i| f(a[i]))
}

#[inline(always)]
pub(crate) fn zip<T: Copy, U, const N: usize>(
    a: [T; N],
    b: [T; N],
    f: impl Fn(T, T) -> U,
) -> [U; N] {
    core::array::from_fn(|i| f(a[i], b[i]))
}

/// Pairwise tree reduction: lane i is combined with lane i + w/2 until one lane remains.
#[inline(always)]
pub(crate) fn tree_reduce<T: Copy, const N: usize>(mut a: [T; N], f: impl Fn(T, T) -> T) -> T {
    let mut width = N;
    while width > 1 {
        width /= 2;
        for i in 0..width {
            a[i] = f(a[i], a[i + width]);
        }
    }
    a[0]
}

// ============================================================================
// Register traits
// ============================================================================

/// An N-lane register of `T`.
///
/// Every method has a lane-by-lane default written against [`Element`]; native
/// registers override the subset their instruction set provides. Overrides must
/// produce exactly the lanes the default would (the rsqrt/rcp estimates on
/// [`FloatRegister`] are the only documented exception).
pub trait Register<T: Element, const N: usize>: Copy + Debug + Send + Sync + 'static {
    /// Short backend name for diagnostics (`"lanes"`, `"sse2"`, `"avx2"`, `"neon"`).
    const BACKEND: &'static str;
    /// Whether this is a platform register rather than the lane-array fallback.
    const NATIVE: bool;

    fn from_array(lanes: [T; N]) -> Self;
    fn to_array(self) -> [T; N];

    #[inline(always)]
    fn splat(value: T) -> Self {
        Self::from_array([value; N])
    }

    // =========================================================================
    // Memory
    // =========================================================================

    /// Load N contiguous elements.
    ///
    /// # Safety
    /// `src` must be valid for reading N elements. No alignment is required.
    #[inline(always)]
    unsafe fn load_ptr(src: *const T) -> Self {
        Self::from_array(unsafe { src.cast::<[T; N]>().read_unaligned() })
    }

    /// Store N contiguous elements.
    ///
    /// # Safety
    /// `dst` must be valid for writing N elements. No alignment is required.
    #[inline(always)]
    unsafe fn store_ptr(self, dst: *mut T) {
        unsafe { dst.cast::<[T; N]>().write_unaligned(self.to_array()) }
    }

    /// Store with a non-temporal hint. Visibility matches [`Register::store_ptr`].
    ///
    /// # Safety
    /// Same contract as [`Register::store_ptr`].
    #[inline(always)]
    unsafe fn stream_ptr(self, dst: *mut T) {
        unsafe { self.store_ptr(dst) }
    }

    /// Load lanes whose mask lane is nonzero; other lanes come from `fallback`.
    ///
    /// # Safety
    /// `src.add(i)` must be readable for every active lane `i`. Inactive lanes are never read.
    #[inline(always)]
    unsafe fn masked_load_ptr(src: *const T, mask: Self, fallback: Self) -> Self {
        let mask = mask.to_array();
        let fallback = fallback.to_array();
        Self::from_array(core::array::from_fn(|i| {
            if mask[i].is_true() {
                unsafe { src.add(i).read_unaligned() }
            } else {
                fallback[i]
            }
        }))
    }

    /// Store lanes whose mask lane is nonzero.
    ///
    /// # Safety
    /// `dst.add(i)` must be writable for every active lane `i`. Inactive lanes are never written.
    #[inline(always)]
    unsafe fn masked_store_ptr(self, dst: *mut T, mask: Self) {
        let mask = mask.to_array();
        let lanes = self.to_array();
        for i in 0..N {
            if mask[i].is_true() {
                unsafe { dst.add(i).write_unaligned(lanes[i]) }
            }
        }
    }

    /// Lane i reads `base[idx[i]]`.
    ///
    /// # Safety
    /// Every `base.offset(idx[i])` must be readable.
    #[inline(always)]
    unsafe fn gather_ptr(base: *const T, idx: [i32; N]) -> Self {
        Self::from_array(core::array::from_fn(|i| unsafe {
            base.offset(idx[i] as isize).read_unaligned()
        }))
    }

    /// Lane i writes `base[idx[i]]`, in lane order (the highest lane wins on duplicates).
    ///
    /// # Safety
    /// Every `base.offset(idx[i])` must be writable.
    #[inline(always)]
    unsafe fn scatter_ptr(self, base: *mut T, idx: [i32; N]) {
        let lanes = self.to_array();
        for i in 0..N {
            unsafe { base.offset(idx[i] as isize).write_unaligned(lanes[i]) }
        }
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::add))
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::sub))
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::mul))
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::div))
    }

    #[inline(always)]
    fn rem(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::rem))
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_array(map(self.to_array(), T::neg))
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::min))
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::max))
    }

    // =========================================================================
    // Bitwise
    // =========================================================================

    #[inline(always)]
    fn bit_and(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::bit_and))
    }

    #[inline(always)]
    fn bit_or(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::bit_or))
    }

    #[inline(always)]
    fn bit_xor(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), T::bit_xor))
    }

    #[inline(always)]
    fn bit_not(self) -> Self {
        Self::from_array(map(self.to_array(), T::bit_not))
    }

    // =========================================================================
    // Comparison (canonical 0/1 masks)
    // =========================================================================

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), |a, b| T::from_bool(a == b)))
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), |a, b| T::from_bool(a != b)))
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), |a, b| T::from_bool(a < b)))
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), |a, b| T::from_bool(a <= b)))
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), |a, b| T::from_bool(a > b)))
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        Self::from_array(zip(self.to_array(), rhs.to_array(), |a, b| T::from_bool(a >= b)))
    }

    // =========================================================================
    // Mask consumers
    // =========================================================================

    /// Lane i is `if_true[i]` where `mask[i]` is nonzero, else `if_false[i]`.
    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        let mask = mask.to_array();
        let a = if_true.to_array();
        let b = if_false.to_array();
        Self::from_array(core::array::from_fn(|i| if mask[i].is_true() { a[i] } else { b[i] }))
    }

    /// Bit i is set iff lane i is nonzero.
    #[inline(always)]
    fn movemask(self) -> u32 {
        let lanes = self.to_array();
        let mut bits = 0;
        for (i, lane) in lanes.iter().enumerate() {
            bits |= (lane.is_true() as u32) << i;
        }
        bits
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.movemask() != 0
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.movemask() == (1u32 << N) - 1
    }

    // =========================================================================
    // Horizontal reductions (pairwise tree on every backend)
    // =========================================================================

    #[inline(always)]
    fn reduce_add(self) -> T {
        tree_reduce(self.to_array(), T::add)
    }

    #[inline(always)]
    fn reduce_min(self) -> T {
        tree_reduce(self.to_array(), T::min)
    }

    #[inline(always)]
    fn reduce_max(self) -> T {
        tree_reduce(self.to_array(), T::max)
    }
}

/// Floating-point register operations.
pub trait FloatRegister<T: Float, const N: usize>: Register<T, N> {
    /// Newton–Raphson steps the caller applies to [`FloatRegister::rsqrt_estimate`].
    const RSQRT_STEPS: u32 = 0;
    /// Newton–Raphson steps the caller applies to [`FloatRegister::rcp_estimate`].
    const RCP_STEPS: u32 = 0;

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self::from_array(map(self.to_array(), T::sqrt))
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self::from_array(map(self.to_array(), T::abs))
    }

    #[inline(always)]
    fn floor(self) -> Self {
        Self::from_array(map(self.to_array(), T::floor))
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        Self::from_array(map(self.to_array(), T::ceil))
    }

    /// Round half to even.
    #[inline(always)]
    fn round(self) -> Self {
        Self::from_array(map(self.to_array(), T::round))
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        Self::from_array(map(self.to_array(), T::trunc))
    }

    /// `self * a + b`, single rounding.
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        let (s, a, b) = (self.to_array(), a.to_array(), b.to_array());
        Self::from_array(core::array::from_fn(|i| s[i].mul_add(a[i], b[i])))
    }

    /// Approximation of `1 / sqrt(self)`; exact unless `RSQRT_STEPS > 0`.
    #[inline(always)]
    fn rsqrt_estimate(self) -> Self {
        Self::from_array(map(self.to_array(), |a| T::ONE.div(a.sqrt())))
    }

    /// Approximation of `1 / self`; exact unless `RCP_STEPS > 0`.
    #[inline(always)]
    fn rcp_estimate(self) -> Self {
        Self::from_array(map(self.to_array(), |a| T::ONE.div(a)))
    }

    /// Logical left shift of each lane's bit pattern.
    #[inline(always)]
    fn shl_bits(self, count: u32) -> Self {
        Self::from_array(map(self.to_array(), |a| T::from_raw(a.to_raw() << count)))
    }

    /// Logical right shift of each lane's bit pattern.
    #[inline(always)]
    fn shr_bits(self, count: u32) -> Self {
        Self::from_array(map(self.to_array(), |a| T::from_raw(a.to_raw() >> count)))
    }
}

/// Integer register operations.
pub trait IntRegister<T: Int, const N: usize>: Register<T, N> {
    /// Shift every lane left, count taken modulo the lane width.
    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        Self::from_array(map(self.to_array(), |a| a.shl(count)))
    }

    /// Shift every lane right (arithmetic for signed lanes), count taken modulo the lane width.
    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        Self::from_array(map(self.to_array(), |a| a.shr(count)))
    }
}

/// f32 registers: half-float and saturating u8 conversion.
pub trait F32Register<const N: usize>: FloatRegister<f32, N> {
    #[inline(always)]
    fn to_half(self) -> [u16; N] {
        map(self.to_array(), f32_to_half)
    }

    #[inline(always)]
    fn from_half(bits: [u16; N]) -> Self {
        Self::from_array(map(bits, half_to_f32))
    }

    /// Round to nearest even, clamp to [0, 255]; NaN becomes 0.
    #[inline(always)]
    fn saturate_u8(self) -> [u8; N] {
        map(self.to_array(), |v| {
            let r = v.round_ties_even();
            if !(r > 0.0) {
                0
            } else if r >= 255.0 {
                255
            } else {
                r as u8
            }
        })
    }
}

/// i32 registers: saturating narrowing to i16.
pub trait I32Register<const N: usize>: IntRegister<i32, N> {
    #[inline(always)]
    fn saturate_i16(self) -> [i16; N] {
        map(self.to_array(), |v| v.clamp(i16::MIN as i32, i16::MAX as i32) as i16)
    }
}

// ============================================================================
// Selection table
// ============================================================================

/// Picks the register for `N` lanes of `Self`.
///
/// Implemented for N = 2, 4 and 8 on every element type.
pub trait Width<const N: usize>: Element {
    type Reg: Register<Self, N>;
}

macro_rules! lanes_only {
    ($($t:ty => [$($n:literal),*];)*) => {$($(
        impl Width<$n> for $t {
            type Reg = Lanes<$t, $n>;
        }
    )*)*};
}

lanes_only! {
    u8 => [2, 4, 8];
    u16 => [2, 4, 8];
    i64 => [2, 4, 8];
    u64 => [2, 4, 8];
    i16 => [2, 4];
    i32 => [2];
    u32 => [2, 8];
    f64 => [8];
}

// --- f32 ---

#[cfg(pixelflow_neon)]
impl Width<2> for f32 {
    type Reg = arm::F32x2;
}
#[cfg(not(pixelflow_neon))]
impl Width<2> for f32 {
    type Reg = Lanes<f32, 2>;
}

#[cfg(pixelflow_sse2)]
impl Width<4> for f32 {
    type Reg = x86::F32x4;
}
#[cfg(pixelflow_neon)]
impl Width<4> for f32 {
    type Reg = arm::F32x4;
}
#[cfg(not(any(pixelflow_sse2, pixelflow_neon)))]
impl Width<4> for f32 {
    type Reg = Lanes<f32, 4>;
}

#[cfg(pixelflow_avx2)]
impl Width<8> for f32 {
    type Reg = x86::F32x8;
}
#[cfg(not(pixelflow_avx2))]
impl Width<8> for f32 {
    type Reg = Lanes<f32, 8>;
}

// --- f64 ---

#[cfg(pixelflow_sse2)]
impl Width<2> for f64 {
    type Reg = x86::F64x2;
}
#[cfg(pixelflow_neon)]
impl Width<2> for f64 {
    type Reg = arm::F64x2;
}
#[cfg(not(any(pixelflow_sse2, pixelflow_neon)))]
impl Width<2> for f64 {
    type Reg = Lanes<f64, 2>;
}

#[cfg(pixelflow_avx2)]
impl Width<4> for f64 {
    type Reg = x86::F64x4;
}
#[cfg(not(pixelflow_avx2))]
impl Width<4> for f64 {
    type Reg = Lanes<f64, 4>;
}

// --- i32 ---

#[cfg(pixelflow_sse2)]
impl Width<4> for i32 {
    type Reg = x86::I32x4;
}
#[cfg(pixelflow_neon)]
impl Width<4> for i32 {
    type Reg = arm::I32x4;
}
#[cfg(not(any(pixelflow_sse2, pixelflow_neon)))]
impl Width<4> for i32 {
    type Reg = Lanes<i32, 4>;
}

#[cfg(pixelflow_avx2)]
impl Width<8> for i32 {
    type Reg = x86::I32x8;
}
#[cfg(not(pixelflow_avx2))]
impl Width<8> for i32 {
    type Reg = Lanes<i32, 8>;
}

// --- u32 ---

#[cfg(pixelflow_sse2)]
impl Width<4> for u32 {
    type Reg = x86::U32x4;
}
#[cfg(pixelflow_neon)]
impl Width<4> for u32 {
    type Reg = arm::U32x4;
}
#[cfg(not(any(pixelflow_sse2, pixelflow_neon)))]
impl Width<4> for u32 {
    type Reg = Lanes<u32, 4>;
}

// --- i16 ---

#[cfg(pixelflow_sse2)]
impl Width<8> for i16 {
    type Reg = x86::I16x8;
}
#[cfg(pixelflow_neon)]
impl Width<8> for i16 {
    type Reg = arm::I16x8;
}
#[cfg(not(any(pixelflow_sse2, pixelflow_neon)))]
impl Width<8> for i16 {
    type Reg = Lanes<i16, 8>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_reduce_pairs_upper_half_onto_lower() {
        // ((a0 - a2) - (a1 - a3)) exposes the pairing order.
        let r = tree_reduce([10, 1, 3, 2], |a: i32, b| a - b);
        assert_eq!(r, (10 - 3) - (1 - 2));
        let r = tree_reduce([1, 2, 3, 4, 5, 6, 7, 8], |a: i32, b| a - b);
        assert_eq!(r, ((1 - 5) - (3 - 7)) - ((2 - 6) - (4 - 8)));
    }

    #[test]
    fn lanes_defaults_follow_element_semantics() {
        let a = Lanes::<i32, 4>::from_array([1, -2, 3, i32::MAX]);
        let b = Lanes::<i32, 4>::splat(1);
        assert_eq!(a.add(b).to_array(), [2, -1, 4, i32::MIN]);
        assert_eq!(a.cmp_gt(b).to_array(), [0, 0, 1, 1]);
        assert_eq!(a.cmp_gt(b).movemask(), 0b1100);
        assert_eq!(a.shl(33).to_array(), [2, -4, 6, -2]);
    }
}
