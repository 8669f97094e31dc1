//! The pack type: construction, lane access, memory and arithmetic.
//!
//! Comparisons and mask operations live in [`crate::mask`], float rounding and
//! roots in [`crate::math`], conversions in [`crate::convert`] and lane
//! permutations in [`crate::swizzle`]. They are all inherent methods of
//! [`Pack`], split by topic.

use crate::backend::{IntRegister, Register, Width};
use crate::element::{Element, Int};
use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;
use core::ops::*;

/// N lanes of `T` held in register `R`.
///
/// `R` defaults to the register the selection table picks for `(T, N)`. Name
/// it explicitly (for example [`Lanes`](crate::backend::Lanes)) to force a
/// particular backend. Packs are plain values: `Copy`, `Send` and `Sync`.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Pack<T, const N: usize, R = <T as Width<N>>::Reg>
where
    T: Width<N>,
    R: Register<T, N>,
{
    reg: R,
    _lane: PhantomData<T>,
}

// ============================================================================
// Construction and lane access
// ============================================================================

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    /// Name of the backend holding this pack (`"lanes"`, `"sse2"`, ...).
    pub const BACKEND: &'static str = R::BACKEND;

    /// Lane count.
    pub const LANES: usize = N;

    #[inline(always)]
    pub fn from_register(reg: R) -> Self {
        Self { reg, _lane: PhantomData }
    }

    #[inline(always)]
    pub fn into_register(self) -> R {
        self.reg
    }

    /// Every lane set to `value`.
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self::from_register(R::splat(value))
    }

    #[inline(always)]
    pub fn from_array(lanes: [T; N]) -> Self {
        Self::from_register(R::from_array(lanes))
    }

    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        self.reg.to_array()
    }

    /// `[start, start + 1, start + 2, ...]`.
    #[inline(always)]
    pub fn sequential(start: T) -> Self {
        Self::from_array(core::array::from_fn(|i| start.add(T::from_index(i))))
    }

    /// Lane 0.
    #[inline(always)]
    pub fn x(self) -> T {
        self.to_array()[0]
    }

    /// Lane 1.
    #[inline(always)]
    pub fn y(self) -> T {
        const { assert!(N > 1, "pack has no y lane") };
        self.to_array()[1]
    }

    /// Lane 2; only compiles for packs with at least 3 lanes.
    #[inline(always)]
    pub fn z(self) -> T {
        const { assert!(N > 2, "pack has no z lane") };
        self.to_array()[2]
    }

    /// Lane 3; only compiles for packs with at least 4 lanes.
    #[inline(always)]
    pub fn w(self) -> T {
        const { assert!(N > 3, "pack has no w lane") };
        self.to_array()[3]
    }

    /// Lane `index`.
    ///
    /// # Panics
    /// If `index >= N`.
    #[inline(always)]
    pub fn extract(self, index: usize) -> T {
        self.to_array()[index]
    }

    /// Copy of `self` with lane `index` set to `value`.
    ///
    /// # Panics
    /// If `index >= N`.
    #[inline(always)]
    pub fn replace(self, index: usize, value: T) -> Self {
        let mut lanes = self.to_array();
        lanes[index] = value;
        Self::from_array(lanes)
    }
}

// ============================================================================
// Memory
// ============================================================================

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    /// Reads the first N elements of `src`. No alignment is required.
    ///
    /// # Panics
    /// If `src` holds fewer than N elements.
    #[inline(always)]
    pub fn load(src: &[T]) -> Self {
        assert!(src.len() >= N, "load of {N} lanes from a slice of {}", src.len());
        unsafe { Self::load_ptr(src.as_ptr()) }
    }

    /// Writes the lanes to the first N elements of `dst`.
    ///
    /// # Panics
    /// If `dst` holds fewer than N elements.
    #[inline(always)]
    pub fn store(self, dst: &mut [T]) {
        assert!(dst.len() >= N, "store of {N} lanes into a slice of {}", dst.len());
        unsafe { self.store_ptr(dst.as_mut_ptr()) }
    }

    /// # Safety
    /// `src` must be valid for reading N elements. No alignment is required.
    #[inline(always)]
    pub unsafe fn load_ptr(src: *const T) -> Self {
        Self::from_register(unsafe { R::load_ptr(src) })
    }

    /// # Safety
    /// `dst` must be valid for writing N elements. No alignment is required.
    #[inline(always)]
    pub unsafe fn store_ptr(self, dst: *mut T) {
        unsafe { self.reg.store_ptr(dst) }
    }

    /// [`Pack::store`] with a non-temporal hint.
    ///
    /// The data is visible to subsequent loads exactly as after `store`.
    #[inline(always)]
    pub fn stream_store(self, dst: &mut [T]) {
        assert!(dst.len() >= N, "store of {N} lanes into a slice of {}", dst.len());
        unsafe { self.reg.stream_ptr(dst.as_mut_ptr()) }
    }

    /// Loads the lanes whose `mask` lane is nonzero; the rest come from `fallback`.
    ///
    /// Inactive lanes are never read, so `src` only has to reach the highest
    /// active lane.
    ///
    /// # Panics
    /// If an active lane lies beyond the end of `src`.
    #[inline(always)]
    pub fn masked_load(src: &[T], mask: Self, fallback: Self) -> Self {
        let needed = active_span(mask.reg.movemask());
        assert!(needed <= src.len(), "masked load needs {needed} elements, slice has {}", src.len());
        Self::from_register(unsafe { R::masked_load_ptr(src.as_ptr(), mask.reg, fallback.reg) })
    }

    /// Stores the lanes whose `mask` lane is nonzero. Other elements of `dst` are untouched.
    ///
    /// # Panics
    /// If an active lane lies beyond the end of `dst`.
    #[inline(always)]
    pub fn masked_store(self, dst: &mut [T], mask: Self) {
        let needed = active_span(mask.reg.movemask());
        assert!(needed <= dst.len(), "masked store needs {needed} elements, slice has {}", dst.len());
        unsafe { self.reg.masked_store_ptr(dst.as_mut_ptr(), mask.reg) }
    }

    /// Lane i is `base[idx[i]]`.
    ///
    /// # Panics
    /// If any index is negative or not less than `base.len()`.
    #[inline(always)]
    pub fn gather(base: &[T], idx: Pack<i32, N>) -> Self
    where
        i32: Width<N>,
    {
        let idx = idx.to_array();
        check_indices(&idx, base.len());
        Self::from_register(unsafe { R::gather_ptr(base.as_ptr(), idx) })
    }

    /// # Safety
    /// Every `base.offset(idx[i])` must be readable.
    #[inline(always)]
    pub unsafe fn gather_unchecked(base: *const T, idx: Pack<i32, N>) -> Self
    where
        i32: Width<N>,
    {
        Self::from_register(unsafe { R::gather_ptr(base, idx.to_array()) })
    }

    /// Writes lane i to `base[idx[i]]` in lane order, so the highest lane wins
    /// when indices repeat.
    ///
    /// # Panics
    /// If any index is negative or not less than `base.len()`.
    #[inline(always)]
    pub fn scatter(self, base: &mut [T], idx: Pack<i32, N>)
    where
        i32: Width<N>,
    {
        let idx = idx.to_array();
        check_indices(&idx, base.len());
        unsafe { self.reg.scatter_ptr(base.as_mut_ptr(), idx) }
    }

    /// # Safety
    /// Every `base.offset(idx[i])` must be writable.
    #[inline(always)]
    pub unsafe fn scatter_unchecked(self, base: *mut T, idx: Pack<i32, N>)
    where
        i32: Width<N>,
    {
        unsafe { self.reg.scatter_ptr(base, idx.to_array()) }
    }
}

/// Number of elements a masked access touches: one past the highest active lane.
#[inline(always)]
fn active_span(bits: u32) -> usize {
    (32 - bits.leading_zeros()) as usize
}

#[inline(always)]
fn check_indices(idx: &[i32], len: usize) {
    for (lane, &i) in idx.iter().enumerate() {
        assert!(
            i >= 0 && (i as usize) < len,
            "lane {lane} index {i} out of bounds for length {len}"
        );
    }
}

// ============================================================================
// Arithmetic, bitwise and reductions
// ============================================================================

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    #[inline(always)]
    pub fn add(self, rhs: Self) -> Self {
        Self::from_register(self.reg.add(rhs.reg))
    }

    #[inline(always)]
    pub fn sub(self, rhs: Self) -> Self {
        Self::from_register(self.reg.sub(rhs.reg))
    }

    #[inline(always)]
    pub fn mul(self, rhs: Self) -> Self {
        Self::from_register(self.reg.mul(rhs.reg))
    }

    /// Integer division by zero panics.
    #[inline(always)]
    pub fn div(self, rhs: Self) -> Self {
        Self::from_register(self.reg.div(rhs.reg))
    }

    /// Remainder with the sign of `self` (Rust `%`).
    #[inline(always)]
    pub fn rem(self, rhs: Self) -> Self {
        Self::from_register(self.reg.rem(rhs.reg))
    }

    #[inline(always)]
    pub fn neg(self) -> Self {
        Self::from_register(self.reg.neg())
    }

    /// `self < rhs ? self : rhs` per lane. A NaN in either operand selects `rhs`.
    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        Self::from_register(self.reg.min(rhs.reg))
    }

    /// `self > rhs ? self : rhs` per lane. A NaN in either operand selects `rhs`.
    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        Self::from_register(self.reg.max(rhs.reg))
    }

    /// `max(self, lo)` then `min(.., hi)`.
    #[inline(always)]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    #[inline(always)]
    pub fn bit_and(self, rhs: Self) -> Self {
        Self::from_register(self.reg.bit_and(rhs.reg))
    }

    #[inline(always)]
    pub fn bit_or(self, rhs: Self) -> Self {
        Self::from_register(self.reg.bit_or(rhs.reg))
    }

    #[inline(always)]
    pub fn bit_xor(self, rhs: Self) -> Self {
        Self::from_register(self.reg.bit_xor(rhs.reg))
    }

    #[inline(always)]
    pub fn bit_not(self) -> Self {
        Self::from_register(self.reg.bit_not())
    }

    /// Sum of all lanes, combined pairwise (lane i with lane i + N/2) on every backend.
    #[inline(always)]
    pub fn reduce_add(self) -> T {
        self.reg.reduce_add()
    }

    #[inline(always)]
    pub fn reduce_min(self) -> T {
        self.reg.reduce_min()
    }

    #[inline(always)]
    pub fn reduce_max(self) -> T {
        self.reg.reduce_max()
    }
}

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Int + Width<N>,
    R: IntRegister<T, N>,
{
    /// Shift every lane left; `count` is taken modulo the lane width.
    #[inline(always)]
    pub fn shl(self, count: u32) -> Self {
        Self::from_register(self.reg.shl(count))
    }

    /// Shift every lane right (arithmetic for signed lanes); `count` is taken modulo the lane width.
    #[inline(always)]
    pub fn shr(self, count: u32) -> Self {
        Self::from_register(self.reg.shr(count))
    }
}

// ============================================================================
// Operator Implementations
// ============================================================================

macro_rules! impl_binary_op {
    ($($trait:ident, $method:ident, $assign:ident, $assign_method:ident;)*) => {$(
        impl<T, const N: usize, R> $trait for Pack<T, N, R>
        where
            T: Width<N>,
            R: Register<T, N>,
        {
            type Output = Self;
            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Pack::$method(self, rhs)
            }
        }

        impl<T, const N: usize, R> $assign for Pack<T, N, R>
        where
            T: Width<N>,
            R: Register<T, N>,
        {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = Pack::$method(*self, rhs);
            }
        }
    )*};
}

impl_binary_op! {
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign;
    Rem, rem, RemAssign, rem_assign;
}

// Bitwise operators map onto the bit_* methods.
macro_rules! impl_bit_op {
    ($($trait:ident, $method:ident, $target:ident;)*) => {$(
        impl<T, const N: usize, R> $trait for Pack<T, N, R>
        where
            T: Width<N>,
            R: Register<T, N>,
        {
            type Output = Self;
            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                self.$target(rhs)
            }
        }
    )*};
}

impl_bit_op! {
    BitAnd, bitand, bit_and;
    BitOr, bitor, bit_or;
    BitXor, bitxor, bit_xor;
}

impl<T, const N: usize, R> Neg for Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Pack::neg(self)
    }
}

impl<T, const N: usize, R> Not for Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        self.bit_not()
    }
}

impl<T, const N: usize, R> Shl<u32> for Pack<T, N, R>
where
    T: Int + Width<N>,
    R: IntRegister<T, N>,
{
    type Output = Self;
    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        Pack::shl(self, count)
    }
}

impl<T, const N: usize, R> Shr<u32> for Pack<T, N, R>
where
    T: Int + Width<N>,
    R: IntRegister<T, N>,
{
    type Output = Self;
    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        Pack::shr(self, count)
    }
}

// ============================================================================
// Standard traits
// ============================================================================

impl<T, const N: usize, R> Default for Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    fn default() -> Self {
        Self::splat(T::ZERO)
    }
}

impl<T, const N: usize, R> PartialEq for Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<T, const N: usize, R> Debug for Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Pack<{}, {}>({:?})", T::NAME, N, self.to_array())
    }
}

impl<T, const N: usize, R> From<[T; N]> for Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    fn from(lanes: [T; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<T, const N: usize, R> From<Pack<T, N, R>> for [T; N]
where
    T: Width<N>,
    R: Register<T, N>,
{
    fn from(pack: Pack<T, N, R>) -> Self {
        pack.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Lanes;

    #[test]
    fn test_add_lanes() {
        let a = Pack::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]);
        let b = Pack::<f32, 4>::from_array([10.0, 20.0, 30.0, 40.0]);
        assert_eq!((a + b).to_array(), [11.0, 22.0, 33.0, 44.0]);
        let c = Pack::<i32, 4>::from_array([1, 2, 3, 4]) + Pack::splat(10);
        assert_eq!(c.to_array(), [11, 12, 13, 14]);
    }

    #[test]
    fn test_rem_follows_scalar_rust() {
        assert_eq!(Pack::<f32, 2>::splat(5.5).rem(Pack::splat(2.0)).x(), 1.5);
        let r = Pack::<i32, 4>::from_array([7, -7, 7, -7]) % Pack::from_array([3, 3, -3, -3]);
        assert_eq!(r.to_array(), [1, -1, 1, -1]);
    }

    #[test]
    #[should_panic]
    fn test_integer_division_by_zero_panics() {
        let _ = Pack::<i32, 4>::splat(1) / Pack::from_array([1, 1, 0, 1]);
    }

    #[test]
    fn test_named_lanes_and_replace() {
        let v = Pack::<f32, 4>::sequential(1.0);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));
        let v = v.replace(2, 9.0);
        assert_eq!(v.extract(2), 9.0);
        assert_eq!(Pack::<u8, 8>::sequential(250).to_array()[7], 1);
    }

    #[test]
    fn test_load_store_unaligned() {
        let data = [0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0];
        let p = Pack::<f64, 4>::load(&data[1..]);
        assert_eq!(p.to_array(), [1.0, 2.0, 3.0, 4.0]);
        let mut out = [0.0f64; 5];
        p.store(&mut out[1..]);
        assert_eq!(out, [0.0, 1.0, 2.0, 3.0, 4.0]);
        let mut streamed = [0.0f64; 4];
        p.stream_store(&mut streamed);
        assert_eq!(streamed, p.to_array());
    }

    #[test]
    #[should_panic(expected = "load of 4 lanes")]
    fn test_short_load_panics() {
        Pack::<f32, 4>::load(&[1.0, 2.0]);
    }

    #[test]
    fn test_masked_access_touches_only_active_lanes() {
        let mask = Pack::<f32, 4>::from_array([1.0, 0.0, 1.0, 0.0]);
        // Only three elements: lane 3 is inactive so it is never read.
        let src = [5.0f32, 6.0, 7.0];
        let p = Pack::masked_load(&src, mask, Pack::splat(-1.0));
        assert_eq!(p.to_array(), [5.0, -1.0, 7.0, -1.0]);

        let mut dst = [0.0f32; 3];
        Pack::splat(2.0).masked_store(&mut dst, mask);
        assert_eq!(dst, [2.0, 0.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "masked load needs 4 elements")]
    fn test_masked_load_checks_active_lanes() {
        let mask = Pack::<i32, 4>::from_array([0, 0, 0, 1]);
        Pack::masked_load(&[1, 2, 3], mask, Pack::splat(0));
    }

    #[test]
    fn test_gather_scatter() {
        let table = [10i32, 11, 12, 13, 14, 15, 16, 17];
        let idx = Pack::<i32, 4>::from_array([7, 0, 3, 3]);
        assert_eq!(Pack::<i32, 4>::gather(&table, idx).to_array(), [17, 10, 13, 13]);

        let mut out = [0.0f32; 4];
        Pack::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]).scatter(&mut out, idx.min(Pack::splat(3)));
        // Lanes 2 and 3 both write out[3]; the higher lane wins.
        assert_eq!(out, [2.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_gather_rejects_negative_index() {
        Pack::<f32, 2>::gather(&[1.0, 2.0], Pack::from_array([0, -1]));
    }

    #[test]
    fn test_reductions_are_pairwise() {
        let v = Pack::<f32, 4>::from_array([1.0e8, 1.0, -1.0e8, 1.0]);
        // (1e8 + -1e8) + (1 + 1) regardless of backend.
        assert_eq!(v.reduce_add(), 2.0);
        let i = Pack::<i32, 8>::from_array([3, -9, 4, 12, 0, 5, -2, 7]);
        assert_eq!(i.reduce_min(), -9);
        assert_eq!(i.reduce_max(), 12);
    }

    #[test]
    fn test_integer_shifts_wrap_count() {
        let v = Pack::<u32, 4>::from_array([1, 2, 0x8000_0000, 3]);
        assert_eq!((v << 33).to_array(), [2, 4, 0, 6]);
        assert_eq!((v >> 31).to_array(), [0, 0, 1, 0]);
        let s = Pack::<i16, 8>::splat(-16) >> 2;
        assert_eq!(s.to_array(), [-4; 8]);
    }

    #[test]
    fn test_float_bitwise_uses_ieee_pattern() {
        let v = Pack::<f32, 4>::from_array([1.0, -2.0, 0.0, -0.0]);
        let flipped = v ^ Pack::splat(-0.0);
        assert_eq!(flipped.to_array(), [-1.0, 2.0, -0.0, 0.0]);
        assert_eq!((!!v).to_array(), v.to_array());
    }

    #[test]
    fn test_native_matches_lanes() {
        let a = [1.5f32, -2.25, 1.0e-3, 7.0];
        let b = [0.5f32, 4.0, -3.0, 7.0];
        let native = Pack::<f32, 4>::from_array(a) / Pack::from_array(b);
        let lanes = Pack::<f32, 4, Lanes<f32, 4>>::from_array(a) / Pack::from_array(b);
        assert_eq!(native.to_array(), lanes.to_array());
    }

    #[test]
    fn test_debug_names_lane_type() {
        let v = Pack::<i32, 2>::from_array([1, 2]);
        assert_eq!(format!("{v:?}"), "Pack<i32, 2>([1, 2])");
    }
}
