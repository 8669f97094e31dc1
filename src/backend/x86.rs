//! x86_64 registers.
//!
//! SSE2 is the x86_64 baseline and provides the 128-bit registers. The 256-bit
//! registers need AVX2 (integer lane shifts and gathers). SSE4.1, FMA and F16C
//! only switch individual methods from the lane-by-lane default to a native
//! instruction.
//!
//! Hardware comparisons produce all-ones lanes; every `cmp_*` here masks the
//! result with `1` so callers see canonical 0/1 masks. Mask consumers first
//! compare against zero, so any nonzero lane counts as true.

use super::{F32Register, FloatRegister, I32Register, IntRegister, Register};
use core::arch::x86_64::*;
use core::fmt::{Debug, Formatter};

macro_rules! impl_debug {
    ($($reg:ident),*) => {$(
        impl Debug for $reg {
            fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!(stringify!($reg), "({:?})"), self.to_array())
            }
        }
    )*};
}

// ============================================================================
// F32x4 - 4 x f32 (SSE2)
// ============================================================================

/// 4-lane f32 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x4(__m128);

impl Register<f32, 4> for F32x4 {
    const BACKEND: &'static str = "sse2";
    const NATIVE: bool = true;

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        unsafe { Self(_mm_loadu_ps(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Self(_mm_set1_ps(value)) }
    }

    #[inline(always)]
    unsafe fn load_ptr(src: *const f32) -> Self {
        unsafe { Self(_mm_loadu_ps(src)) }
    }

    #[inline(always)]
    unsafe fn store_ptr(self, dst: *mut f32) {
        unsafe { _mm_storeu_ps(dst, self.0) }
    }

    #[inline(always)]
    unsafe fn stream_ptr(self, dst: *mut f32) {
        // movntps requires 16-byte alignment; fall back to a plain store otherwise.
        unsafe {
            if dst as usize % 16 == 0 {
                _mm_stream_ps(dst, self.0);
                _mm_sfence();
            } else {
                _mm_storeu_ps(dst, self.0);
            }
        }
    }

    #[cfg(pixelflow_avx2)]
    #[inline(always)]
    unsafe fn masked_load_ptr(src: *const f32, mask: Self, fallback: Self) -> Self {
        unsafe {
            let m = _mm_cmpneq_ps(mask.0, _mm_setzero_ps());
            let loaded = _mm_maskload_ps(src, _mm_castps_si128(m));
            Self(_mm_blendv_ps(fallback.0, loaded, m))
        }
    }

    #[cfg(pixelflow_avx2)]
    #[inline(always)]
    unsafe fn masked_store_ptr(self, dst: *mut f32, mask: Self) {
        unsafe {
            let m = _mm_cmpneq_ps(mask.0, _mm_setzero_ps());
            _mm_maskstore_ps(dst, _mm_castps_si128(m), self.0)
        }
    }

    #[cfg(pixelflow_avx2)]
    #[inline(always)]
    unsafe fn gather_ptr(base: *const f32, idx: [i32; 4]) -> Self {
        unsafe {
            let offsets = _mm_loadu_si128(idx.as_ptr() as *const __m128i);
            Self(_mm_i32gather_ps::<4>(base, offsets))
        }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm_add_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm_sub_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm_mul_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm_div_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Self(_mm_xor_ps(self.0, _mm_set1_ps(-0.0))) }
    }

    // minps/maxps return the second operand when either is NaN: a < b ? a : b.
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_and(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_or(self, rhs: Self) -> Self {
        unsafe { Self(_mm_or_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_xor_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_not(self) -> Self {
        unsafe { Self(_mm_xor_ps(self.0, _mm_castsi128_ps(_mm_set1_epi32(-1)))) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(_mm_cmpeq_ps(self.0, rhs.0), _mm_set1_ps(1.0))) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(_mm_cmpneq_ps(self.0, rhs.0), _mm_set1_ps(1.0))) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(_mm_cmplt_ps(self.0, rhs.0), _mm_set1_ps(1.0))) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(_mm_cmple_ps(self.0, rhs.0), _mm_set1_ps(1.0))) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(_mm_cmpgt_ps(self.0, rhs.0), _mm_set1_ps(1.0))) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(_mm_cmpge_ps(self.0, rhs.0), _mm_set1_ps(1.0))) }
    }

    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        unsafe {
            let m = _mm_cmpneq_ps(mask.0, _mm_setzero_ps());
            #[cfg(pixelflow_sse41)]
            {
                Self(_mm_blendv_ps(if_false.0, if_true.0, m))
            }
            #[cfg(not(pixelflow_sse41))]
            {
                Self(_mm_or_ps(_mm_and_ps(m, if_true.0), _mm_andnot_ps(m, if_false.0)))
            }
        }
    }

    #[inline(always)]
    fn movemask(self) -> u32 {
        unsafe { _mm_movemask_ps(_mm_cmpneq_ps(self.0, _mm_setzero_ps())) as u32 }
    }
}

impl FloatRegister<f32, 4> for F32x4 {
    // rsqrtps/rcpps give 12 bits; two steps reach the f32 rounding floor.
    const RSQRT_STEPS: u32 = 2;
    const RCP_STEPS: u32 = 2;

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self(_mm_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Self(_mm_andnot_ps(_mm_set1_ps(-0.0), self.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Self(_mm_floor_ps(self.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { Self(_mm_ceil_ps(self.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn round(self) -> Self {
        unsafe { Self(_mm_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn trunc(self) -> Self {
        unsafe { Self(_mm_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0)) }
    }

    #[cfg(pixelflow_fma)]
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        unsafe { Self(_mm_fmadd_ps(self.0, a.0, b.0)) }
    }

    #[inline(always)]
    fn rsqrt_estimate(self) -> Self {
        unsafe { Self(_mm_rsqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn rcp_estimate(self) -> Self {
        unsafe { Self(_mm_rcp_ps(self.0)) }
    }

    #[inline(always)]
    fn shl_bits(self, count: u32) -> Self {
        unsafe {
            let bits = _mm_sll_epi32(_mm_castps_si128(self.0), _mm_cvtsi32_si128(count as i32));
            Self(_mm_castsi128_ps(bits))
        }
    }

    #[inline(always)]
    fn shr_bits(self, count: u32) -> Self {
        unsafe {
            let bits = _mm_srl_epi32(_mm_castps_si128(self.0), _mm_cvtsi32_si128(count as i32));
            Self(_mm_castsi128_ps(bits))
        }
    }
}

impl F32Register<4> for F32x4 {
    #[cfg(pixelflow_f16c)]
    #[inline(always)]
    fn to_half(self) -> [u16; 4] {
        let mut out = [0u16; 8];
        unsafe {
            let h = _mm_cvtps_ph::<_MM_FROUND_TO_NEAREST_INT>(self.0);
            _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, h);
        }
        [out[0], out[1], out[2], out[3]]
    }

    #[cfg(pixelflow_f16c)]
    #[inline(always)]
    fn from_half(bits: [u16; 4]) -> Self {
        unsafe { Self(_mm_cvtph_ps(_mm_loadl_epi64(bits.as_ptr() as *const __m128i))) }
    }

    #[inline(always)]
    fn saturate_u8(self) -> [u8; 4] {
        unsafe {
            // maxps picks 0 for NaN; cvtps2dq rounds to nearest even under the default MXCSR.
            let clamped = _mm_min_ps(_mm_max_ps(self.0, _mm_setzero_ps()), _mm_set1_ps(255.0));
            let ints = _mm_cvtps_epi32(clamped);
            let words = _mm_packs_epi32(ints, ints);
            let bytes = _mm_packus_epi16(words, words);
            (_mm_cvtsi128_si32(bytes) as u32).to_le_bytes()
        }
    }
}

// ============================================================================
// F64x2 - 2 x f64 (SSE2)
// ============================================================================

/// 2-lane f64 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F64x2(__m128d);

impl Register<f64, 2> for F64x2 {
    const BACKEND: &'static str = "sse2";
    const NATIVE: bool = true;

    #[inline(always)]
    fn from_array(lanes: [f64; 2]) -> Self {
        unsafe { Self(_mm_loadu_pd(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f64; 2] {
        let mut out = [0.0f64; 2];
        unsafe { _mm_storeu_pd(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        unsafe { Self(_mm_set1_pd(value)) }
    }

    #[inline(always)]
    unsafe fn load_ptr(src: *const f64) -> Self {
        unsafe { Self(_mm_loadu_pd(src)) }
    }

    #[inline(always)]
    unsafe fn store_ptr(self, dst: *mut f64) {
        unsafe { _mm_storeu_pd(dst, self.0) }
    }

    #[inline(always)]
    unsafe fn stream_ptr(self, dst: *mut f64) {
        unsafe {
            if dst as usize % 16 == 0 {
                _mm_stream_pd(dst, self.0);
                _mm_sfence();
            } else {
                _mm_storeu_pd(dst, self.0);
            }
        }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm_add_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm_sub_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm_mul_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm_div_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Self(_mm_xor_pd(self.0, _mm_set1_pd(-0.0))) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm_min_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm_max_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_and(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_or(self, rhs: Self) -> Self {
        unsafe { Self(_mm_or_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_xor_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_not(self) -> Self {
        unsafe { Self(_mm_xor_pd(self.0, _mm_castsi128_pd(_mm_set1_epi32(-1)))) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_pd(_mm_cmpeq_pd(self.0, rhs.0), _mm_set1_pd(1.0))) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_pd(_mm_cmpneq_pd(self.0, rhs.0), _mm_set1_pd(1.0))) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_pd(_mm_cmplt_pd(self.0, rhs.0), _mm_set1_pd(1.0))) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_pd(_mm_cmple_pd(self.0, rhs.0), _mm_set1_pd(1.0))) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_pd(_mm_cmpgt_pd(self.0, rhs.0), _mm_set1_pd(1.0))) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_pd(_mm_cmpge_pd(self.0, rhs.0), _mm_set1_pd(1.0))) }
    }

    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        unsafe {
            let m = _mm_cmpneq_pd(mask.0, _mm_setzero_pd());
            #[cfg(pixelflow_sse41)]
            {
                Self(_mm_blendv_pd(if_false.0, if_true.0, m))
            }
            #[cfg(not(pixelflow_sse41))]
            {
                Self(_mm_or_pd(_mm_and_pd(m, if_true.0), _mm_andnot_pd(m, if_false.0)))
            }
        }
    }

    #[inline(always)]
    fn movemask(self) -> u32 {
        unsafe { _mm_movemask_pd(_mm_cmpneq_pd(self.0, _mm_setzero_pd())) as u32 }
    }
}

impl FloatRegister<f64, 2> for F64x2 {
    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self(_mm_sqrt_pd(self.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Self(_mm_andnot_pd(_mm_set1_pd(-0.0), self.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Self(_mm_floor_pd(self.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { Self(_mm_ceil_pd(self.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn round(self) -> Self {
        unsafe { Self(_mm_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn trunc(self) -> Self {
        unsafe { Self(_mm_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0)) }
    }

    #[cfg(pixelflow_fma)]
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        unsafe { Self(_mm_fmadd_pd(self.0, a.0, b.0)) }
    }

    #[inline(always)]
    fn shl_bits(self, count: u32) -> Self {
        unsafe {
            let bits = _mm_sll_epi64(_mm_castpd_si128(self.0), _mm_cvtsi32_si128(count as i32));
            Self(_mm_castsi128_pd(bits))
        }
    }

    #[inline(always)]
    fn shr_bits(self, count: u32) -> Self {
        unsafe {
            let bits = _mm_srl_epi64(_mm_castpd_si128(self.0), _mm_cvtsi32_si128(count as i32));
            Self(_mm_castsi128_pd(bits))
        }
    }
}

// ============================================================================
// I32x4 / U32x4 - 4 x 32-bit integers (SSE2)
// ============================================================================

/// 4-lane i32 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct I32x4(__m128i);

/// 4-lane u32 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct U32x4(__m128i);

// Shared by both 32-bit integer registers; only comparisons, min/max and
// right shifts differ in signedness.
macro_rules! impl_int32x4_common {
    ($reg:ident, $t:ty) => {
        #[inline(always)]
        fn from_array(lanes: [$t; 4]) -> Self {
            unsafe { Self(_mm_loadu_si128(lanes.as_ptr() as *const __m128i)) }
        }

        #[inline(always)]
        fn to_array(self) -> [$t; 4] {
            let mut out = [0 as $t; 4];
            unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, self.0) };
            out
        }

        #[inline(always)]
        fn splat(value: $t) -> Self {
            unsafe { Self(_mm_set1_epi32(value as i32)) }
        }

        #[inline(always)]
        unsafe fn load_ptr(src: *const $t) -> Self {
            unsafe { Self(_mm_loadu_si128(src as *const __m128i)) }
        }

        #[inline(always)]
        unsafe fn store_ptr(self, dst: *mut $t) {
            unsafe { _mm_storeu_si128(dst as *mut __m128i, self.0) }
        }

        #[inline(always)]
        unsafe fn stream_ptr(self, dst: *mut $t) {
            unsafe {
                if dst as usize % 16 == 0 {
                    _mm_stream_si128(dst as *mut __m128i, self.0);
                    _mm_sfence();
                } else {
                    _mm_storeu_si128(dst as *mut __m128i, self.0);
                }
            }
        }

        #[cfg(pixelflow_avx2)]
        #[inline(always)]
        unsafe fn gather_ptr(base: *const $t, idx: [i32; 4]) -> Self {
            unsafe {
                let offsets = _mm_loadu_si128(idx.as_ptr() as *const __m128i);
                Self(_mm_i32gather_epi32::<4>(base as *const i32, offsets))
            }
        }

        #[inline(always)]
        fn add(self, rhs: Self) -> Self {
            unsafe { Self(_mm_add_epi32(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn sub(self, rhs: Self) -> Self {
            unsafe { Self(_mm_sub_epi32(self.0, rhs.0)) }
        }

        #[cfg(pixelflow_sse41)]
        #[inline(always)]
        fn mul(self, rhs: Self) -> Self {
            unsafe { Self(_mm_mullo_epi32(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn neg(self) -> Self {
            unsafe { Self(_mm_sub_epi32(_mm_setzero_si128(), self.0)) }
        }

        #[inline(always)]
        fn bit_and(self, rhs: Self) -> Self {
            unsafe { Self(_mm_and_si128(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_or(self, rhs: Self) -> Self {
            unsafe { Self(_mm_or_si128(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_xor(self, rhs: Self) -> Self {
            unsafe { Self(_mm_xor_si128(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_not(self) -> Self {
            unsafe { Self(_mm_xor_si128(self.0, _mm_set1_epi32(-1))) }
        }

        #[inline(always)]
        fn cmp_eq(self, rhs: Self) -> Self {
            unsafe { Self(_mm_and_si128(_mm_cmpeq_epi32(self.0, rhs.0), _mm_set1_epi32(1))) }
        }

        #[inline(always)]
        fn cmp_ne(self, rhs: Self) -> Self {
            unsafe { Self(_mm_andnot_si128(_mm_cmpeq_epi32(self.0, rhs.0), _mm_set1_epi32(1))) }
        }

        #[inline(always)]
        fn cmp_lt(self, rhs: Self) -> Self {
            unsafe { Self(_mm_and_si128(Self::lt_mask(self.0, rhs.0), _mm_set1_epi32(1))) }
        }

        #[inline(always)]
        fn cmp_le(self, rhs: Self) -> Self {
            unsafe { Self(_mm_andnot_si128(Self::lt_mask(rhs.0, self.0), _mm_set1_epi32(1))) }
        }

        #[inline(always)]
        fn cmp_gt(self, rhs: Self) -> Self {
            unsafe { Self(_mm_and_si128(Self::lt_mask(rhs.0, self.0), _mm_set1_epi32(1))) }
        }

        #[inline(always)]
        fn cmp_ge(self, rhs: Self) -> Self {
            unsafe { Self(_mm_andnot_si128(Self::lt_mask(self.0, rhs.0), _mm_set1_epi32(1))) }
        }

        #[inline(always)]
        fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
            unsafe {
                let zero = _mm_cmpeq_epi32(mask.0, _mm_setzero_si128());
                Self(_mm_or_si128(
                    _mm_andnot_si128(zero, if_true.0),
                    _mm_and_si128(zero, if_false.0),
                ))
            }
        }

        #[inline(always)]
        fn movemask(self) -> u32 {
            unsafe {
                let zero = _mm_cmpeq_epi32(self.0, _mm_setzero_si128());
                (!_mm_movemask_ps(_mm_castsi128_ps(zero)) & 0xF) as u32
            }
        }
    };
}

impl I32x4 {
    #[inline(always)]
    unsafe fn lt_mask(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_cmplt_epi32(a, b) }
    }
}

impl U32x4 {
    // SSE2 only compares signed lanes; flipping the sign bit maps unsigned order onto signed.
    #[inline(always)]
    unsafe fn lt_mask(a: __m128i, b: __m128i) -> __m128i {
        unsafe {
            let bias = _mm_set1_epi32(i32::MIN);
            _mm_cmplt_epi32(_mm_xor_si128(a, bias), _mm_xor_si128(b, bias))
        }
    }
}

impl Register<i32, 4> for I32x4 {
    const BACKEND: &'static str = "sse2";
    const NATIVE: bool = true;

    impl_int32x4_common!(I32x4, i32);

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm_min_epi32(self.0, rhs.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm_max_epi32(self.0, rhs.0)) }
    }
}

impl Register<u32, 4> for U32x4 {
    const BACKEND: &'static str = "sse2";
    const NATIVE: bool = true;

    impl_int32x4_common!(U32x4, u32);

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm_min_epu32(self.0, rhs.0)) }
    }

    #[cfg(pixelflow_sse41)]
    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm_max_epu32(self.0, rhs.0)) }
    }
}

impl IntRegister<i32, 4> for I32x4 {
    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe { Self(_mm_sll_epi32(self.0, _mm_cvtsi32_si128((count & 31) as i32))) }
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe { Self(_mm_sra_epi32(self.0, _mm_cvtsi32_si128((count & 31) as i32))) }
    }
}

impl IntRegister<u32, 4> for U32x4 {
    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe { Self(_mm_sll_epi32(self.0, _mm_cvtsi32_si128((count & 31) as i32))) }
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe { Self(_mm_srl_epi32(self.0, _mm_cvtsi32_si128((count & 31) as i32))) }
    }
}

impl I32Register<4> for I32x4 {
    #[inline(always)]
    fn saturate_i16(self) -> [i16; 4] {
        let mut out = [0i16; 8];
        unsafe {
            let packed = _mm_packs_epi32(self.0, self.0);
            _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, packed);
        }
        [out[0], out[1], out[2], out[3]]
    }
}

// ============================================================================
// I16x8 - 8 x i16 (SSE2)
// ============================================================================

/// 8-lane i16 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct I16x8(__m128i);

impl Register<i16, 8> for I16x8 {
    const BACKEND: &'static str = "sse2";
    const NATIVE: bool = true;

    #[inline(always)]
    fn from_array(lanes: [i16; 8]) -> Self {
        unsafe { Self(_mm_loadu_si128(lanes.as_ptr() as *const __m128i)) }
    }

    #[inline(always)]
    fn to_array(self) -> [i16; 8] {
        let mut out = [0i16; 8];
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, self.0) };
        out
    }

    #[inline(always)]
    fn splat(value: i16) -> Self {
        unsafe { Self(_mm_set1_epi16(value)) }
    }

    #[inline(always)]
    unsafe fn load_ptr(src: *const i16) -> Self {
        unsafe { Self(_mm_loadu_si128(src as *const __m128i)) }
    }

    #[inline(always)]
    unsafe fn store_ptr(self, dst: *mut i16) {
        unsafe { _mm_storeu_si128(dst as *mut __m128i, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm_add_epi16(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm_sub_epi16(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm_mullo_epi16(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Self(_mm_sub_epi16(_mm_setzero_si128(), self.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm_min_epi16(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm_max_epi16(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_and(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_or(self, rhs: Self) -> Self {
        unsafe { Self(_mm_or_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_xor_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_not(self) -> Self {
        unsafe { Self(_mm_xor_si128(self.0, _mm_set1_epi16(-1))) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_si128(_mm_cmpeq_epi16(self.0, rhs.0), _mm_set1_epi16(1))) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self {
        unsafe { Self(_mm_andnot_si128(_mm_cmpeq_epi16(self.0, rhs.0), _mm_set1_epi16(1))) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_si128(_mm_cmplt_epi16(self.0, rhs.0), _mm_set1_epi16(1))) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        unsafe { Self(_mm_andnot_si128(_mm_cmpgt_epi16(self.0, rhs.0), _mm_set1_epi16(1))) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_si128(_mm_cmpgt_epi16(self.0, rhs.0), _mm_set1_epi16(1))) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        unsafe { Self(_mm_andnot_si128(_mm_cmplt_epi16(self.0, rhs.0), _mm_set1_epi16(1))) }
    }

    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        unsafe {
            let zero = _mm_cmpeq_epi16(mask.0, _mm_setzero_si128());
            Self(_mm_or_si128(
                _mm_andnot_si128(zero, if_true.0),
                _mm_and_si128(zero, if_false.0),
            ))
        }
    }

    #[inline(always)]
    fn movemask(self) -> u32 {
        unsafe {
            // Narrow the 16-bit lane masks to bytes so each lane owns one movemask bit.
            let zero = _mm_cmpeq_epi16(self.0, _mm_setzero_si128());
            let bytes = _mm_packs_epi16(zero, _mm_setzero_si128());
            (!_mm_movemask_epi8(bytes) & 0xFF) as u32
        }
    }
}

impl IntRegister<i16, 8> for I16x8 {
    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe { Self(_mm_sll_epi16(self.0, _mm_cvtsi32_si128((count & 15) as i32))) }
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe { Self(_mm_sra_epi16(self.0, _mm_cvtsi32_si128((count & 15) as i32))) }
    }
}

impl_debug!(F32x4, F64x2, I32x4, U32x4, I16x8);

// ============================================================================
// AVX2 - 256-bit registers
// ============================================================================

#[cfg(pixelflow_avx2)]
pub use avx2::{F32x8, F64x4, I32x8};

#[cfg(pixelflow_avx2)]
mod avx2 {
    use super::*;

    // ------------------------------------------------------------------------
    // F32x8
    // ------------------------------------------------------------------------

    /// 8-lane f32 register.
    #[derive(Copy, Clone)]
    #[repr(transparent)]
    pub struct F32x8(__m256);

    impl Register<f32, 8> for F32x8 {
        const BACKEND: &'static str = "avx2";
        const NATIVE: bool = true;

        #[inline(always)]
        fn from_array(lanes: [f32; 8]) -> Self {
            unsafe { Self(_mm256_loadu_ps(lanes.as_ptr())) }
        }

        #[inline(always)]
        fn to_array(self) -> [f32; 8] {
            let mut out = [0.0f32; 8];
            unsafe { _mm256_storeu_ps(out.as_mut_ptr(), self.0) };
            out
        }

        #[inline(always)]
        fn splat(value: f32) -> Self {
            unsafe { Self(_mm256_set1_ps(value)) }
        }

        #[inline(always)]
        unsafe fn load_ptr(src: *const f32) -> Self {
            unsafe { Self(_mm256_loadu_ps(src)) }
        }

        #[inline(always)]
        unsafe fn store_ptr(self, dst: *mut f32) {
            unsafe { _mm256_storeu_ps(dst, self.0) }
        }

        #[inline(always)]
        unsafe fn stream_ptr(self, dst: *mut f32) {
            unsafe {
                if dst as usize % 32 == 0 {
                    _mm256_stream_ps(dst, self.0);
                    _mm_sfence();
                } else {
                    _mm256_storeu_ps(dst, self.0);
                }
            }
        }

        #[inline(always)]
        unsafe fn masked_load_ptr(src: *const f32, mask: Self, fallback: Self) -> Self {
            unsafe {
                let m = _mm256_cmp_ps::<_CMP_NEQ_UQ>(mask.0, _mm256_setzero_ps());
                let loaded = _mm256_maskload_ps(src, _mm256_castps_si256(m));
                Self(_mm256_blendv_ps(fallback.0, loaded, m))
            }
        }

        #[inline(always)]
        unsafe fn masked_store_ptr(self, dst: *mut f32, mask: Self) {
            unsafe {
                let m = _mm256_cmp_ps::<_CMP_NEQ_UQ>(mask.0, _mm256_setzero_ps());
                _mm256_maskstore_ps(dst, _mm256_castps_si256(m), self.0)
            }
        }

        #[inline(always)]
        unsafe fn gather_ptr(base: *const f32, idx: [i32; 8]) -> Self {
            unsafe {
                let offsets = _mm256_loadu_si256(idx.as_ptr() as *const __m256i);
                Self(_mm256_i32gather_ps::<4>(base, offsets))
            }
        }

        #[inline(always)]
        fn add(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_add_ps(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn sub(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_sub_ps(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn mul(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_mul_ps(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn div(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_div_ps(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn neg(self) -> Self {
            unsafe { Self(_mm256_xor_ps(self.0, _mm256_set1_ps(-0.0))) }
        }

        #[inline(always)]
        fn min(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_min_ps(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn max(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_max_ps(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_and(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_ps(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_or(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_or_ps(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_xor(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_xor_ps(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_not(self) -> Self {
            unsafe { Self(_mm256_xor_ps(self.0, _mm256_castsi256_ps(_mm256_set1_epi32(-1)))) }
        }

        #[inline(always)]
        fn cmp_eq(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_ps(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, rhs.0), _mm256_set1_ps(1.0))) }
        }

        #[inline(always)]
        fn cmp_ne(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_ps(_mm256_cmp_ps::<_CMP_NEQ_UQ>(self.0, rhs.0), _mm256_set1_ps(1.0))) }
        }

        #[inline(always)]
        fn cmp_lt(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_ps(_mm256_cmp_ps::<_CMP_LT_OQ>(self.0, rhs.0), _mm256_set1_ps(1.0))) }
        }

        #[inline(always)]
        fn cmp_le(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_ps(_mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0), _mm256_set1_ps(1.0))) }
        }

        #[inline(always)]
        fn cmp_gt(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_ps(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0), _mm256_set1_ps(1.0))) }
        }

        #[inline(always)]
        fn cmp_ge(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_ps(_mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0), _mm256_set1_ps(1.0))) }
        }

        #[inline(always)]
        fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
            unsafe {
                let m = _mm256_cmp_ps::<_CMP_NEQ_UQ>(mask.0, _mm256_setzero_ps());
                Self(_mm256_blendv_ps(if_false.0, if_true.0, m))
            }
        }

        #[inline(always)]
        fn movemask(self) -> u32 {
            unsafe { _mm256_movemask_ps(_mm256_cmp_ps::<_CMP_NEQ_UQ>(self.0, _mm256_setzero_ps())) as u32 }
        }
    }

    impl FloatRegister<f32, 8> for F32x8 {
        const RSQRT_STEPS: u32 = 2;
        const RCP_STEPS: u32 = 2;

        #[inline(always)]
        fn sqrt(self) -> Self {
            unsafe { Self(_mm256_sqrt_ps(self.0)) }
        }

        #[inline(always)]
        fn abs(self) -> Self {
            unsafe { Self(_mm256_andnot_ps(_mm256_set1_ps(-0.0), self.0)) }
        }

        #[inline(always)]
        fn floor(self) -> Self {
            unsafe { Self(_mm256_floor_ps(self.0)) }
        }

        #[inline(always)]
        fn ceil(self) -> Self {
            unsafe { Self(_mm256_ceil_ps(self.0)) }
        }

        #[inline(always)]
        fn round(self) -> Self {
            unsafe { Self(_mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0)) }
        }

        #[inline(always)]
        fn trunc(self) -> Self {
            unsafe { Self(_mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0)) }
        }

        #[cfg(pixelflow_fma)]
        #[inline(always)]
        fn mul_add(self, a: Self, b: Self) -> Self {
            unsafe { Self(_mm256_fmadd_ps(self.0, a.0, b.0)) }
        }

        #[inline(always)]
        fn rsqrt_estimate(self) -> Self {
            unsafe { Self(_mm256_rsqrt_ps(self.0)) }
        }

        #[inline(always)]
        fn rcp_estimate(self) -> Self {
            unsafe { Self(_mm256_rcp_ps(self.0)) }
        }

        #[inline(always)]
        fn shl_bits(self, count: u32) -> Self {
            unsafe {
                let bits = _mm256_sll_epi32(_mm256_castps_si256(self.0), _mm_cvtsi32_si128(count as i32));
                Self(_mm256_castsi256_ps(bits))
            }
        }

        #[inline(always)]
        fn shr_bits(self, count: u32) -> Self {
            unsafe {
                let bits = _mm256_srl_epi32(_mm256_castps_si256(self.0), _mm_cvtsi32_si128(count as i32));
                Self(_mm256_castsi256_ps(bits))
            }
        }
    }

    impl F32Register<8> for F32x8 {
        #[cfg(pixelflow_f16c)]
        #[inline(always)]
        fn to_half(self) -> [u16; 8] {
            let mut out = [0u16; 8];
            unsafe {
                let h = _mm256_cvtps_ph::<_MM_FROUND_TO_NEAREST_INT>(self.0);
                _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, h);
            }
            out
        }

        #[cfg(pixelflow_f16c)]
        #[inline(always)]
        fn from_half(bits: [u16; 8]) -> Self {
            unsafe { Self(_mm256_cvtph_ps(_mm_loadu_si128(bits.as_ptr() as *const __m128i))) }
        }
    }

    // ------------------------------------------------------------------------
    // F64x4
    // ------------------------------------------------------------------------

    /// 4-lane f64 register.
    #[derive(Copy, Clone)]
    #[repr(transparent)]
    pub struct F64x4(__m256d);

    impl Register<f64, 4> for F64x4 {
        const BACKEND: &'static str = "avx2";
        const NATIVE: bool = true;

        #[inline(always)]
        fn from_array(lanes: [f64; 4]) -> Self {
            unsafe { Self(_mm256_loadu_pd(lanes.as_ptr())) }
        }

        #[inline(always)]
        fn to_array(self) -> [f64; 4] {
            let mut out = [0.0f64; 4];
            unsafe { _mm256_storeu_pd(out.as_mut_ptr(), self.0) };
            out
        }

        #[inline(always)]
        fn splat(value: f64) -> Self {
            unsafe { Self(_mm256_set1_pd(value)) }
        }

        #[inline(always)]
        unsafe fn load_ptr(src: *const f64) -> Self {
            unsafe { Self(_mm256_loadu_pd(src)) }
        }

        #[inline(always)]
        unsafe fn store_ptr(self, dst: *mut f64) {
            unsafe { _mm256_storeu_pd(dst, self.0) }
        }

        #[inline(always)]
        unsafe fn masked_load_ptr(src: *const f64, mask: Self, fallback: Self) -> Self {
            unsafe {
                let m = _mm256_cmp_pd::<_CMP_NEQ_UQ>(mask.0, _mm256_setzero_pd());
                let loaded = _mm256_maskload_pd(src, _mm256_castpd_si256(m));
                Self(_mm256_blendv_pd(fallback.0, loaded, m))
            }
        }

        #[inline(always)]
        unsafe fn masked_store_ptr(self, dst: *mut f64, mask: Self) {
            unsafe {
                let m = _mm256_cmp_pd::<_CMP_NEQ_UQ>(mask.0, _mm256_setzero_pd());
                _mm256_maskstore_pd(dst, _mm256_castpd_si256(m), self.0)
            }
        }

        #[inline(always)]
        unsafe fn gather_ptr(base: *const f64, idx: [i32; 4]) -> Self {
            unsafe {
                let offsets = _mm_loadu_si128(idx.as_ptr() as *const __m128i);
                Self(_mm256_i32gather_pd::<8>(base, offsets))
            }
        }

        #[inline(always)]
        fn add(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_add_pd(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn sub(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_sub_pd(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn mul(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_mul_pd(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn div(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_div_pd(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn neg(self) -> Self {
            unsafe { Self(_mm256_xor_pd(self.0, _mm256_set1_pd(-0.0))) }
        }

        #[inline(always)]
        fn min(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_min_pd(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn max(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_max_pd(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_and(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_pd(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_or(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_or_pd(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_xor(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_xor_pd(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_not(self) -> Self {
            unsafe { Self(_mm256_xor_pd(self.0, _mm256_castsi256_pd(_mm256_set1_epi32(-1)))) }
        }

        #[inline(always)]
        fn cmp_eq(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_pd(_mm256_cmp_pd::<_CMP_EQ_OQ>(self.0, rhs.0), _mm256_set1_pd(1.0))) }
        }

        #[inline(always)]
        fn cmp_ne(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_pd(_mm256_cmp_pd::<_CMP_NEQ_UQ>(self.0, rhs.0), _mm256_set1_pd(1.0))) }
        }

        #[inline(always)]
        fn cmp_lt(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_pd(_mm256_cmp_pd::<_CMP_LT_OQ>(self.0, rhs.0), _mm256_set1_pd(1.0))) }
        }

        #[inline(always)]
        fn cmp_le(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_pd(_mm256_cmp_pd::<_CMP_LE_OQ>(self.0, rhs.0), _mm256_set1_pd(1.0))) }
        }

        #[inline(always)]
        fn cmp_gt(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_pd(_mm256_cmp_pd::<_CMP_GT_OQ>(self.0, rhs.0), _mm256_set1_pd(1.0))) }
        }

        #[inline(always)]
        fn cmp_ge(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_pd(_mm256_cmp_pd::<_CMP_GE_OQ>(self.0, rhs.0), _mm256_set1_pd(1.0))) }
        }

        #[inline(always)]
        fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
            unsafe {
                let m = _mm256_cmp_pd::<_CMP_NEQ_UQ>(mask.0, _mm256_setzero_pd());
                Self(_mm256_blendv_pd(if_false.0, if_true.0, m))
            }
        }

        #[inline(always)]
        fn movemask(self) -> u32 {
            unsafe { _mm256_movemask_pd(_mm256_cmp_pd::<_CMP_NEQ_UQ>(self.0, _mm256_setzero_pd())) as u32 }
        }
    }

    impl FloatRegister<f64, 4> for F64x4 {
        #[inline(always)]
        fn sqrt(self) -> Self {
            unsafe { Self(_mm256_sqrt_pd(self.0)) }
        }

        #[inline(always)]
        fn abs(self) -> Self {
            unsafe { Self(_mm256_andnot_pd(_mm256_set1_pd(-0.0), self.0)) }
        }

        #[inline(always)]
        fn floor(self) -> Self {
            unsafe { Self(_mm256_floor_pd(self.0)) }
        }

        #[inline(always)]
        fn ceil(self) -> Self {
            unsafe { Self(_mm256_ceil_pd(self.0)) }
        }

        #[inline(always)]
        fn round(self) -> Self {
            unsafe { Self(_mm256_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0)) }
        }

        #[inline(always)]
        fn trunc(self) -> Self {
            unsafe { Self(_mm256_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0)) }
        }

        #[cfg(pixelflow_fma)]
        #[inline(always)]
        fn mul_add(self, a: Self, b: Self) -> Self {
            unsafe { Self(_mm256_fmadd_pd(self.0, a.0, b.0)) }
        }

        #[inline(always)]
        fn shl_bits(self, count: u32) -> Self {
            unsafe {
                let bits = _mm256_sll_epi64(_mm256_castpd_si256(self.0), _mm_cvtsi32_si128(count as i32));
                Self(_mm256_castsi256_pd(bits))
            }
        }

        #[inline(always)]
        fn shr_bits(self, count: u32) -> Self {
            unsafe {
                let bits = _mm256_srl_epi64(_mm256_castpd_si256(self.0), _mm_cvtsi32_si128(count as i32));
                Self(_mm256_castsi256_pd(bits))
            }
        }
    }

    // ------------------------------------------------------------------------
    // I32x8
    // ------------------------------------------------------------------------

    /// 8-lane i32 register.
    #[derive(Copy, Clone)]
    #[repr(transparent)]
    pub struct I32x8(__m256i);

    impl Register<i32, 8> for I32x8 {
        const BACKEND: &'static str = "avx2";
        const NATIVE: bool = true;

        #[inline(always)]
        fn from_array(lanes: [i32; 8]) -> Self {
            unsafe { Self(_mm256_loadu_si256(lanes.as_ptr() as *const __m256i)) }
        }

        #[inline(always)]
        fn to_array(self) -> [i32; 8] {
            let mut out = [0i32; 8];
            unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, self.0) };
            out
        }

        #[inline(always)]
        fn splat(value: i32) -> Self {
            unsafe { Self(_mm256_set1_epi32(value)) }
        }

        #[inline(always)]
        unsafe fn load_ptr(src: *const i32) -> Self {
            unsafe { Self(_mm256_loadu_si256(src as *const __m256i)) }
        }

        #[inline(always)]
        unsafe fn store_ptr(self, dst: *mut i32) {
            unsafe { _mm256_storeu_si256(dst as *mut __m256i, self.0) }
        }

        #[inline(always)]
        unsafe fn masked_load_ptr(src: *const i32, mask: Self, fallback: Self) -> Self {
            unsafe {
                let zero = _mm256_cmpeq_epi32(mask.0, _mm256_setzero_si256());
                let active = _mm256_xor_si256(zero, _mm256_set1_epi32(-1));
                let loaded = _mm256_maskload_epi32(src, active);
                Self(_mm256_blendv_epi8(loaded, fallback.0, zero))
            }
        }

        #[inline(always)]
        unsafe fn masked_store_ptr(self, dst: *mut i32, mask: Self) {
            unsafe {
                let zero = _mm256_cmpeq_epi32(mask.0, _mm256_setzero_si256());
                let active = _mm256_xor_si256(zero, _mm256_set1_epi32(-1));
                _mm256_maskstore_epi32(dst, active, self.0)
            }
        }

        #[inline(always)]
        unsafe fn gather_ptr(base: *const i32, idx: [i32; 8]) -> Self {
            unsafe {
                let offsets = _mm256_loadu_si256(idx.as_ptr() as *const __m256i);
                Self(_mm256_i32gather_epi32::<4>(base, offsets))
            }
        }

        #[inline(always)]
        fn add(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_add_epi32(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn sub(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_sub_epi32(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn mul(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_mullo_epi32(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn neg(self) -> Self {
            unsafe { Self(_mm256_sub_epi32(_mm256_setzero_si256(), self.0)) }
        }

        #[inline(always)]
        fn min(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_min_epi32(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn max(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_max_epi32(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_and(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_si256(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_or(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_or_si256(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_xor(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_xor_si256(self.0, rhs.0)) }
        }

        #[inline(always)]
        fn bit_not(self) -> Self {
            unsafe { Self(_mm256_xor_si256(self.0, _mm256_set1_epi32(-1))) }
        }

        #[inline(always)]
        fn cmp_eq(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_si256(_mm256_cmpeq_epi32(self.0, rhs.0), _mm256_set1_epi32(1))) }
        }

        #[inline(always)]
        fn cmp_ne(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_andnot_si256(_mm256_cmpeq_epi32(self.0, rhs.0), _mm256_set1_epi32(1))) }
        }

        // AVX2 has only a signed greater-than; the other orders are derived from it.
        #[inline(always)]
        fn cmp_lt(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_si256(_mm256_cmpgt_epi32(rhs.0, self.0), _mm256_set1_epi32(1))) }
        }

        #[inline(always)]
        fn cmp_le(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_andnot_si256(_mm256_cmpgt_epi32(self.0, rhs.0), _mm256_set1_epi32(1))) }
        }

        #[inline(always)]
        fn cmp_gt(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_si256(_mm256_cmpgt_epi32(self.0, rhs.0), _mm256_set1_epi32(1))) }
        }

        #[inline(always)]
        fn cmp_ge(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_andnot_si256(_mm256_cmpgt_epi32(rhs.0, self.0), _mm256_set1_epi32(1))) }
        }

        #[inline(always)]
        fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
            unsafe {
                let zero = _mm256_cmpeq_epi32(mask.0, _mm256_setzero_si256());
                Self(_mm256_blendv_epi8(if_true.0, if_false.0, zero))
            }
        }

        #[inline(always)]
        fn movemask(self) -> u32 {
            unsafe {
                let zero = _mm256_cmpeq_epi32(self.0, _mm256_setzero_si256());
                (!_mm256_movemask_ps(_mm256_castsi256_ps(zero)) & 0xFF) as u32
            }
        }
    }

    impl IntRegister<i32, 8> for I32x8 {
        #[inline(always)]
        fn shl(self, count: u32) -> Self {
            unsafe { Self(_mm256_sll_epi32(self.0, _mm_cvtsi32_si128((count & 31) as i32))) }
        }

        #[inline(always)]
        fn shr(self, count: u32) -> Self {
            unsafe { Self(_mm256_sra_epi32(self.0, _mm_cvtsi32_si128((count & 31) as i32))) }
        }
    }

    // packssdw works within 128-bit halves; the lane-by-lane default keeps lane order.
    impl I32Register<8> for I32x8 {}

    impl_debug!(F32x8, F64x4, I32x8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_are_canonical() {
        let a = F32x4::from_array([1.0, f32::NAN, 3.0, -0.0]);
        let b = F32x4::from_array([1.0, f32::NAN, 2.0, 0.0]);
        assert_eq!(a.cmp_eq(b).to_array(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(a.cmp_ne(b).to_array(), [0.0, 1.0, 1.0, 0.0]);
        assert_eq!(a.cmp_gt(b).movemask(), 0b0100);

        let i = I32x4::from_array([-1, 0, 5, i32::MIN]);
        assert_eq!(i.cmp_lt(I32x4::splat(0)).to_array(), [1, 0, 0, 1]);
        let u = U32x4::from_array([u32::MAX, 0, 5, 1 << 31]);
        assert_eq!(u.cmp_gt(U32x4::splat(4)).to_array(), [1, 0, 1, 1]);
        assert_eq!(u.cmp_le(U32x4::splat(5)).to_array(), [0, 1, 1, 0]);
    }

    #[test]
    fn test_select_treats_nonzero_as_true() {
        let mask = F32x4::from_array([2.0, 0.0, f32::NAN, -0.0]);
        let r = F32x4::select(mask, F32x4::splat(1.0), F32x4::splat(9.0));
        assert_eq!(r.to_array(), [1.0, 9.0, 1.0, 9.0]);

        let mask = I16x8::from_array([0, 3, 0, -1, 0, 0, 0, 7]);
        assert_eq!(mask.movemask(), 0b1000_1010);
    }

    #[test]
    fn test_min_matches_scalar_rule_on_nan() {
        let a = F32x4::from_array([f32::NAN, 1.0, -0.0, 2.0]);
        let b = F32x4::from_array([1.0, f32::NAN, 0.0, 1.0]);
        let m = a.min(b).to_array();
        assert_eq!(m[0], 1.0);
        assert!(m[1].is_nan());
        assert_eq!(m[2].to_bits(), 0.0f32.to_bits());
        assert_eq!(m[3], 1.0);
    }

    #[test]
    fn test_stream_store_visible_after_fence() {
        #[repr(align(16))]
        struct Aligned([f32; 8]);
        let mut buf = Aligned([0.0; 8]);
        unsafe {
            F32x4::splat(3.0).stream_ptr(buf.0.as_mut_ptr());
            F32x4::splat(4.0).stream_ptr(buf.0.as_mut_ptr().add(3));
        }
        assert_eq!(buf.0, [3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0, 0.0]);
    }

    #[test]
    fn test_saturate_u8_matches_default() {
        let v = F32x4::from_array([255.4, 255.6, -0.4, 2.5]);
        assert_eq!(v.saturate_u8(), [255, 255, 0, 2]);
        let v = F32x4::from_array([f32::NAN, 1e10, -1e10, 0.5]);
        assert_eq!(v.saturate_u8(), [0, 255, 0, 0]);
    }
}
