//! aarch64 NEON registers.
//!
//! NEON is part of the aarch64 baseline, so every register here is available
//! whenever `pixelflow_neon` is set. Comparisons return all-ones lanes in the
//! hardware; they are ANDed with the bit pattern of `1` to give canonical masks.
//! Mask consumers test lanes against zero, so any nonzero lane is true.
//!
//! The reciprocal estimates are only 8 bits, hence more Newton–Raphson steps
//! than on x86.

use super::{F32Register, FloatRegister, I32Register, IntRegister, Register};
use core::arch::aarch64::*;
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
// F32x4
// ============================================================================

/// 4-lane f32 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x4(float32x4_t);

impl F32x4 {
    #[inline(always)]
    fn from_mask(mask: uint32x4_t) -> Self {
        unsafe { Self(vreinterpretq_f32_u32(vandq_u32(mask, vreinterpretq_u32_f32(vdupq_n_f32(1.0))))) }
    }

    #[inline(always)]
    fn zero_lanes(self) -> uint32x4_t {
        unsafe { vceqq_f32(self.0, vdupq_n_f32(0.0)) }
    }

    #[inline(always)]
    fn bits(self) -> uint32x4_t {
        unsafe { vreinterpretq_u32_f32(self.0) }
    }

    #[inline(always)]
    fn from_bits(bits: uint32x4_t) -> Self {
        unsafe { Self(vreinterpretq_f32_u32(bits)) }
    }
}

impl Register<f32, 4> for F32x4 {
    const BACKEND: &'static str = "neon";
    const NATIVE: bool = true;

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        unsafe { Self(vld1q_f32(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { vst1q_f32(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Self(vdupq_n_f32(value)) }
    }

    #[inline(always)]
    unsafe fn load_ptr(src: *const f32) -> Self {
        unsafe { Self(vld1q_f32(src)) }
    }

    #[inline(always)]
    unsafe fn store_ptr(self, dst: *mut f32) {
        unsafe { vst1q_f32(dst, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(vaddq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(vsubq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(vmulq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(vdivq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Self(vnegq_f32(self.0)) }
    }

    // fminq/fmaxq propagate NaN; a compare-and-select keeps the a < b ? a : b rule.
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(vbslq_f32(vcltq_f32(self.0, rhs.0), self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(vbslq_f32(vcgtq_f32(self.0, rhs.0), self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_and(self, rhs: Self) -> Self {
        unsafe { Self::from_bits(vandq_u32(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn bit_or(self, rhs: Self) -> Self {
        unsafe { Self::from_bits(vorrq_u32(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn bit_xor(self, rhs: Self) -> Self {
        unsafe { Self::from_bits(veorq_u32(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn bit_not(self) -> Self {
        unsafe { Self::from_bits(vmvnq_u32(self.bits())) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vceqq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vmvnq_u32(vceqq_f32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vcltq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vcleq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vcgtq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vcgeq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        unsafe { Self(vbslq_f32(mask.zero_lanes(), if_false.0, if_true.0)) }
    }

    #[inline(always)]
    fn movemask(self) -> u32 {
        unsafe {
            let weights = vld1q_u32([1u32, 2, 4, 8].as_ptr());
            let zero_bits = vaddvq_u32(vandq_u32(self.zero_lanes(), weights));
            !zero_bits & 0xF
        }
    }
}

impl FloatRegister<f32, 4> for F32x4 {
    // frsqrte/frecpe give 8 bits; three steps reach the f32 rounding floor.
    const RSQRT_STEPS: u32 = 3;
    const RCP_STEPS: u32 = 3;

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self(vsqrtq_f32(self.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Self(vabsq_f32(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Self(vrndmq_f32(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { Self(vrndpq_f32(self.0)) }
    }

    #[inline(always)]
    fn round(self) -> Self {
        unsafe { Self(vrndnq_f32(self.0)) }
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        unsafe { Self(vrndq_f32(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        unsafe { Self(vfmaq_f32(b.0, self.0, a.0)) }
    }

    #[inline(always)]
    fn rsqrt_estimate(self) -> Self {
        unsafe { Self(vrsqrteq_f32(self.0)) }
    }

    #[inline(always)]
    fn rcp_estimate(self) -> Self {
        unsafe { Self(vrecpeq_f32(self.0)) }
    }

    #[inline(always)]
    fn shl_bits(self, count: u32) -> Self {
        unsafe { Self::from_bits(vshlq_u32(self.bits(), vdupq_n_s32(count as i32))) }
    }

    #[inline(always)]
    fn shr_bits(self, count: u32) -> Self {
        unsafe { Self::from_bits(vshlq_u32(self.bits(), vdupq_n_s32(-(count as i32)))) }
    }
}

impl F32Register<4> for F32x4 {}

// ============================================================================
// F32x2
// ============================================================================

/// 2-lane f32 register (64-bit D register).
///
/// Only arithmetic and rounding are native; comparisons and masks take the
/// lane-by-lane defaults.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x2(float32x2_t);

impl Register<f32, 2> for F32x2 {
    const BACKEND: &'static str = "neon";
    const NATIVE: bool = true;

    #[inline(always)]
    fn from_array(lanes: [f32; 2]) -> Self {
        unsafe { Self(vld1_f32(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 2] {
        let mut out = [0.0f32; 2];
        unsafe { vst1_f32(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Self(vdup_n_f32(value)) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(vadd_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(vsub_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(vmul_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(vdiv_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Self(vneg_f32(self.0)) }
    }
}

impl FloatRegister<f32, 2> for F32x2 {
    const RSQRT_STEPS: u32 = 3;
    const RCP_STEPS: u32 = 3;

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self(vsqrt_f32(self.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Self(vabs_f32(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Self(vrndm_f32(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { Self(vrndp_f32(self.0)) }
    }

    #[inline(always)]
    fn round(self) -> Self {
        unsafe { Self(vrndn_f32(self.0)) }
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        unsafe { Self(vrnd_f32(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        unsafe { Self(vfma_f32(b.0, self.0, a.0)) }
    }

    #[inline(always)]
    fn rsqrt_estimate(self) -> Self {
        unsafe { Self(vrsqrte_f32(self.0)) }
    }

    #[inline(always)]
    fn rcp_estimate(self) -> Self {
        unsafe { Self(vrecpe_f32(self.0)) }
    }
}

impl F32Register<2> for F32x2 {}

// ============================================================================
// F64x2
// ============================================================================

/// 2-lane f64 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F64x2(float64x2_t);

impl F64x2 {
    #[inline(always)]
    fn from_mask(mask: uint64x2_t) -> Self {
        unsafe { Self(vreinterpretq_f64_u64(vandq_u64(mask, vreinterpretq_u64_f64(vdupq_n_f64(1.0))))) }
    }

    #[inline(always)]
    fn zero_lanes(self) -> uint64x2_t {
        unsafe { vceqq_f64(self.0, vdupq_n_f64(0.0)) }
    }

    #[inline(always)]
    fn bits(self) -> uint64x2_t {
        unsafe { vreinterpretq_u64_f64(self.0) }
    }

    #[inline(always)]
    fn from_bits(bits: uint64x2_t) -> Self {
        unsafe { Self(vreinterpretq_f64_u64(bits)) }
    }
}

impl Register<f64, 2> for F64x2 {
    const BACKEND: &'static str = "neon";
    const NATIVE: bool = true;

    #[inline(always)]
    fn from_array(lanes: [f64; 2]) -> Self {
        unsafe { Self(vld1q_f64(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f64; 2] {
        let mut out = [0.0f64; 2];
        unsafe { vst1q_f64(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        unsafe { Self(vdupq_n_f64(value)) }
    }

    #[inline(always)]
    unsafe fn load_ptr(src: *const f64) -> Self {
        unsafe { Self(vld1q_f64(src)) }
    }

    #[inline(always)]
    unsafe fn store_ptr(self, dst: *mut f64) {
        unsafe { vst1q_f64(dst, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(vaddq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(vsubq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(vmulq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(vdivq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Self(vnegq_f64(self.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(vbslq_f64(vcltq_f64(self.0, rhs.0), self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(vbslq_f64(vcgtq_f64(self.0, rhs.0), self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bit_and(self, rhs: Self) -> Self {
        unsafe { Self::from_bits(vandq_u64(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn bit_or(self, rhs: Self) -> Self {
        unsafe { Self::from_bits(vorrq_u64(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn bit_xor(self, rhs: Self) -> Self {
        unsafe { Self::from_bits(veorq_u64(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn bit_not(self) -> Self {
        unsafe { Self::from_bits(veorq_u64(self.bits(), vdupq_n_u64(u64::MAX))) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vceqq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(veorq_u64(vceqq_f64(self.0, rhs.0), vdupq_n_u64(u64::MAX))) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vcltq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vcleq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vcgtq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        unsafe { Self::from_mask(vcgeq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        unsafe { Self(vbslq_f64(mask.zero_lanes(), if_false.0, if_true.0)) }
    }

    #[inline(always)]
    fn movemask(self) -> u32 {
        unsafe {
            let weights = vld1q_u64([1u64, 2].as_ptr());
            let zero_bits = vaddvq_u64(vandq_u64(self.zero_lanes(), weights)) as u32;
            !zero_bits & 0x3
        }
    }
}

impl FloatRegister<f64, 2> for F64x2 {
    const RSQRT_STEPS: u32 = 4;
    const RCP_STEPS: u32 = 4;

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self(vsqrtq_f64(self.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Self(vabsq_f64(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Self(vrndmq_f64(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { Self(vrndpq_f64(self.0)) }
    }

    #[inline(always)]
    fn round(self) -> Self {
        unsafe { Self(vrndnq_f64(self.0)) }
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        unsafe { Self(vrndq_f64(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        unsafe { Self(vfmaq_f64(b.0, self.0, a.0)) }
    }

    #[inline(always)]
    fn rsqrt_estimate(self) -> Self {
        unsafe { Self(vrsqrteq_f64(self.0)) }
    }

    #[inline(always)]
    fn rcp_estimate(self) -> Self {
        unsafe { Self(vrecpeq_f64(self.0)) }
    }

    #[inline(always)]
    fn shl_bits(self, count: u32) -> Self {
        unsafe { Self::from_bits(vshlq_u64(self.bits(), vdupq_n_s64(count as i64))) }
    }

    #[inline(always)]
    fn shr_bits(self, count: u32) -> Self {
        unsafe { Self::from_bits(vshlq_u64(self.bits(), vdupq_n_s64(-(count as i64)))) }
    }
}

// ============================================================================
// Integer registers
// ============================================================================

// The three integer registers differ only in intrinsic suffixes, so they share
// one body. `$mask` is the unsigned vector the compares return.
macro_rules! impl_int_register {
    (
        $reg:ident($vec:ty), $t:ty, $n:literal, $mask:ty($mt:ty), bits: $bits:literal,
        ld: $ld:ident, st: $st:ident, dup: $dup:ident, dup_mask: $dup_mask:ident,
        dup_shift: $dup_shift:ident($shift_t:ty), from_mask: $from_mask:path,
        add: $add:ident, sub: $sub:ident, mul: $mul:ident, min: $min:ident, max: $max:ident,
        and: $and:ident, orr: $orr:ident, eor: $eor:ident, mvn: $mvn:ident,
        mand: $mand:ident, meor: $meor:ident, addv: $addv:ident, ld_mask: $ld_mask:ident,
        ceq: $ceq:ident, clt: $clt:ident, cle: $cle:ident, cgt: $cgt:ident, cge: $cge:ident,
        tst: $tst:ident, bsl: $bsl:ident, shl: $shl:ident,
    ) => {
        #[derive(Copy, Clone)]
        #[repr(transparent)]
        pub struct $reg($vec);

        impl $reg {
            #[inline(always)]
            fn from_mask(mask: $mask) -> Self {
                unsafe { Self($from_mask($mand(mask, $dup_mask(1)))) }
            }
        }

        impl Register<$t, $n> for $reg {
            const BACKEND: &'static str = "neon";
            const NATIVE: bool = true;

            #[inline(always)]
            fn from_array(lanes: [$t; $n]) -> Self {
                unsafe { Self($ld(lanes.as_ptr())) }
            }

            #[inline(always)]
            fn to_array(self) -> [$t; $n] {
                let mut out = [0 as $t; $n];
                unsafe { $st(out.as_mut_ptr(), self.0) };
                out
            }

            #[inline(always)]
            fn splat(value: $t) -> Self {
                unsafe { Self($dup(value)) }
            }

            #[inline(always)]
            unsafe fn load_ptr(src: *const $t) -> Self {
                unsafe { Self($ld(src)) }
            }

            #[inline(always)]
            unsafe fn store_ptr(self, dst: *mut $t) {
                unsafe { $st(dst, self.0) }
            }

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                unsafe { Self($add(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                unsafe { Self($sub(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                unsafe { Self($mul(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn neg(self) -> Self {
                unsafe { Self($sub($dup(0), self.0)) }
            }

            #[inline(always)]
            fn min(self, rhs: Self) -> Self {
                unsafe { Self($min(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn max(self, rhs: Self) -> Self {
                unsafe { Self($max(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn bit_and(self, rhs: Self) -> Self {
                unsafe { Self($and(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn bit_or(self, rhs: Self) -> Self {
                unsafe { Self($orr(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn bit_xor(self, rhs: Self) -> Self {
                unsafe { Self($eor(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn bit_not(self) -> Self {
                unsafe { Self($mvn(self.0)) }
            }

            #[inline(always)]
            fn cmp_eq(self, rhs: Self) -> Self {
                unsafe { Self::from_mask($ceq(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_ne(self, rhs: Self) -> Self {
                unsafe { Self::from_mask($meor($ceq(self.0, rhs.0), $dup_mask(1))) }
            }

            #[inline(always)]
            fn cmp_lt(self, rhs: Self) -> Self {
                unsafe { Self::from_mask($clt(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_le(self, rhs: Self) -> Self {
                unsafe { Self::from_mask($cle(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_gt(self, rhs: Self) -> Self {
                unsafe { Self::from_mask($cgt(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_ge(self, rhs: Self) -> Self {
                unsafe { Self::from_mask($cge(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
                unsafe { Self($bsl($tst(mask.0, mask.0), if_true.0, if_false.0)) }
            }

            #[inline(always)]
            fn movemask(self) -> u32 {
                let weights: [$mt; $n] = core::array::from_fn(|i| (1 as $mt) << i);
                unsafe {
                    let nonzero = $tst(self.0, self.0);
                    $addv($mand(nonzero, $ld_mask(weights.as_ptr()))) as u32
                }
            }
        }

        impl IntRegister<$t, $n> for $reg {
            #[inline(always)]
            fn shl(self, count: u32) -> Self {
                unsafe { Self($shl(self.0, $dup_shift((count & ($bits - 1)) as $shift_t))) }
            }

            // A negative count shifts right: arithmetic for signed vectors, logical for unsigned.
            #[inline(always)]
            fn shr(self, count: u32) -> Self {
                unsafe { Self($shl(self.0, $dup_shift(-((count & ($bits - 1)) as $shift_t)))) }
            }
        }

        impl_debug!($reg);
    };
}

#[inline(always)]
fn same_u32(v: uint32x4_t) -> uint32x4_t {
    v
}

impl_int_register! {
    I32x4(int32x4_t), i32, 4, uint32x4_t(u32), bits: 32,
    ld: vld1q_s32, st: vst1q_s32, dup: vdupq_n_s32, dup_mask: vdupq_n_u32,
    dup_shift: vdupq_n_s32(i32), from_mask: vreinterpretq_s32_u32,
    add: vaddq_s32, sub: vsubq_s32, mul: vmulq_s32, min: vminq_s32, max: vmaxq_s32,
    and: vandq_s32, orr: vorrq_s32, eor: veorq_s32, mvn: vmvnq_s32,
    mand: vandq_u32, meor: veorq_u32, addv: vaddvq_u32, ld_mask: vld1q_u32,
    ceq: vceqq_s32, clt: vcltq_s32, cle: vcleq_s32, cgt: vcgtq_s32, cge: vcgeq_s32,
    tst: vtstq_s32, bsl: vbslq_s32, shl: vshlq_s32,
}

impl_int_register! {
    U32x4(uint32x4_t), u32, 4, uint32x4_t(u32), bits: 32,
    ld: vld1q_u32, st: vst1q_u32, dup: vdupq_n_u32, dup_mask: vdupq_n_u32,
    dup_shift: vdupq_n_s32(i32), from_mask: same_u32,
    add: vaddq_u32, sub: vsubq_u32, mul: vmulq_u32, min: vminq_u32, max: vmaxq_u32,
    and: vandq_u32, orr: vorrq_u32, eor: veorq_u32, mvn: vmvnq_u32,
    mand: vandq_u32, meor: veorq_u32, addv: vaddvq_u32, ld_mask: vld1q_u32,
    ceq: vceqq_u32, clt: vcltq_u32, cle: vcleq_u32, cgt: vcgtq_u32, cge: vcgeq_u32,
    tst: vtstq_u32, bsl: vbslq_u32, shl: vshlq_u32,
}

impl_int_register! {
    I16x8(int16x8_t), i16, 8, uint16x8_t(u16), bits: 16,
    ld: vld1q_s16, st: vst1q_s16, dup: vdupq_n_s16, dup_mask: vdupq_n_u16,
    dup_shift: vdupq_n_s16(i16), from_mask: vreinterpretq_s16_u16,
    add: vaddq_s16, sub: vsubq_s16, mul: vmulq_s16, min: vminq_s16, max: vmaxq_s16,
    and: vandq_s16, orr: vorrq_s16, eor: veorq_s16, mvn: vmvnq_s16,
    mand: vandq_u16, meor: veorq_u16, addv: vaddvq_u16, ld_mask: vld1q_u16,
    ceq: vceqq_s16, clt: vcltq_s16, cle: vcleq_s16, cgt: vcgtq_s16, cge: vcgeq_s16,
    tst: vtstq_s16, bsl: vbslq_s16, shl: vshlq_s16,
}

impl I32Register<4> for I32x4 {
    #[inline(always)]
    fn saturate_i16(self) -> [i16; 4] {
        let mut out = [0i16; 4];
        unsafe { vst1_s16(out.as_mut_ptr(), vqmovn_s32(self.0)) };
        out
    }
}

impl_debug!(F32x4, F32x2, F64x2);
