//! Lane element types.
//!
//! Every pack lane is one of a closed set of primitive types. The traits here
//! give the generic register code a uniform scalar vocabulary:
//!
//! - [`Element`]: arithmetic with the element's native semantics (IEEE-754 for
//!   floats, wraparound for integers), bit patterns and the canonical 0/1 mask
//!   values.
//! - [`Int`]: integer-only operations (raw bitwise ops, lane shifts).
//! - [`Float`]: IEEE-754 layout constants, rounding and the polynomial tables
//!   used by the transcendental engine.
//!
//! Method names deliberately mirror the pack operations, so call them through
//! the trait (`<T as Element>::min(a, b)`) when `T` is concrete.

use bytemuck::Pod;
use core::fmt::Debug;
use core::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// A primitive that can live in a pack lane.
pub trait Element:
    sealed::Sealed + Pod + Default + PartialEq + PartialOrd + Debug + Send + Sync + 'static
{
    /// Unsigned integer with the same width, used for bit-level views.
    type Bits: Int;

    /// Additive identity, also the canonical "false" mask lane.
    const ZERO: Self;
    /// Multiplicative identity, also the canonical "true" mask lane.
    const ONE: Self;
    /// Rust name of the type, used in reports.
    const NAME: &'static str;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    /// Integer division by zero panics like scalar Rust.
    fn div(self, rhs: Self) -> Self;
    fn rem(self, rhs: Self) -> Self;
    fn neg(self) -> Self;

    /// `self < rhs ? self : rhs`; a NaN in either operand selects `rhs`.
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        if self < rhs {
            self
        } else {
            rhs
        }
    }

    /// `self > rhs ? self : rhs`; a NaN in either operand selects `rhs`.
    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        if self > rhs {
            self
        } else {
            rhs
        }
    }

    fn to_bits(self) -> Self::Bits;
    fn from_bits(bits: Self::Bits) -> Self;

    #[inline(always)]
    fn bit_and(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits().and(rhs.to_bits()))
    }

    #[inline(always)]
    fn bit_or(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits().or(rhs.to_bits()))
    }

    #[inline(always)]
    fn bit_xor(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits().xor(rhs.to_bits()))
    }

    #[inline(always)]
    fn bit_not(self) -> Self {
        Self::from_bits(self.to_bits().not())
    }

    /// Mask interpretation of a lane: anything numerically nonzero is true.
    ///
    /// NaN is nonzero and therefore true; `-0.0` compares equal to zero and is false.
    #[inline(always)]
    fn is_true(self) -> bool {
        self != Self::ZERO
    }

    /// Canonical mask lane for `b`.
    #[inline(always)]
    fn from_bool(b: bool) -> Self {
        if b {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    /// `i as Self`.
    fn from_index(i: usize) -> Self;
}

/// Integer lane types.
pub trait Int: Element + Eq + Hash {
    /// Lane width in bits.
    const BITS: u32;

    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;
    fn not(self) -> Self;

    /// Left shift, count taken modulo [`Int::BITS`].
    fn shl(self, count: u32) -> Self;
    /// Right shift (arithmetic for signed, logical for unsigned), count taken modulo [`Int::BITS`].
    fn shr(self, count: u32) -> Self;
}

/// IEEE-754 binary floating-point lane types.
pub trait Float: Element {
    /// Explicitly stored mantissa bits.
    const MANTISSA_BITS: u32;
    /// Exponent bias.
    const EXPONENT_BIAS: i32;
    /// All-ones exponent field (infinities and NaNs).
    const EXPONENT_MAX: u64;

    const INFINITY: Self;
    const NEG_INFINITY: Self;
    const NAN: Self;
    /// Smallest positive normal value.
    const MIN_POSITIVE: Self;

    /// 2^f on [0, 1), lowest degree first, p(0) = 1.
    const FAST_EXP2: &'static [Self];
    /// 2^f on [-0.5, 0.5], lowest degree first.
    const PRECISE_EXP2: &'static [Self];
    /// log2(1 + y) on [0, 1), lowest degree first, p(0) = 0.
    const FAST_LOG2: &'static [Self];
    /// Odd atanh series coefficients 1, 1/3, 1/5, ... in r².
    const PRECISE_LOG2: &'static [Self];

    /// Raw IEEE bits, zero-extended.
    fn to_raw(self) -> u64;
    /// Inverse of [`Float::to_raw`]; high bits beyond the type's width are dropped.
    fn from_raw(bits: u64) -> Self;

    /// `v as Self`.
    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;

    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    /// Round half to even.
    fn round(self) -> Self;
    fn trunc(self) -> Self;
    /// `self * a + b` with a single rounding.
    fn mul_add(self, a: Self, b: Self) -> Self;
    fn copysign(self, sign: Self) -> Self;
    fn is_nan(self) -> bool;
    fn is_finite(self) -> bool;

    /// 2^k for k in the normal exponent range.
    #[inline(always)]
    fn pow2(k: i32) -> Self {
        Self::from_raw(((k + Self::EXPONENT_BIAS) as u64) << Self::MANTISSA_BITS)
    }
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_int {
    ($($t:ty => $bits:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Element for $t {
            type Bits = $bits;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const NAME: &'static str = stringify!($t);

            #[inline(always)]
            fn add(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
            #[inline(always)]
            fn mul(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
            #[inline(always)]
            fn div(self, rhs: Self) -> Self { self.wrapping_div(rhs) }
            #[inline(always)]
            fn rem(self, rhs: Self) -> Self { self.wrapping_rem(rhs) }
            #[inline(always)]
            fn neg(self) -> Self { self.wrapping_neg() }

            #[inline(always)]
            fn to_bits(self) -> $bits { self as $bits }
            #[inline(always)]
            fn from_bits(bits: $bits) -> Self { bits as $t }

            #[inline(always)]
            fn bit_and(self, rhs: Self) -> Self { self & rhs }
            #[inline(always)]
            fn bit_or(self, rhs: Self) -> Self { self | rhs }
            #[inline(always)]
            fn bit_xor(self, rhs: Self) -> Self { self ^ rhs }
            #[inline(always)]
            fn bit_not(self) -> Self { !self }

            #[inline(always)]
            fn from_index(i: usize) -> Self { i as $t }
        }

        impl Int for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline(always)]
            fn and(self, rhs: Self) -> Self { self & rhs }
            #[inline(always)]
            fn or(self, rhs: Self) -> Self { self | rhs }
            #[inline(always)]
            fn xor(self, rhs: Self) -> Self { self ^ rhs }
            #[inline(always)]
            fn not(self) -> Self { !self }
            #[inline(always)]
            fn shl(self, count: u32) -> Self { self.wrapping_shl(count) }
            #[inline(always)]
            fn shr(self, count: u32) -> Self { self.wrapping_shr(count) }
        }
    )*};
}

impl_int! {
    u8 => u8,
    i16 => u16,
    u16 => u16,
    i32 => u32,
    u32 => u32,
    i64 => u64,
    u64 => u64,
}

// ============================================================================
// Float implementations
// ============================================================================

// `$t` is an `ident` so it can be forwarded to the table macros and matched literally.
macro_rules! impl_float {
    ($t:ident, $bits:ident, mantissa: $mant:expr, bias: $bias:expr, exp_max: $emax:expr) => {
        impl sealed::Sealed for $t {}

        impl Element for $t {
            type Bits = $bits;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NAME: &'static str = stringify!($t);

            #[inline(always)]
            fn add(self, rhs: Self) -> Self { self + rhs }
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self { self - rhs }
            #[inline(always)]
            fn mul(self, rhs: Self) -> Self { self * rhs }
            #[inline(always)]
            fn div(self, rhs: Self) -> Self { self / rhs }
            #[inline(always)]
            fn rem(self, rhs: Self) -> Self { self % rhs }
            #[inline(always)]
            fn neg(self) -> Self { -self }

            #[inline(always)]
            fn to_bits(self) -> $bits { <$t>::to_bits(self) }
            #[inline(always)]
            fn from_bits(bits: $bits) -> Self { <$t>::from_bits(bits) }

            #[inline(always)]
            fn from_index(i: usize) -> Self { i as $t }
        }

        impl Float for $t {
            const MANTISSA_BITS: u32 = $mant;
            const EXPONENT_BIAS: i32 = $bias;
            const EXPONENT_MAX: u64 = $emax;

            const INFINITY: Self = <$t>::INFINITY;
            const NEG_INFINITY: Self = <$t>::NEG_INFINITY;
            const NAN: Self = <$t>::NAN;
            const MIN_POSITIVE: Self = <$t>::MIN_POSITIVE;

            const FAST_EXP2: &'static [Self] = &[
                1.0,
                0.6931513118048815,
                0.24016445015285526,
                0.055799913109715445,
                0.009017030315842266,
                0.0018671300724600163,
            ];
            const PRECISE_EXP2: &'static [Self] = precise_exp2_table!($t);
            const FAST_LOG2: &'static [Self] = &[
                0.0,
                1.4419656174876767,
                -0.7096628289187024,
                0.4175958040537164,
                -0.19626965912421906,
                0.04638536870535835,
            ];
            const PRECISE_LOG2: &'static [Self] = precise_log2_table!($t);

            #[inline(always)]
            fn to_raw(self) -> u64 { <$t>::to_bits(self) as u64 }
            #[inline(always)]
            fn from_raw(bits: u64) -> Self { <$t>::from_bits(bits as $bits) }

            #[inline(always)]
            fn from_f64(v: f64) -> Self { v as $t }
            #[inline(always)]
            fn to_f64(self) -> f64 { self as f64 }

            #[inline(always)]
            fn sqrt(self) -> Self { <$t>::sqrt(self) }
            #[inline(always)]
            fn abs(self) -> Self { <$t>::abs(self) }
            #[inline(always)]
            fn floor(self) -> Self { <$t>::floor(self) }
            #[inline(always)]
            fn ceil(self) -> Self { <$t>::ceil(self) }
            #[inline(always)]
            fn round(self) -> Self { <$t>::round_ties_even(self) }
            #[inline(always)]
            fn trunc(self) -> Self { <$t>::trunc(self) }
            #[inline(always)]
            fn mul_add(self, a: Self, b: Self) -> Self { <$t>::mul_add(self, a, b) }
            #[inline(always)]
            fn copysign(self, sign: Self) -> Self { <$t>::copysign(self, sign) }
            #[inline(always)]
            fn is_nan(self) -> bool { <$t>::is_nan(self) }
            #[inline(always)]
            fn is_finite(self) -> bool { <$t>::is_finite(self) }
        }
    };
}

// Minimax fit of 2^f on [-0.5, 0.5] for f32; Taylor series ln2^k / k! for f64.
macro_rules! precise_exp2_table {
    (f32) => {
        &[
            1.0,
            0.6931472028550454,
            0.24022647913632264,
            0.055503324711592535,
            0.009618437357421116,
            0.0013398874403554883,
            0.00015353361951375247,
        ]
    };
    (f64) => {
        &[
            1.0,
            0.6931471805599453,
            0.2402265069591007,
            0.055504108664821576,
            0.009618129107628477,
            0.0013333558146428441,
            0.00015403530393381606,
            1.5252733804059838e-05,
            1.3215486790144305e-06,
            1.0178086009239696e-07,
            7.054911620801121e-09,
            4.44553827187081e-10,
            2.5678435993488196e-11,
        ]
    };
}

macro_rules! precise_log2_table {
    (f32) => {
        &[1.0, 1.0 / 3.0, 1.0 / 5.0, 1.0 / 7.0, 1.0 / 9.0]
    };
    (f64) => {
        &[
            1.0,
            1.0 / 3.0,
            1.0 / 5.0,
            1.0 / 7.0,
            1.0 / 9.0,
            1.0 / 11.0,
            1.0 / 13.0,
            1.0 / 15.0,
            1.0 / 17.0,
            1.0 / 19.0,
            1.0 / 21.0,
        ]
    };
}

impl_float!(f32, u32, mantissa: 23, bias: 127, exp_max: 0xFF);
impl_float!(f64, u64, mantissa: 52, bias: 1023, exp_max: 0x7FF);

// ============================================================================
// Lane conversion
// ============================================================================

/// Lane conversion with Rust `as` semantics.
///
/// Float to integer saturates and maps NaN to zero; integer narrowing truncates.
pub trait Cast<U: Element>: Element {
    fn cast(self) -> U;
}

macro_rules! impl_cast {
    ($($from:ty),*) => {
        $( impl_cast!(@to $from; f32, f64, i32, u32, i16, u16, u8, i64, u64); )*
    };
    (@to $from:ty; $($to:ty),*) => {
        $(
            impl Cast<$to> for $from {
                #[inline(always)]
                fn cast(self) -> $to {
                    self as $to
                }
            }
        )*
    };
}

impl_cast!(f32, f64, i32, u32, i16, u16, u8, i64, u64);
