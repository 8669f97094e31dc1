//! IEEE-754 binary16 ("half") interchange format.
//!
//! A half is stored as its raw 16-bit pattern:
//! ```text
//! f32:  SEEEEEEE EMMMMMMM MMMMMMMM MMMMMMMM
//! f16:  SEEEEEMM MMMMMMMM
//! ```
//! where S=sign, E=exponent (bias 15), M=mantissa.
//!
//! There is no half arithmetic. Values are widened to f32, computed on, and
//! narrowed back with [`f32_to_half`], which rounds to nearest even. Widening
//! with [`half_to_f32`] is always exact.
//!
//! The pack-level conversions in [`crate::convert`] use the F16C instructions
//! when they are compiled in; the functions here are the software path and
//! produce identical bits.

/// Converts an f32 to binary16 bits, rounding to nearest even.
///
/// - Values too large for binary16 become ±∞.
/// - Values below the smallest binary16 subnormal round to ±0.
/// - NaN keeps its sign and the top mantissa bits with the quiet bit forced.
#[inline]
pub fn f32_to_half(value: f32) -> u16 {
    let x = value.to_bits();
    let sign = ((x >> 16) & 0x8000) as u16;
    let exp = (x >> 23) & 0xFF;
    let man = x & 0x007F_FFFF;

    if exp == 0xFF {
        if man == 0 {
            return sign | 0x7C00;
        }
        return sign | 0x7E00 | (man >> 13) as u16;
    }

    // Exponent rebiased from 127 to 15.
    let e = exp as i32 - 112;
    if e >= 0x1F {
        return sign | 0x7C00;
    }

    if e <= 0 {
        // Result is a binary16 subnormal (or zero). Anything under 2^-25 rounds to zero.
        if e < -10 {
            return sign;
        }
        let full = man | 0x0080_0000;
        let shift = (14 - e) as u32;
        let half_mant = full >> shift;
        let rem = full & ((1 << shift) - 1);
        let halfway = 1 << (shift - 1);
        let round_up = rem > halfway || (rem == halfway && half_mant & 1 == 1);
        // A carry out of the mantissa lands on the smallest normal encoding.
        return sign | (half_mant + round_up as u32) as u16;
    }

    let bits = ((e as u32) << 10) | (man >> 13);
    let rem = man & 0x1FFF;
    let round_up = rem > 0x1000 || (rem == 0x1000 && bits & 1 == 1);
    // A carry ripples into the exponent, up to and including infinity.
    sign | (bits + round_up as u32) as u16
}

/// Converts binary16 bits to f32. Exact for every input.
#[inline]
pub fn half_to_f32(bits: u16) -> f32 {
    let sign = ((bits & 0x8000) as u32) << 16;
    let exp = ((bits >> 10) & 0x1F) as u32;
    let man = (bits & 0x03FF) as u32;

    let out = match exp {
        0 if man == 0 => sign,
        0 => {
            // Subnormal: normalize so the leading one lands on bit 10.
            let shift = man.leading_zeros() - 21;
            let man = (man << shift) & 0x03FF;
            sign | ((113 - shift) << 23) | (man << 13)
        }
        0x1F if man == 0 => sign | 0x7F80_0000,
        0x1F => sign | 0x7FC0_0000 | (man << 13),
        _ => sign | ((exp + 112) << 23) | (man << 13),
    };
    f32::from_bits(out)
}

/// A binary16 value.
///
/// Storage and interchange only. Widen with [`Half::to_f32`] to compute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Half(pub u16);

impl Half {
    /// Construct from raw binary16 bits.
    #[inline(always)]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Return the raw binary16 bits.
    #[inline(always)]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Narrow an f32, rounding to nearest even.
    #[inline(always)]
    pub fn from_f32(value: f32) -> Self {
        Self(f32_to_half(value))
    }

    /// Widen to f32 (exact).
    #[inline(always)]
    pub fn to_f32(self) -> f32 {
        half_to_f32(self.0)
    }

    #[inline(always)]
    pub const fn is_nan(self) -> bool {
        self.0 & 0x7C00 == 0x7C00 && self.0 & 0x03FF != 0
    }

    /// binary16 representation of 0.0
    pub const ZERO: Self = Self(0x0000);

    /// binary16 representation of 1.0
    pub const ONE: Self = Self(0x3C00);

    /// binary16 representation of -1.0
    pub const NEG_ONE: Self = Self(0xBC00);

    /// Largest finite binary16 value (65504).
    pub const MAX: Self = Self(0x7BFF);

    /// Smallest positive normal binary16 value (2^-14).
    pub const MIN_POSITIVE: Self = Self(0x0400);

    /// binary16 positive infinity
    pub const INFINITY: Self = Self(0x7C00);

    /// binary16 negative infinity
    pub const NEG_INFINITY: Self = Self(0xFC00);

    /// binary16 NaN (quiet)
    pub const NAN: Self = Self(0x7E00);
}

impl From<f32> for Half {
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl From<Half> for f32 {
    fn from(value: Half) -> Self {
        value.to_f32()
    }
}
