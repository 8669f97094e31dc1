//! Safe bit reinterpretation.

use bytemuck::Pod;

/// Reinterprets the bits of `value` as `B`.
///
/// Both types must have the same size; a mismatch is rejected when the
/// instantiation is compiled, not at run time.
///
/// ```
/// use pixelflow_simd::bits::bit_cast;
///
/// assert_eq!(bit_cast::<f32, u32>(1.0), 0x3F80_0000);
/// assert_eq!(bit_cast::<u64, f64>(0x4000_0000_0000_0000), 2.0);
/// ```
#[inline(always)]
pub fn bit_cast<A: Pod, B: Pod>(value: A) -> B {
    const {
        assert!(
            core::mem::size_of::<A>() == core::mem::size_of::<B>(),
            "bit_cast between types of different size"
        )
    };
    bytemuck::cast(value)
}
