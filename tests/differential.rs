//! Native registers against the lane-array fallback.
//!
//! Every property runs the same operation on `Pack<T, N>` (whatever register
//! the build selected) and on `Pack<T, N, Lanes<T, N>>`, and requires
//! bit-identical lanes. With `force-scalar` both sides are the fallback and
//! the properties still hold trivially.

use pixelflow_simd::backend::Lanes;
use pixelflow_simd::Pack;
use proptest::prelude::*;

type NativeF32 = Pack<f32, 4>;
type ScalarF32 = Pack<f32, 4, Lanes<f32, 4>>;
type NativeF32x8 = Pack<f32, 8>;
type ScalarF32x8 = Pack<f32, 8, Lanes<f32, 8>>;
type NativeF64 = Pack<f64, 2>;
type ScalarF64 = Pack<f64, 2, Lanes<f64, 2>>;
type NativeI32 = Pack<i32, 4>;
type ScalarI32 = Pack<i32, 4, Lanes<i32, 4>>;
type NativeU32 = Pack<u32, 4>;
type ScalarU32 = Pack<u32, 4, Lanes<u32, 4>>;
type NativeI16 = Pack<i16, 8>;
type ScalarI16 = Pack<i16, 8, Lanes<i16, 8>>;

/// Bit patterns with every NaN folded to one value. Signed zeros still
/// differ; NaN payloads may legitimately differ between hardware and libm.
fn bits32<const N: usize>(a: [f32; N]) -> [u32; N] {
    a.map(|v| if v.is_nan() { f32::NAN.to_bits() } else { v.to_bits() })
}

fn bits64<const N: usize>(a: [f64; N]) -> [u64; N] {
    a.map(|v| if v.is_nan() { f64::NAN.to_bits() } else { v.to_bits() })
}

/// Finite and special values, weighted toward the interesting ones.
fn any_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => -1.0e6f32..1.0e6,
        2 => any::<f32>(),
        1 => Just(0.0f32),
        1 => Just(-0.0f32),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
        1 => Just(f32::MIN_POSITIVE),
    ]
}

fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1.0e12f64..1.0e12,
        2 => any::<f64>(),
        1 => Just(0.0f64),
        1 => Just(f64::INFINITY),
    ]
}

macro_rules! same_f32 {
    ($a:expr, $b:expr, |$x:ident, $y:ident| $op:expr) => {{
        let native = {
            let ($x, $y) = (NativeF32::from_array($a), NativeF32::from_array($b));
            $op.to_array()
        };
        let scalar = {
            let ($x, $y) = (ScalarF32::from_array($a), ScalarF32::from_array($b));
            $op.to_array()
        };
        prop_assert_eq!(bits32(native), bits32(scalar));
    }};
}

proptest! {
    #[test]
    fn f32_arithmetic_matches(a in prop::array::uniform4(any_f32()), b in prop::array::uniform4(any_f32())) {
        same_f32!(a, b, |x, y| x + y);
        same_f32!(a, b, |x, y| x - y);
        same_f32!(a, b, |x, y| x * y);
        same_f32!(a, b, |x, y| x / y);
        same_f32!(a, b, |x, y| x % y);
        same_f32!(a, b, |x, y| x.min(y));
        same_f32!(a, b, |x, y| x.max(y));
        same_f32!(a, b, |x, y| x.fma(y, x));
        same_f32!(a, b, |x, y| x.copysign(y));
    }

    #[test]
    fn f32_unary_matches(a in prop::array::uniform4(any_f32())) {
        same_f32!(a, a, |x, _y| x.sqrt());
        same_f32!(a, a, |x, _y| x.abs());
        same_f32!(a, a, |x, _y| x.floor());
        same_f32!(a, a, |x, _y| x.ceil());
        same_f32!(a, a, |x, _y| x.round());
        same_f32!(a, a, |x, _y| x.trunc());
        same_f32!(a, a, |x, _y| -x);
        same_f32!(a, a, |x, _y| x.exp2());
        same_f32!(a, a, |x, _y| x.fast_exp2());
        same_f32!(a, a, |x, _y| x.log2());
        same_f32!(a, a, |x, _y| x.fast_log2());
    }

    #[test]
    fn f32_masks_match(a in prop::array::uniform4(any_f32()), b in prop::array::uniform4(any_f32())) {
        same_f32!(a, b, |x, y| x.cmp_eq(y));
        same_f32!(a, b, |x, y| x.cmp_ne(y));
        same_f32!(a, b, |x, y| x.cmp_lt(y));
        same_f32!(a, b, |x, y| x.cmp_le(y));
        same_f32!(a, b, |x, y| x.cmp_gt(y));
        same_f32!(a, b, |x, y| x.cmp_ge(y));
        same_f32!(a, b, |x, y| x.select(y, x + y));
        prop_assert_eq!(NativeF32::from_array(a).movemask(), ScalarF32::from_array(a).movemask());
        prop_assert_eq!(NativeF32::from_array(a).reduce_add().to_bits(), ScalarF32::from_array(a).reduce_add().to_bits());
    }

    #[test]
    fn f32_estimates_stay_close(a in prop::array::uniform4(1.0e-30f32..1.0e30)) {
        let n = NativeF32::from_array(a);
        let s = ScalarF32::from_array(a);
        for (x, y) in n.rsqrt().to_array().iter().zip(s.rsqrt().to_array()) {
            prop_assert!(((x - y) / y).abs() < 5e-7);
        }
        for (x, y) in n.rcp().to_array().iter().zip(s.rcp().to_array()) {
            prop_assert!(((x - y) / y).abs() < 5e-7);
        }
    }

    #[test]
    fn f32x8_conversions_match(a in prop::array::uniform8(any_f32())) {
        let n = NativeF32x8::from_array(a);
        let s = ScalarF32x8::from_array(a);
        prop_assert_eq!(n.to_half(), s.to_half());
        prop_assert_eq!(n.pack_saturate(), s.pack_saturate());
        prop_assert_eq!(bits32((n * n).to_array()), bits32((s * s).to_array()));
    }

    #[test]
    fn f64_matches(a in prop::array::uniform2(any_f64()), b in prop::array::uniform2(any_f64())) {
        let (x, y) = (NativeF64::from_array(a), NativeF64::from_array(b));
        let (p, q) = (ScalarF64::from_array(a), ScalarF64::from_array(b));
        prop_assert_eq!(bits64((x / y).to_array()), bits64((p / q).to_array()));
        prop_assert_eq!(bits64(x.min(y).to_array()), bits64(p.min(q).to_array()));
        prop_assert_eq!(bits64(x.cmp_le(y).to_array()), bits64(p.cmp_le(q).to_array()));
        prop_assert_eq!(bits64(x.exp2().to_array()), bits64(p.exp2().to_array()));
        prop_assert_eq!(bits64(x.log2().to_array()), bits64(p.log2().to_array()));
        prop_assert_eq!(bits64(x.round().to_array()), bits64(p.round().to_array()));
    }

    #[test]
    fn i32_matches(a in prop::array::uniform4(any::<i32>()), b in prop::array::uniform4(any::<i32>()), k in 0u32..64) {
        let (x, y) = (NativeI32::from_array(a), NativeI32::from_array(b));
        let (p, q) = (ScalarI32::from_array(a), ScalarI32::from_array(b));
        prop_assert_eq!((x + y).to_array(), (p + q).to_array());
        prop_assert_eq!((x * y).to_array(), (p * q).to_array());
        prop_assert_eq!(x.min(y).to_array(), p.min(q).to_array());
        prop_assert_eq!(x.max(y).to_array(), p.max(q).to_array());
        prop_assert_eq!(x.cmp_lt(y).to_array(), p.cmp_lt(q).to_array());
        prop_assert_eq!((x << k).to_array(), (p << k).to_array());
        prop_assert_eq!((x >> k).to_array(), (p >> k).to_array());
        prop_assert_eq!(x.pack_saturate().to_array(), p.pack_saturate().to_array());
        prop_assert_eq!(x.movemask(), p.movemask());
        prop_assert_eq!(x.reduce_max(), p.reduce_max());
    }

    #[test]
    fn u32_and_i16_match(a in prop::array::uniform4(any::<u32>()), b in prop::array::uniform4(any::<u32>()),
                         c in prop::array::uniform8(any::<i16>()), d in prop::array::uniform8(any::<i16>())) {
        let (x, y) = (NativeU32::from_array(a), NativeU32::from_array(b));
        let (p, q) = (ScalarU32::from_array(a), ScalarU32::from_array(b));
        prop_assert_eq!(x.cmp_gt(y).to_array(), p.cmp_gt(q).to_array());
        prop_assert_eq!(x.min(y).to_array(), p.min(q).to_array());
        prop_assert_eq!((x >> 7).to_array(), (p >> 7).to_array());

        let (x, y) = (NativeI16::from_array(c), NativeI16::from_array(d));
        let (p, q) = (ScalarI16::from_array(c), ScalarI16::from_array(d));
        prop_assert_eq!((x - y).to_array(), (p - q).to_array());
        prop_assert_eq!((x * y).to_array(), (p * q).to_array());
        prop_assert_eq!(x.cmp_ge(y).movemask(), p.cmp_ge(q).movemask());
        prop_assert_eq!((x >> 3).to_array(), (p >> 3).to_array());
    }

    #[test]
    fn gather_matches(idx in prop::array::uniform4(0i32..32)) {
        let table: Vec<f32> = (0..32).map(|i| i as f32 * 1.5).collect();
        let i = Pack::<i32, 4>::from_array(idx);
        prop_assert_eq!(NativeF32::gather(&table, i).to_array(), ScalarF32::gather(&table, i).to_array());
    }
}
