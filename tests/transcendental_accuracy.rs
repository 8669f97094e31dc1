use pixelflow_simd::backend::Lanes;
use pixelflow_simd::{F32x4, F64x2, Pack};

/// Round-trip bound for `exp2(log2(x))`, precise tier, f32.
const MAX_ROUND_TRIP_ERROR: f64 = 1e-5;

/// Logarithmic sweep over the positive normal f32 range.
fn positive_f32_samples() -> Vec<f32> {
    let (lo, hi) = (-125.0f64, 125.0f64);
    (0..2000)
        .map(|i| (lo + (hi - lo) * i as f64 / 1999.0).exp2() as f32)
        .collect()
}

#[test]
fn test_exp2_log2_round_trip() {
    for chunk in positive_f32_samples().chunks_exact(4) {
        let x = F32x4::load(chunk);
        let y = x.log2().exp2().to_array();
        for (a, b) in chunk.iter().zip(y) {
            let err = ((b as f64 - *a as f64) / *a as f64).abs();
            assert!(err < MAX_ROUND_TRIP_ERROR, "exp2(log2({a})) = {b}, error {err}");
        }
    }
}

#[test]
fn test_log2_powers_of_two_are_exact() {
    for n in -126..=127 {
        let x = F32x4::splat(2f32.powi(n));
        assert_eq!(x.log2().x(), n as f32, "log2(2^{n})");
        assert_eq!(x.fast_log2().x(), n as f32, "fast_log2(2^{n})");
    }
}

#[test]
fn test_exp2_integers_are_exact() {
    for n in -126..=127 {
        let x = F32x4::splat(n as f32);
        assert_eq!(x.exp2().x(), 2f32.powi(n), "exp2({n})");
        assert_eq!(x.fast_exp2().x(), 2f32.powi(n), "fast_exp2({n})");
    }
}

#[test]
fn test_special_values() {
    let x = F32x4::from_array([f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 200.0]);
    for r in [x.exp2(), x.fast_exp2()] {
        let r = r.to_array();
        assert!(r[0].is_nan());
        assert_eq!(&r[1..], &[f32::INFINITY, 0.0, f32::INFINITY]);
    }

    let x = F32x4::from_array([0.0, -0.0, -1.0, f32::INFINITY]);
    for r in [x.log2(), x.fast_log2()] {
        let r = r.to_array();
        assert_eq!(&r[..2], &[f32::NEG_INFINITY, f32::NEG_INFINITY]);
        assert!(r[2].is_nan());
        assert_eq!(r[3], f32::INFINITY);
    }
    assert!(F32x4::splat(f32::NAN).log2().x().is_nan());
}

#[test]
fn test_precise_exp2_underflows_gradually() {
    let r = F64x2::from_array([-1074.0, -1080.0]).exp2().to_array();
    assert_eq!(r, [f64::from_bits(1), 0.0]);
    let r = F32x4::splat(-140.0).exp2().x();
    assert_eq!(r, f32::from_bits(1 << 9));
    // The fast tier flushes below the normal range.
    assert_eq!(F32x4::splat(-140.0).fast_exp2().x(), 0.0);
}

#[test]
fn test_precise_log2_handles_subnormals() {
    let x = F64x2::from_array([f64::from_bits(1), f64::MIN_POSITIVE / 8.0]);
    assert_eq!(x.log2().to_array(), [-1074.0, -1025.0]);
}

#[test]
fn test_other_bases() {
    let x = F64x2::from_array([1.0, 2.5]);
    let e = x.exp().to_array();
    let l = x.exp().log().to_array();
    for i in 0..2 {
        let expected = x.to_array()[i].exp();
        assert!(((e[i] - expected) / expected).abs() < 1e-13);
        assert!((l[i] - x.to_array()[i]).abs() < 1e-12);
    }
    let t = F32x4::from_array([0.0, 1.0, 2.0, -1.0]).exp10().to_array();
    for (got, want) in t.iter().zip([1.0f32, 10.0, 100.0, 0.1]) {
        assert!(((got - want) / want).abs() < 1e-6, "{got} vs {want}");
    }
    let lg = F32x4::from_array([1.0, 10.0, 1000.0, 0.01]).log10().to_array();
    for (got, want) in lg.iter().zip([0.0f32, 1.0, 3.0, -2.0]) {
        assert!((got - want).abs() < 1e-5, "{got} vs {want}");
    }
}

#[test]
fn test_pow() {
    let base = F32x4::from_array([2.0, 9.0, 0.0, -2.0]);
    let exp = F32x4::from_array([10.0, 0.5, 0.0, 2.0]);
    let r = base.pow(exp).to_array();
    assert!((r[0] - 1024.0).abs() < 1e-2);
    assert!((r[1] - 3.0).abs() < 1e-5);
    assert!(r[2].is_nan());
    assert!(r[3].is_nan());

    let fast = base.fast_pow(exp).to_array();
    assert!((fast[0] - 1024.0).abs() / 1024.0 < 1e-3);
}

#[test]
fn test_native_matches_fallback() {
    let samples = positive_f32_samples();
    for chunk in samples.chunks_exact(4) {
        let native = F32x4::load(chunk);
        let lanes = Pack::<f32, 4, Lanes<f32, 4>>::load(chunk);
        assert_eq!(native.exp2().to_array(), lanes.exp2().to_array());
        assert_eq!(native.log2().to_array(), lanes.log2().to_array());
        assert_eq!(native.fast_log2().to_array(), lanes.fast_log2().to_array());
        assert_eq!(native.sqrt().to_array(), lanes.sqrt().to_array());
    }
}
