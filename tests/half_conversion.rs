use pixelflow_simd::backend::Lanes;
use pixelflow_simd::{f32_to_half, half_to_f32, F32x4, F32x8, Half, Pack};

#[test]
fn test_known_encodings() {
    assert_eq!(f32_to_half(0.0), 0x0000);
    assert_eq!(f32_to_half(-0.0), 0x8000);
    assert_eq!(f32_to_half(1.0), 0x3C00);
    assert_eq!(f32_to_half(-1.0), 0xBC00);
    assert_eq!(f32_to_half(65504.0), 0x7BFF);
    assert_eq!(f32_to_half(f32::INFINITY), 0x7C00);
    assert_eq!(f32_to_half(f32::NEG_INFINITY), 0xFC00);
    assert_eq!(f32_to_half(2f32.powi(-14)), 0x0400);
    assert_eq!(f32_to_half(2f32.powi(-24)), 0x0001);
}

#[test]
fn test_every_half_round_trips() {
    for bits in 0..=u16::MAX {
        let h = Half::from_bits(bits);
        let wide = half_to_f32(bits);
        if h.is_nan() {
            assert!(wide.is_nan());
            // Payload kept, quiet bit forced.
            assert_eq!(f32_to_half(wide), bits | 0x0200);
        } else {
            assert_eq!(f32_to_half(wide), bits, "{bits:#06x} -> {wide}");
        }
    }
}

#[test]
fn test_round_to_nearest_even() {
    // 1 + 2^-11 is halfway between 1.0 and the next half; ties go to the even mantissa.
    assert_eq!(f32_to_half(1.0 + 2f32.powi(-11)), 0x3C00);
    assert_eq!(f32_to_half(1.0 + 3.0 * 2f32.powi(-11)), 0x3C02);
    assert_eq!(f32_to_half(1.0 + 2f32.powi(-11) + 2f32.powi(-20)), 0x3C01);
    // Overflow past the largest finite value rounds to infinity.
    assert_eq!(f32_to_half(65520.0), 0x7C00);
    assert_eq!(f32_to_half(65519.0), 0x7BFF);
    // Subnormal ties and the underflow threshold.
    assert_eq!(f32_to_half(2f32.powi(-25)), 0x0000);
    assert_eq!(f32_to_half(2f32.powi(-25) * 1.5), 0x0001);
    assert_eq!(f32_to_half(3.0 * 2f32.powi(-25)), 0x0002);
    assert_eq!(f32_to_half(-1.0e-10), 0x8000);
}

#[test]
fn test_nan_quiets_and_keeps_sign() {
    let signalling = f32::from_bits(0xFF80_2000);
    let h = f32_to_half(signalling);
    assert_eq!(h & 0xFE00, 0xFE00);
    assert!(Half::from_bits(h).is_nan());
}

#[test]
fn test_half_newtype() {
    assert_eq!(Half::from_f32(1.0), Half::ONE);
    assert_eq!(Half::from(-1.0f32), Half::NEG_ONE);
    assert_eq!(f32::from(Half::MAX), 65504.0);
    assert_eq!(Half::MIN_POSITIVE.to_f32(), 2f32.powi(-14));
    assert!(Half::NAN.is_nan());
    assert!(!Half::INFINITY.is_nan());
    assert_eq!(Half::ZERO.to_bits(), 0);
}

#[test]
fn test_pack_conversion_matches_scalar() {
    let mut values = Vec::new();
    let mut x = 1.0e-9f32;
    while x < 1.0e6 {
        values.extend([x, -x, x * 1.000_3]);
        x *= 1.37;
    }
    values.truncate(values.len() / 8 * 8);

    for chunk in values.chunks_exact(8) {
        let v = F32x8::load(chunk);
        let bits = v.to_half().to_array();
        let scalar: Vec<u16> = chunk.iter().map(|&f| f32_to_half(f)).collect();
        assert_eq!(&bits[..], &scalar[..]);
        let back = F32x8::from_half(v.to_half()).to_array();
        let scalar_back: Vec<f32> = scalar.iter().map(|&b| half_to_f32(b)).collect();
        assert_eq!(&back[..], &scalar_back[..]);
    }

    for chunk in values.chunks_exact(4) {
        let native = F32x4::load(chunk).to_half();
        let lanes = Pack::<f32, 4, Lanes<f32, 4>>::load(chunk).to_half();
        assert_eq!(native, lanes);
    }
}
