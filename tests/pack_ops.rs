use pixelflow_simd::{F32x4, F64x2, I16x8, I32x4, I32x8, Pack, U32x4};

#[test]
fn test_elementwise_arithmetic() {
    let a = I32x4::from_array([1, 2, 3, 4]);
    let b = I32x4::from_array([10, 20, 30, 40]);
    assert_eq!((a + b).to_array(), [11, 22, 33, 44]);
    assert_eq!((b - a).to_array(), [9, 18, 27, 36]);
    assert_eq!((a * b).to_array(), [10, 40, 90, 160]);
    assert_eq!((b / a).to_array(), [10, 10, 10, 10]);
    assert_eq!((b % I32x4::splat(7)).to_array(), [3, 6, 2, 5]);
    assert_eq!((-a).to_array(), [-1, -2, -3, -4]);

    let r = F32x4::splat(5.5) % F32x4::splat(2.0);
    assert_eq!(r.to_array(), [1.5; 4]);

    let mut acc = F64x2::splat(1.0);
    acc += F64x2::splat(2.0);
    acc *= F64x2::from_array([2.0, -1.0]);
    assert_eq!(acc.to_array(), [6.0, -3.0]);
}

#[test]
fn test_integer_wraparound() {
    let max = I32x4::splat(i32::MAX);
    assert_eq!((max + I32x4::splat(1)).to_array(), [i32::MIN; 4]);
    let u = U32x4::splat(0) - U32x4::splat(1);
    assert_eq!(u.to_array(), [u32::MAX; 4]);
    let h = I16x8::splat(i16::MAX) * I16x8::splat(2);
    assert_eq!(h.x(), -2);
}

#[test]
#[should_panic]
fn test_integer_division_by_zero_panics() {
    let zero = I32x4::from_array([1, 1, 0, 1]);
    let _ = I32x4::splat(8) / zero;
}

#[test]
fn test_select_clamp_and_masks() {
    let mask = I32x4::from_array([1, 0, 1, 0]);
    let r = mask.select(I32x4::from_array([1, 2, 3, 4]), I32x4::from_array([9, 8, 7, 6]));
    assert_eq!(r.to_array(), [1, 8, 3, 6]);

    let v = I32x4::from_array([5, -1, 2, 3]);
    assert_eq!(v.clamp(I32x4::splat(0), I32x4::splat(3)).to_array(), [3, 0, 2, 3]);

    let lt = F32x4::from_array([1.0, 5.0, f32::NAN, -0.0]).cmp_lt(F32x4::splat(2.0));
    assert_eq!(lt.to_array(), [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(lt.movemask(), 0b1001);
    assert!(lt.any());
    assert!(!lt.all());
    assert!(lt.mask_or(lt.mask_not()).all());
}

#[test]
fn test_float_min_max_follow_second_operand_on_nan() {
    let a = F32x4::from_array([f32::NAN, 1.0, 3.0, -2.0]);
    let b = F32x4::from_array([1.0, f32::NAN, 2.0, -1.0]);
    let lo = a.min(b).to_array();
    assert_eq!(lo[0], 1.0);
    assert!(lo[1].is_nan());
    assert_eq!(&lo[2..], &[2.0, -2.0]);
    let hi = a.max(b).to_array();
    assert_eq!(hi[0], 1.0);
    assert!(hi[1].is_nan());
}

#[test]
fn test_bitwise_on_float_bits() {
    let v = F32x4::from_array([1.0, -2.0, 3.0, -4.0]);
    let sign = F32x4::splat(-0.0);
    assert_eq!((v & !sign).to_array(), [1.0, 2.0, 3.0, 4.0]);
    assert_eq!((v ^ sign).to_array(), [-1.0, 2.0, -3.0, 4.0]);
    assert_eq!((v | sign).to_array(), [-1.0, -2.0, -3.0, -4.0]);
}

#[test]
fn test_shifts_take_count_modulo_width() {
    let v = I32x4::from_array([1, -8, 256, i32::MIN]);
    assert_eq!((v << 1).to_array(), [2, -16, 512, 0]);
    assert_eq!((v >> 2).to_array(), [0, -2, 64, i32::MIN / 4]);
    assert_eq!((v << 33).to_array(), (v << 1).to_array());
    let u = U32x4::splat(0x8000_0000);
    assert_eq!((u >> 31).to_array(), [1; 4]);
}

#[test]
fn test_reductions_use_pairwise_order() {
    let v = I32x8::sequential(1);
    assert_eq!(v.reduce_add(), 36);
    assert_eq!(v.reduce_min(), 1);
    assert_eq!(v.reduce_max(), 8);

    // (a0 + a2) + (a1 + a3): the large terms cancel before the small ones are added.
    let f = F32x4::from_array([1.0e20, 1.0, -1.0e20, 1.0]);
    assert_eq!(f.reduce_add(), 2.0);
}

#[test]
fn test_load_store_unaligned() {
    let data: Vec<f32> = (0..11).map(|i| i as f32).collect();
    let v = Pack::<f32, 8>::load(&data[3..]);
    assert_eq!(v.to_array(), [3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);

    let mut out = [0.0f32; 9];
    v.store(&mut out[1..]);
    assert_eq!(out[0], 0.0);
    assert_eq!(&out[1..], &v.to_array());

    let mut streamed = [0.0f32; 8];
    v.stream_store(&mut streamed);
    assert_eq!(streamed, v.to_array());
}

#[test]
#[should_panic(expected = "load of 4 lanes")]
fn test_short_load_panics() {
    let _ = F32x4::load(&[1.0, 2.0, 3.0]);
}

#[test]
fn test_masked_access_touches_only_active_lanes() {
    let src = [7, 8];
    let mask = I32x4::from_array([1, 1, 0, 0]);
    let v = I32x4::masked_load(&src, mask, I32x4::splat(-1));
    assert_eq!(v.to_array(), [7, 8, -1, -1]);

    let mut dst = [0i32; 3];
    I32x4::from_array([1, 2, 3, 4]).masked_store(&mut dst, I32x4::from_array([0, 5, 1, 0]));
    assert_eq!(dst, [0, 2, 3]);
}

#[test]
#[should_panic(expected = "masked load needs 3 elements")]
fn test_masked_load_out_of_range_panics() {
    let _ = I32x4::masked_load(&[1, 2], I32x4::from_array([0, 0, 1, 0]), I32x4::splat(0));
}

#[test]
fn test_gather_scatter() {
    let table: Vec<f64> = (0..16).map(|i| i as f64 * 0.5).collect();
    let idx = Pack::<i32, 4>::from_array([15, 0, 3, 3]);
    let g = Pack::<f64, 4>::gather(&table, idx);
    assert_eq!(g.to_array(), [7.5, 0.0, 1.5, 1.5]);

    let mut out = [0.0f64; 5];
    Pack::<f64, 4>::from_array([1.0, 2.0, 3.0, 4.0]).scatter(&mut out, Pack::from_array([4, 0, 2, 2]));
    // Lane order: the later lane wins on a repeated index.
    assert_eq!(out, [2.0, 0.0, 4.0, 0.0, 1.0]);

    let unchecked = unsafe { Pack::<f64, 4>::gather_unchecked(table.as_ptr(), idx) };
    assert_eq!(unchecked, g);
}

#[test]
#[should_panic(expected = "lane 2 index -1 out of bounds")]
fn test_gather_negative_index_panics() {
    let _ = I32x4::gather(&[1, 2, 3], I32x4::from_array([0, 1, -1, 2]));
}

#[test]
fn test_lane_access() {
    let v = F32x4::from_array([1.0, 2.0, 3.0, 4.0]);
    assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));
    assert_eq!(v.extract(2), 3.0);
    assert_eq!(v.replace(1, 9.0).to_array(), [1.0, 9.0, 3.0, 4.0]);
    assert_eq!(<[f32; 4]>::from(v), [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(F32x4::LANES, 4);
    assert_eq!(format!("{:?}", I32x4::splat(1)), "Pack<i32, 4>([1, 1, 1, 1])");
}
