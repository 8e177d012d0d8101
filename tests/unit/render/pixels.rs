use super::*;

#[test]
fn over_opaque_source_replaces_destination() {
    let mut dst = vec![10, 20, 30, 255, 0, 0, 0, 0];
    let src = vec![200, 100, 50, 255, 0, 0, 0, 0];
    over_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst, vec![200, 100, 50, 255, 0, 0, 0, 0]);
}

#[test]
fn over_half_alpha_blends() {
    let mut dst = vec![0, 0, 255, 255];
    let src = vec![128, 0, 0, 128];
    over_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst, vec![128, 0, 127, 255]);
}

#[test]
fn erase_clears_under_full_coverage_and_scales_partial() {
    let mut dst = vec![255, 255, 255, 255, 255, 255, 255, 255, 200, 100, 0, 200];
    let mask = vec![255, 255, 255, 255, 0, 0, 0, 0, 0, 0, 0, 128];
    erase_in_place(&mut dst, &mask).unwrap();
    assert_eq!(&dst[0..4], &[0, 0, 0, 0]);
    assert_eq!(&dst[4..8], &[255, 255, 255, 255]);
    assert_eq!(&dst[8..12], &[100, 50, 0, 100]);
}

#[test]
fn length_mismatch_is_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(erase_in_place(&mut dst, &[0u8; 7]).is_err());
}

#[test]
fn shade_coverage_paints_only_covered_pixels() {
    // 2x2, coverage: full, none, half, full.
    let mut cov = vec![
        255, 255, 255, 255, 0, 0, 0, 0, //
        255, 255, 255, 128, 255, 255, 255, 255,
    ];
    shade_coverage(&mut cov, 2, |x, y| [x as u8 * 100, y as u8 * 100, 0, 255]);
    assert_eq!(&cov[0..4], &[0, 0, 0, 255]);
    assert_eq!(&cov[4..8], &[0, 0, 0, 0]);
    assert_eq!(&cov[8..12], &[0, 50, 0, 128]);
    assert_eq!(&cov[12..16], &[100, 100, 0, 255]);
}

#[test]
fn shadow_is_tinted_and_shifted() {
    // 3x1: single opaque pixel at x=0.
    let src = vec![9, 9, 9, 255, 0, 0, 0, 0, 0, 0, 0, 0];
    let black = Rgba8Premul::from_straight_rgba(0, 0, 0, 255);
    let out = shadow_from_alpha(&src, 3, 1, black, 2, 0);
    assert_eq!(&out[0..8], &[0; 8]);
    assert_eq!(&out[8..12], &[0, 0, 0, 255]);

    let off_canvas = shadow_from_alpha(&src, 3, 1, black, -1, 0);
    assert!(off_canvas.iter().all(|&b| b == 0));
}

#[test]
fn kernel_sums_to_one_and_is_symmetric() {
    let k = gaussian_kernel_q16(6, 2.0).unwrap();
    assert_eq!(k.len(), 13);
    assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
    assert_eq!(k[0], k[12]);
    assert!(gaussian_kernel_q16(2, 0.0).is_err());
    assert_eq!(gaussian_kernel_q16(0, 0.0).unwrap(), vec![65536]);
}

#[test]
fn blur_spreads_a_point_and_keeps_zero_blur_exact() {
    let (w, h) = (9u32, 9u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    buf[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let mut untouched = buf.clone();
    blur_for_shadow(&mut untouched, w, h, 0.0).unwrap();
    assert_eq!(untouched, buf);

    blur_for_shadow(&mut buf, w, h, 4.0).unwrap();
    assert!(buf[center + 3] < 255);
    let neighbour = ((4 * w + 5) * 4) as usize;
    assert!(buf[neighbour + 3] > 0);
}
