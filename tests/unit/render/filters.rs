use super::*;
use crate::config::FilterKind;

fn apply_to_px(m: &ColorMatrix, px: [u8; 4]) -> [u8; 4] {
    let src = px.to_vec();
    let mut dst = vec![0u8; 4];
    color_matrix_rgba8_premul(&src, &mut dst, m);
    [dst[0], dst[1], dst[2], dst[3]]
}

#[test]
fn identity_matrix_is_a_passthrough() {
    let px = [120, 60, 30, 255];
    assert_eq!(apply_to_px(&IDENTITY_MATRIX, px), px);
}

#[test]
fn noir_preset_is_grayscale() {
    let (m, blur) = preset_matrix(FilterKind::Noir, 100.0);
    assert_eq!(blur, 0);
    let [r, g, b, a] = apply_to_px(&m, [200, 40, 90, 255]);
    assert_eq!(a, 255);
    assert!(r.abs_diff(g) <= 1 && g.abs_diff(b) <= 1, "{r} {g} {b}");
}

#[test]
fn zero_brightness_blacks_out_any_preset() {
    for kind in [
        FilterKind::Original,
        FilterKind::Cinematic,
        FilterKind::Vivid,
    ] {
        let (m, _) = preset_matrix(kind, 0.0);
        let [r, g, b, _] = apply_to_px(&m, [200, 150, 90, 255]);
        assert_eq!((r, g, b), (0, 0, 0));
    }
}

#[test]
fn dreamy_preset_requests_a_blur_pass() {
    let (_, blur) = preset_matrix(FilterKind::Dreamy, 100.0);
    assert_eq!(blur, 1);
}

#[test]
fn compose_applies_right_operand_first() {
    // brightness(0) after identity is still black; composing the other way
    // around the offsets would differ for contrast.
    let m = compose(&IDENTITY_MATRIX, &IDENTITY_MATRIX);
    assert_eq!(apply_to_px(&m, [10, 20, 30, 255]), [10, 20, 30, 255]);
}

#[test]
fn transparent_pixels_stay_transparent_through_grading() {
    let (m, _) = preset_matrix(FilterKind::Vivid, 100.0);
    assert_eq!(apply_to_px(&m, [0, 0, 0, 0]), [0, 0, 0, 0]);
}

#[test]
fn premul_over_full_and_zero_coverage() {
    let mut dst = vec![10u8, 20, 30, 255];
    premul_over_in_place(&mut dst, &[0, 0, 0, 0]);
    assert_eq!(dst, vec![10, 20, 30, 255]);
    premul_over_in_place(&mut dst, &[100, 100, 100, 255]);
    assert_eq!(dst, vec![100, 100, 100, 255]);
}

#[test]
fn vignette_mask_is_clear_at_center_and_dark_at_corners() {
    let mask = vignette_mask(64, 64, 0.7);
    let center = mask[32 * 64 + 32] as u32;
    let corner = mask[0] as u32;
    assert_eq!(center, 0);
    assert!(corner > center);
}

#[test]
fn vignette_strength_scales_the_mask() {
    let weak = vignette_mask(64, 64, 0.2);
    let strong = vignette_mask(64, 64, 0.9);
    assert!(strong[0] > weak[0]);
}

#[test]
fn blur3_preserves_a_uniform_buffer() {
    let mut bytes = vec![77u8; 8 * 8 * 4];
    let mut scratch = Vec::new();
    blur3_rgba8_premul(&mut bytes, &mut scratch, 8, 8);
    assert!(bytes.iter().all(|&b| b == 77));
}
