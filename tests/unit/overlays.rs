use super::*;

#[test]
fn additive_blend_saturates() {
    let mut px = [250u8, 250, 250, 250];
    blend_px_add(&mut px, 255, 255, 255, 1.0);
    assert_eq!(px, [255, 255, 255, 255]);
}

#[test]
fn over_blend_with_zero_alpha_is_a_no_op() {
    let mut px = [10u8, 20, 30, 40];
    blend_px_over(&mut px, 255, 255, 255, 0.0);
    assert_eq!(px, [10, 20, 30, 40]);
}

#[test]
fn fill_rect_over_clips_out_of_bounds_coordinates() {
    let mut frame = vec![0u8; 4 * 4 * 4];
    fill_rect_over(&mut frame, 4, 4, -10, -10, 100, 2, (255, 0, 0), 1.0);
    // Rows 0..2 painted, rows 2..4 untouched.
    assert_eq!(frame[0], 255);
    assert_eq!(frame[(2 * 4) * 4 + 3], 0);
}

#[test]
fn radial_add_leaves_pixels_beyond_the_radius_untouched() {
    let mut frame = vec![0u8; 16 * 16 * 4];
    radial_add(
        &mut frame,
        16,
        16,
        0.0,
        0.0,
        4.0,
        &[(0.0, 255, 255, 255, 1.0), (1.0, 0, 0, 0, 0.0)],
        1.0,
    );
    assert!(frame[0] > 0, "origin inside the gradient");
    let far = (15 * 16 + 15) * 4;
    assert_eq!(frame[far + 3], 0, "far corner outside the radius");
}

#[test]
fn stop_sampling_interpolates_between_stops() {
    let stops = [(0.0, 0u8, 0, 0, 0.0f32), (1.0, 200, 100, 50, 1.0)];
    let (r, g, b, a) = sample_stops(&stops, 0.5);
    assert_eq!((r, g, b), (100, 50, 25));
    assert!((a - 0.5).abs() < 1e-6);
}

#[test]
fn overlay_passes_are_deterministic_for_a_fixed_rng_seed() {
    use crate::config::{OverlayKind, VisualConfig};

    let mut cfg = VisualConfig::default();
    cfg.overlays = vec![OverlayKind::Grain, OverlayKind::Vhs];

    let mut a = vec![40u8; 32 * 32 * 4];
    let mut b = vec![40u8; 32 * 32 * 4];
    let mut rng_a = Rng64::new(99);
    let mut rng_b = Rng64::new(99);
    apply_overlays(&mut a, 32, 32, &cfg, 1.25, Some(0.4), &mut rng_a);
    apply_overlays(&mut b, 32, 32, &cfg, 1.25, Some(0.4), &mut rng_b);
    assert_eq!(a, b);
}
