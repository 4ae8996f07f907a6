use super::*;
use std::sync::Arc;

/// 4x4 image: uniform red background with a blue block in the middle.
fn logo_fixture() -> PreparedImage {
    let (w, h) = (4u32, 4u32);
    let mut rgba = vec![0u8; (w * h * 4) as usize];
    for y in 0..h {
        for x in 0..w {
            let i = ((y * w + x) * 4) as usize;
            let is_logo = (1..3).contains(&x) && (1..3).contains(&y);
            let (r, g, b) = if is_logo { (20, 40, 220) } else { (200, 30, 30) };
            rgba[i] = r;
            rgba[i + 1] = g;
            rgba[i + 2] = b;
            rgba[i + 3] = 255;
        }
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8: Arc::new(rgba),
    }
}

#[test]
fn background_pixels_go_transparent_and_logo_pixels_stay() {
    let img = logo_fixture();
    let keyed = key_out_background(&img, 50.0);

    // Corner pixel matches the sampled background exactly: alpha 0.
    assert_eq!(keyed.rgba8[3], 0);
    // Center logo pixel is far outside the threshold: alpha untouched.
    let center = ((1 * 4 + 1) * 4) as usize;
    assert_eq!(keyed.rgba8[center + 3], 255);
}

#[test]
fn keying_is_idempotent_for_the_same_inputs() {
    let img = logo_fixture();
    let a = key_out_background(&img, 72.0);
    let b = key_out_background(&img, 72.0);
    assert_eq!(a.rgba8, b.rgba8, "same inputs must give bit-identical masks");

    // Re-keying the keyed output changes nothing either: the mask only
    // depends on RGB, which the pass never touches.
    let c = key_out_background(&a, 72.0);
    assert_eq!(a.rgba8, c.rgba8);
}

#[test]
fn near_background_pixels_get_graduated_alpha() {
    let mut img = logo_fixture();
    // Nudge one background pixel slightly off the background color. Not a
    // corner: corners feed the sampled background average.
    let rgba = Arc::make_mut(&mut img.rgba8);
    let i = (2 * 4) as usize; // (2, 0)
    rgba[i] = 180;

    // Low tolerance -> wide threshold; the nudged pixel sits inside it.
    let keyed = key_out_background(&img, 50.0);
    let alpha = keyed.rgba8[i + 3];
    assert!(alpha > 0 && alpha < 255, "expected a soft edge, got {alpha}");
}

#[test]
fn higher_tolerance_keys_out_less() {
    let mut img = logo_fixture();
    let rgba = Arc::make_mut(&mut img.rgba8);
    let i = (2 * 4) as usize;
    rgba[i] = 160; // distance 40 from the background red

    // Tolerance 100 -> threshold 20: distance 40 survives untouched.
    let keyed = key_out_background(&img, 100.0);
    assert_eq!(keyed.rgba8[i + 3], 255);
    // Tolerance 50 -> threshold 95: distance 40 is keyed.
    let keyed = key_out_background(&img, 50.0);
    assert!(keyed.rgba8[i + 3] < 255);
}
