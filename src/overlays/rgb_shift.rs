//! RGB shift: oscillating red/cyan offset fills, moving hue stripes, and a
//! colored double outline.

use crate::foundation::math::hsl_to_rgb8;
use crate::overlays::fill_rect_over;

pub(crate) fn apply(frame: &mut [u8], width: u32, height: u32, intensity: f32, time: f64) {
    let (w, h) = (i64::from(width), i64::from(height));
    let shift = (time * 2.0).sin() * 8.0 * f64::from(intensity) + 5.0 * f64::from(intensity);
    let fill_alpha = 0.35 * intensity * 0.4;

    // Red layer pushed right, cyan layer pushed left.
    fill_rect_over(
        frame,
        width,
        height,
        shift as i64,
        0,
        w,
        h,
        (255, 0, 50),
        fill_alpha,
    );
    fill_rect_over(
        frame,
        width,
        height,
        0,
        0,
        w - shift as i64,
        h,
        (0, 200, 255),
        fill_alpha,
    );

    // Moving horizontal rainbow stripes.
    let stripe_count = 8;
    let stripe_alpha = 0.2 * intensity * 0.4;
    for i in 0..stripe_count {
        let ly = (time * 80.0 + f64::from(i) * f64::from(height) / f64::from(stripe_count))
            % f64::from(height);
        let hue = (f64::from(i) * 45.0 + time * 50.0) % 360.0;
        let (r, g, b) = hsl_to_rgb8(hue as f32, 1.0, 0.5);
        fill_rect_over(
            frame,
            width,
            height,
            0,
            ly as i64,
            w,
            ly as i64 + 3,
            (r, g, b),
            stripe_alpha,
        );
    }

    // Double outline border.
    let border_alpha = 0.4 * intensity * 0.5;
    let s = shift as i64;
    outline(frame, width, height, s, s, w - s, h - s, 3, (255, 0, 100), border_alpha);
    outline(
        frame,
        width,
        height,
        -s + 2,
        -s + 2,
        w + s - 2,
        h + s - 2,
        3,
        (0, 255, 200),
        border_alpha,
    );
}

#[allow(clippy::too_many_arguments)]
fn outline(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    thickness: i64,
    rgb: (u8, u8, u8),
    alpha: f32,
) {
    fill_rect_over(frame, width, height, x0, y0, x1, y0 + thickness, rgb, alpha);
    fill_rect_over(frame, width, height, x0, y1 - thickness, x1, y1, rgb, alpha);
    fill_rect_over(
        frame,
        width,
        height,
        x0,
        y0 + thickness,
        x0 + thickness,
        y1 - thickness,
        rgb,
        alpha,
    );
    fill_rect_over(
        frame,
        width,
        height,
        x1 - thickness,
        y0 + thickness,
        x1,
        y1 - thickness,
        rgb,
        alpha,
    );
}
