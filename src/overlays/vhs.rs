//! VHS: scanlines, sinusoidal chromatic aberration, a probabilistic glitch
//! block, and a few noise lines at index-seeded (frame-stable) heights.

use crate::foundation::math::Rng64;
use crate::overlays::fill_rect_over;

pub(crate) fn apply(
    frame: &mut [u8],
    width: u32,
    height: u32,
    intensity: f32,
    time: f64,
    rng: &mut Rng64,
) {
    let (w, h) = (i64::from(width), i64::from(height));

    // Scanlines: every other row darkened.
    let scan_alpha = 0.2 * intensity;
    let mut y = 0;
    while y < h {
        fill_rect_over(frame, width, height, 0, y, w, y + 1, (0, 0, 0), scan_alpha);
        y += 2;
    }

    // Chromatic aberration: red pushed one way, cyan the other.
    let shift = (time * 3.0).sin() * 4.0 * f64::from(intensity);
    let chroma_alpha = 0.35 * intensity * 0.15;
    let red_x = (shift + 3.0 * f64::from(intensity)) as i64;
    fill_rect_over(
        frame,
        width,
        height,
        red_x,
        0,
        w,
        h,
        (255, 0, 0),
        chroma_alpha,
    );
    let cyan_x = (-shift - 3.0 * f64::from(intensity)) as i64;
    fill_rect_over(
        frame,
        width,
        height,
        cyan_x,
        0,
        cyan_x + w,
        h,
        (0, 255, 255),
        chroma_alpha,
    );

    // One glitch block, some frames.
    if rng.next_f32_01() < 0.4 * intensity {
        let bx = (rng.next_f64_01() * f64::from(width) * 0.8) as i64;
        let by = (rng.next_f64_01() * f64::from(height)) as i64;
        let bw = (60.0 + rng.next_f64_01() * 120.0) as i64;
        let bh = (5.0 + rng.next_f64_01() * 15.0) as i64;
        let color = (
            (rng.next_f32_01() * 255.0) as u8,
            (rng.next_f32_01() * 255.0) as u8,
            (rng.next_f32_01() * 255.0) as u8,
        );
        fill_rect_over(
            frame,
            width,
            height,
            bx,
            by,
            bx + bw,
            by + bh,
            color,
            0.5 * intensity * 0.35,
        );
    }

    // Noise lines: positions seeded by index, not frame, so they hold still.
    let line_count = (5.0 * intensity) as usize;
    for i in 0..line_count {
        let ly = (((i as f64) * 123.456).sin() * 0.5 + 0.5) * f64::from(height);
        let alpha = (0.3 + rng.next_f32_01() * 0.2) * 0.25 * intensity;
        fill_rect_over(
            frame,
            width,
            height,
            0,
            ly as i64,
            w,
            ly as i64 + 1,
            (255, 255, 255),
            alpha,
        );
    }
}
