//! Film grain: pure per-frame noise, no temporal coherence.

use crate::foundation::math::Rng64;
use crate::overlays::fill_rect_over;

pub(crate) fn apply(frame: &mut [u8], width: u32, height: u32, intensity: f32, rng: &mut Rng64) {
    let count = (5000.0 * intensity) as usize;
    for _ in 0..count {
        let x = (rng.next_f64_01() * f64::from(width)) as i64;
        let y = (rng.next_f64_01() * f64::from(height)) as i64;
        let gray = if rng.next_f32_01() > 0.5 { 255 } else { 0 };
        let alpha = rng.next_f32_01() * 0.25 * intensity + 0.05 * intensity;
        let dw = (rng.next_f64_01() * 2.0 + 1.0) as i64;
        let dh = (rng.next_f64_01() * 2.0 + 1.0) as i64;
        fill_rect_over(
            frame,
            width,
            height,
            x,
            y,
            x + dw,
            y + dh,
            (gray, gray, gray),
            alpha,
        );
    }
}
