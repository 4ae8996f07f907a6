//! Beat pulse: center-out radial glow and border glow scaled by the audio
//! level, with a gentle sine idle pulse when no level is available, and a
//! full-screen flash above the beat threshold.

use crate::overlays::{fill_rect_over, radial_add};

/// Audio level below this falls back to the idle pulse.
const LEVEL_FLOOR: f32 = 0.1;
/// Audio level above this adds the flash.
const FLASH_THRESHOLD: f32 = 0.6;

pub(crate) fn apply(
    frame: &mut [u8],
    width: u32,
    height: u32,
    intensity: f32,
    audio_level: Option<f32>,
    time: f64,
) {
    let level = audio_level.unwrap_or(0.0);
    let base_pulse = ((time * 3.0).sin() * 0.4 + 0.6) as f32;
    let pulse = if level > LEVEL_FLOOR {
        level * intensity * 1.5
    } else {
        base_pulse * intensity * 0.6
    };

    let (wf, hf) = (f64::from(width), f64::from(height));

    radial_add(
        frame,
        width,
        height,
        wf / 2.0,
        hf / 2.0,
        wf * 0.7,
        &[
            (0.0, 255, 255, 255, 0.6 * intensity),
            (0.3, 255, 255, 255, 0.3 * intensity),
            (0.6, 255, 255, 255, 0.1 * intensity),
            (1.0, 255, 255, 255, 0.0),
        ],
        pulse * 0.5,
    );

    // Border glow whose thickness grows with the pulse.
    let (w, h) = (i64::from(width), i64::from(height));
    let thickness = (4.0 + f64::from(pulse) * 15.0) as i64;
    let border_alpha = pulse * 0.5 * 0.9;
    fill_rect_over(frame, width, height, 0, 0, w, thickness, (255, 255, 255), border_alpha);
    fill_rect_over(
        frame,
        width,
        height,
        0,
        h - thickness,
        w,
        h,
        (255, 255, 255),
        border_alpha,
    );
    fill_rect_over(
        frame,
        width,
        height,
        0,
        thickness,
        thickness,
        h - thickness,
        (255, 255, 255),
        border_alpha,
    );
    fill_rect_over(
        frame,
        width,
        height,
        w - thickness,
        thickness,
        w,
        h - thickness,
        (255, 255, 255),
        border_alpha,
    );

    if level > FLASH_THRESHOLD {
        let flash_alpha = (level - FLASH_THRESHOLD) * intensity * 0.8 * 0.3;
        fill_rect_over(frame, width, height, 0, 0, w, h, (255, 255, 255), flash_alpha);
    }
}
