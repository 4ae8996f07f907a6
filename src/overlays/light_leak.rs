//! Light leak: two radial gradients orbiting on slow sine/cosine tracks,
//! composited additively, plus a static corner glow.

use crate::overlays::radial_add;

pub(crate) fn apply(frame: &mut [u8], width: u32, height: u32, intensity: f32, time: f64) {
    let (wf, hf) = (f64::from(width), f64::from(height));
    let global = 0.7 * intensity;

    // Warm primary leak.
    let x = ((time * 0.5).sin() + 1.0) * wf * 0.4;
    let y = ((time * 0.3).cos() + 1.0) * hf * 0.3;
    radial_add(
        frame,
        width,
        height,
        x,
        y,
        wf * 0.6,
        &[
            (0.0, 255, 180, 80, 0.9 * intensity),
            (0.3, 255, 120, 50, 0.5 * intensity),
            (0.6, 255, 60, 60, 0.2 * intensity),
            (1.0, 0, 0, 0, 0.0),
        ],
        global,
    );

    // Cool secondary leak opposite the first.
    let x2 = wf - x * 0.5;
    let y2 = hf - y * 0.3;
    radial_add(
        frame,
        width,
        height,
        x2,
        y2,
        wf * 0.5,
        &[
            (0.0, 80, 180, 255, 0.8 * intensity),
            (0.3, 150, 80, 255, 0.4 * intensity),
            (1.0, 0, 0, 0, 0.0),
        ],
        global,
    );

    // Static corner glow.
    radial_add(
        frame,
        width,
        height,
        0.0,
        0.0,
        wf * 0.4,
        &[(0.0, 255, 200, 150, 0.6 * intensity), (1.0, 0, 0, 0, 0.0)],
        0.5 * intensity,
    );
}
