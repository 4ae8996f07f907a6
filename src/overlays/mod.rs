//! Full-frame generative post passes over the premultiplied frame buffer.
//!
//! Ordering is fixed: light -> rgb -> pulse -> vhs -> grain, after all
//! geometry. Later passes are designed to sit visually on top. Camera shake
//! is not a pass here; it is a pre-draw translation owned by the compositor.

use crate::config::{OverlayKind, VisualConfig};
use crate::foundation::math::{Rng64, mul_div255_u8};

mod grain;
mod light_leak;
mod pulse;
mod rgb_shift;
pub(crate) mod shake;
mod vhs;

/// Apply every enabled overlay in the canonical order.
pub(crate) fn apply_overlays(
    frame: &mut [u8],
    width: u32,
    height: u32,
    cfg: &VisualConfig,
    time: f64,
    audio_level: Option<f32>,
    rng: &mut Rng64,
) {
    if cfg.overlay_enabled(OverlayKind::Light) {
        light_leak::apply(
            frame,
            width,
            height,
            cfg.overlay_intensity(OverlayKind::Light),
            time,
        );
    }
    if cfg.overlay_enabled(OverlayKind::Rgb) {
        rgb_shift::apply(
            frame,
            width,
            height,
            cfg.overlay_intensity(OverlayKind::Rgb),
            time,
        );
    }
    if cfg.overlay_enabled(OverlayKind::Pulse) {
        pulse::apply(
            frame,
            width,
            height,
            cfg.overlay_intensity(OverlayKind::Pulse),
            audio_level,
            time,
        );
    }
    if cfg.overlay_enabled(OverlayKind::Vhs) {
        vhs::apply(
            frame,
            width,
            height,
            cfg.overlay_intensity(OverlayKind::Vhs),
            time,
            rng,
        );
    }
    if cfg.overlay_enabled(OverlayKind::Grain) {
        grain::apply(
            frame,
            width,
            height,
            cfg.overlay_intensity(OverlayKind::Grain),
            rng,
        );
    }
}

/// Source-over one straight-alpha color onto a premultiplied pixel.
pub(crate) fn blend_px_over(px: &mut [u8], r: u8, g: u8, b: u8, alpha: f32) {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u16;
    if a == 0 {
        return;
    }
    let inv = 255 - a;
    px[0] = mul_div255_u8(u16::from(r), a).saturating_add(mul_div255_u8(u16::from(px[0]), inv));
    px[1] = mul_div255_u8(u16::from(g), a).saturating_add(mul_div255_u8(u16::from(px[1]), inv));
    px[2] = mul_div255_u8(u16::from(b), a).saturating_add(mul_div255_u8(u16::from(px[2]), inv));
    px[3] = (a as u8).saturating_add(mul_div255_u8(u16::from(px[3]), inv));
}

/// Additively blend one straight-alpha color onto a premultiplied pixel
/// (the canvas `lighter` composite).
pub(crate) fn blend_px_add(px: &mut [u8], r: u8, g: u8, b: u8, alpha: f32) {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u16;
    if a == 0 {
        return;
    }
    px[0] = px[0].saturating_add(mul_div255_u8(u16::from(r), a));
    px[1] = px[1].saturating_add(mul_div255_u8(u16::from(g), a));
    px[2] = px[2].saturating_add(mul_div255_u8(u16::from(b), a));
    px[3] = px[3].saturating_add(a as u8);
}

/// Source-over a solid color over a clipped rect region.
pub(crate) fn fill_rect_over(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    rgb: (u8, u8, u8),
    alpha: f32,
) {
    let (w, h) = (i64::from(width), i64::from(height));
    let x0 = x0.clamp(0, w);
    let x1 = x1.clamp(0, w);
    let y0 = y0.clamp(0, h);
    let y1 = y1.clamp(0, h);
    for y in y0..y1 {
        let row = (y as usize) * (width as usize) * 4;
        for x in x0..x1 {
            let i = row + (x as usize) * 4;
            blend_px_over(&mut frame[i..i + 4], rgb.0, rgb.1, rgb.2, alpha);
        }
    }
}

/// Additively fill a radial gradient. `stops` are (t, r, g, b, alpha) with
/// t in [0, 1] of `radius`; pixels outside the last stop are untouched.
pub(crate) fn radial_add(
    frame: &mut [u8],
    width: u32,
    height: u32,
    cx: f64,
    cy: f64,
    radius: f64,
    stops: &[(f32, u8, u8, u8, f32)],
    global_alpha: f32,
) {
    if radius <= 0.0 || stops.len() < 2 || global_alpha <= 0.0 {
        return;
    }
    let (w, h) = (width as i64, height as i64);
    let x0 = ((cx - radius).floor() as i64).clamp(0, w);
    let x1 = ((cx + radius).ceil() as i64).clamp(0, w);
    let y0 = ((cy - radius).floor() as i64).clamp(0, h);
    let y1 = ((cy + radius).ceil() as i64).clamp(0, h);

    for y in y0..y1 {
        let row = (y as usize) * (width as usize) * 4;
        for x in x0..x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let t = ((dx * dx + dy * dy).sqrt() / radius) as f32;
            if t >= stops[stops.len() - 1].0 {
                continue;
            }
            let (r, g, b, a) = sample_stops(stops, t);
            if a <= 0.0 {
                continue;
            }
            let i = row + (x as usize) * 4;
            blend_px_add(&mut frame[i..i + 4], r, g, b, a * global_alpha);
        }
    }
}

fn sample_stops(stops: &[(f32, u8, u8, u8, f32)], t: f32) -> (u8, u8, u8, f32) {
    let mut prev = stops[0];
    if t <= prev.0 {
        return (prev.1, prev.2, prev.3, prev.4);
    }
    for &stop in &stops[1..] {
        if t <= stop.0 {
            let span = (stop.0 - prev.0).max(1e-6);
            let u = (t - prev.0) / span;
            let mix = |a: u8, b: u8| -> u8 {
                (f32::from(a) + (f32::from(b) - f32::from(a)) * u).round() as u8
            };
            return (
                mix(prev.1, stop.1),
                mix(prev.2, stop.2),
                mix(prev.3, stop.3),
                prev.4 + (stop.4 - prev.4) * u,
            );
        }
        prev = stop;
    }
    let last = stops[stops.len() - 1];
    (last.1, last.2, last.3, last.4)
}

#[cfg(test)]
#[path = "../../tests/unit/overlays.rs"]
mod tests;
