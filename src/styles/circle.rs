//! Radial spokes around a center point: 12 o'clock start, clockwise, spoke
//! length proportional to magnitude, with an inner glow ring.

use crate::config::ColorMode;
use crate::foundation::core::{BezPath, Point, Rgb8};
use crate::foundation::math::hsl_to_rgb8;
use crate::styles::{StyleCtx, band_color};

/// Spoke count ceiling; beyond this the ring reads as a solid disc.
const MAX_SPOKES: usize = 90;

pub(crate) fn render(ctx: &mut StyleCtx<'_>) {
    let count = ctx.cfg.bands().min(MAX_SPOKES);
    if count == 0 {
        return;
    }

    let center_x = ctx.anchor_x();
    let center_y = ctx.anchor_y();

    let max_radius =
        ctx.width.min(ctx.height) * 0.3 * f64::from(ctx.cfg.spectrum_width.clamp(1.0, 100.0))
            / 100.0;
    let base_radius = max_radius * 0.5;
    let max_spoke = max_radius * f64::from(ctx.cfg.max_height()) * 0.6;

    let sensitivity = f64::from(ctx.cfg.sensitivity());
    let alpha = ctx.cfg.spectrum_alpha();
    let spoke_width = f64::from(ctx.cfg.spectrum_bar_width).max(2.0);
    let factor = ctx
        .cfg
        .visual_style
        .fixed_smoothing()
        .unwrap_or(0.35);

    ctx.smoother.ensure_len(count);

    for i in 0..count {
        let raw = ctx.band(i, count);
        let value = ctx.smoother.advance(i, raw, factor);
        let len = (f64::from(value) / 255.0 * max_spoke * sensitivity * 0.5).max(3.0);

        let angle = (i as f64 / count as f64) * std::f64::consts::TAU - std::f64::consts::FRAC_PI_2;
        let (sin, cos) = angle.sin_cos();
        let p1 = Point::new(center_x + cos * base_radius, center_y + sin * base_radius);
        let p2 = Point::new(
            center_x + cos * (base_radius + len),
            center_y + sin * (base_radius + len),
        );

        let t = i as f32 / count as f32;
        let color = band_color(ctx.cfg, t, 360.0, 50.0, ctx.time);

        let mut spoke = BezPath::new();
        spoke.move_to(p1);
        spoke.line_to(p2);
        ctx.painter.stroke_glow(&spoke, spoke_width, color, alpha, 8.0);
    }

    // Inner glow ring just inside the spoke base.
    let ring_color = match ctx.cfg.color_mode {
        ColorMode::Rainbow => {
            let (r, g, b) = hsl_to_rgb8((ctx.time as f32) * 50.0 % 360.0, 0.7, 0.5);
            Rgb8 { r, g, b }
        }
        _ => ctx.cfg.primary_rgb(),
    };
    let ring = circle_path(center_x, center_y, base_radius * 0.9);
    ctx.painter
        .stroke_glow(&ring, 2.0, ring_color, alpha * 0.27, 15.0);
}

fn circle_path(cx: f64, cy: f64, r: f64) -> BezPath {
    use kurbo::Shape;
    let mut path = BezPath::new();
    for el in kurbo::Circle::new((cx, cy), r.max(0.1)).path_elements(0.1) {
        path.push(el);
    }
    path
}
