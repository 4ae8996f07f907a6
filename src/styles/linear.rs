//! A single smooth curve above a baseline, built from quadratic segments
//! through the band midpoints.

use crate::config::ColorMode;
use crate::foundation::core::{BezPath, Point};
use crate::styles::{StyleCtx, curve_stroke_paint};

/// Point-count ceiling; the curve stops gaining detail past this.
const MAX_POINTS: usize = 64;

pub(crate) fn render(ctx: &mut StyleCtx<'_>) {
    let point_count = ctx.cfg.bands().min(ctx.spectrum.len()).min(MAX_POINTS);
    if point_count == 0 {
        return;
    }

    let visual_width = ctx.visual_width();
    let start_x = ctx.span_start_x(visual_width);
    let base_y = ctx.anchor_y();
    let max_wave = ctx.height * f64::from(ctx.cfg.max_height()) * 0.4;
    let sensitivity = f64::from(ctx.cfg.sensitivity());
    let alpha = ctx.cfg.spectrum_alpha();
    let factor = ctx
        .cfg
        .visual_style
        .fixed_smoothing()
        .unwrap_or(0.3);

    ctx.smoother.ensure_len(point_count);

    let mut points = Vec::with_capacity(point_count + 1);
    for i in 0..=point_count {
        let raw = ctx.band(i, point_count);
        // The closing endpoint is sampled but not part of the history.
        let value = if i < point_count {
            ctx.smoother.advance(i, raw, factor)
        } else {
            raw * factor
        };
        let wave = f64::from(value) / 255.0 * max_wave * sensitivity * 0.6;
        let x = start_x + (i as f64 / point_count as f64) * visual_width;
        points.push(Point::new(x, base_y - wave));
    }

    let path = midpoint_curve(&points);
    let thickness = ctx.thickness_or(3.0);
    let primary = ctx.cfg.primary_rgb();

    let strip = curve_stroke_paint(
        ctx.cfg,
        ctx.width,
        (start_x, visual_width),
        ctx.time,
        0.0,
        0.55,
    )
    .ok()
    .flatten();

    match (ctx.cfg.color_mode, strip) {
        (ColorMode::Solid, _) | (_, None) => {
            ctx.painter.stroke_glow(&path, thickness, primary, alpha, 12.0);
        }
        (_, Some(strip)) => {
            // Glow keeps the primary color; the stroke itself takes the ramp.
            ctx.painter.set_solid(primary, alpha * 0.15);
            ctx.painter.stroke_path(&path, thickness + 12.0 * 1.6);
            ctx.painter.set_solid(primary, alpha * 0.3);
            ctx.painter.stroke_path(&path, thickness + 12.0 * 0.7);

            let paint = crate::render::painter::ImagePaint {
                paint: strip,
                w: ctx.width.max(1.0) as u32,
                h: 1,
            };
            ctx.painter.push_opacity(alpha);
            ctx.painter.set_image(&paint);
            ctx.painter.stroke_path(&path, thickness);
            ctx.painter.pop_opacity();
        }
    }
}

/// Quadratic chain with each segment's control at the sample and its end at
/// the midpoint to the next sample, closing with a straight segment.
pub(crate) fn midpoint_curve(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);
    for i in 1..points.len().saturating_sub(1) {
        let control = points[i];
        let next = points[i + 1];
        let mid = Point::new((control.x + next.x) / 2.0, (control.y + next.y) / 2.0);
        path.quad_to(control, mid);
    }
    if let Some(&last) = points.last()
        && points.len() > 1
    {
        path.line_to(last);
    }
    path
}
