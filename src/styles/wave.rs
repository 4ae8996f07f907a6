//! Three parallel curves from the same mapped values, center emphasized.
//! No persistent smoothing: the waves ride the raw mapped magnitudes.

use crate::config::ColorMode;
use crate::foundation::core::Point;
use crate::styles::{StyleCtx, curve_stroke_paint};
use crate::styles::linear::midpoint_curve;

const WAVE_COUNT: usize = 3;
const WAVE_SPACING: f64 = 10.0;

pub(crate) fn render(ctx: &mut StyleCtx<'_>) {
    let count = ctx.cfg.bands().min(ctx.spectrum.len());
    if count == 0 {
        return;
    }

    let visual_width = ctx.visual_width();
    let start_x = ctx.span_start_x(visual_width);
    let base_y = ctx.anchor_y();
    let max_wave = ctx.height * f64::from(ctx.cfg.max_height()) * 0.35;
    let sensitivity = f64::from(ctx.cfg.sensitivity());
    let spectrum_alpha = ctx.cfg.spectrum_alpha();
    let primary = ctx.cfg.primary_rgb();

    // All three waves share one set of mapped heights.
    let mut heights = Vec::with_capacity(count + 1);
    for i in 0..=count {
        let raw = ctx.band(i, count);
        heights.push(f64::from(raw) / 255.0 * max_wave * sensitivity * 0.5);
    }

    for w in 0..WAVE_COUNT {
        let is_center = w == 1;
        let emphasis: f32 = if is_center { 1.0 } else { 0.6 };
        let alpha = emphasis * spectrum_alpha;
        let weight = if is_center { 1.3 } else { 0.9 };
        let thickness = ctx.thickness_or(3.0) * weight;
        let glow = if is_center { 15.0 } else { 8.0 };
        let y_offset = (w as f64 - 1.0) * WAVE_SPACING;

        let points: Vec<Point> = heights
            .iter()
            .enumerate()
            .map(|(i, &hv)| {
                Point::new(
                    start_x + (i as f64 / count as f64) * visual_width,
                    base_y + y_offset - hv,
                )
            })
            .collect();
        let path = midpoint_curve(&points);

        let strip = curve_stroke_paint(
            ctx.cfg,
            ctx.width,
            (start_x, visual_width),
            ctx.time,
            w as f32 * 40.0,
            0.55,
        )
        .ok()
        .flatten();

        match (ctx.cfg.color_mode, strip) {
            (ColorMode::Solid, _) | (_, None) => {
                ctx.painter.stroke_glow(&path, thickness, primary, alpha, glow);
            }
            (_, Some(strip)) => {
                ctx.painter.set_solid(primary, alpha * 0.15);
                ctx.painter.stroke_path(&path, thickness + glow * 1.6);
                ctx.painter.set_solid(primary, alpha * 0.3);
                ctx.painter.stroke_path(&path, thickness + glow * 0.7);

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
}
