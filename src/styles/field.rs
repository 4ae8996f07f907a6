//! Field wave: twelve layered curves, each point mixing two sine phases,
//! with amplitude boosted by the instantaneous overall audio level. The
//! phase multipliers and boost factors are tuned presets, not derived
//! constants; they exist to look busy, and are matched to the preview.

use crate::audio::spectrum::map_band;
use crate::config::ColorMode;
use crate::foundation::core::{BezPath, Point};
use crate::foundation::math::hsl_to_rgb8;
use crate::styles::StyleCtx;

const LINE_COUNT: usize = 12;

pub(crate) fn render(ctx: &mut StyleCtx<'_>) {
    let count = ctx.cfg.bands().min(ctx.spectrum.len());
    if count == 0 {
        return;
    }

    let visual_width = ctx.visual_width();
    let start_x = ctx.span_start_x(visual_width);
    let field_height = ctx.height * f64::from(ctx.cfg.max_height()) * 2.0;
    let field_y = ctx.anchor_y();
    let sensitivity = f64::from(ctx.cfg.sensitivity());
    let spectrum_alpha = ctx.cfg.spectrum_alpha();
    let time = ctx.time;

    // Instantaneous overall level from the bottom 32 logical bands.
    let mut level_sum = 0.0f32;
    for j in 0..32 {
        level_sum += map_band(j, 32, ctx.spectrum);
    }
    let avg_level = f64::from(level_sum / 32.0 / 255.0);
    let boost = 1.0 + avg_level * 2.0;

    for line in 0..LINE_COUNT {
        let progress = line as f64 / (LINE_COUNT as f64 - 1.0);
        let alpha = ((0.4 + progress * 0.6) as f32) * spectrum_alpha;
        let thickness = ctx.thickness_or(2.0) * (0.8 + progress * 0.8);
        let glow = 15.0 + avg_level * 20.0;
        let y_offset = -field_height * progress;

        let mut path = BezPath::new();
        for i in 0..=count {
            let raw = f64::from(map_band(i, count, ctx.spectrum));
            let base_amplitude = 20.0 + raw / 255.0 * 60.0 * sensitivity;
            let amplitude = base_amplitude * boost;

            let u = i as f64 / count as f64;
            let x = start_x + u * visual_width;
            let phase1 = u * std::f64::consts::PI * 8.0 - time * 4.0 + line as f64 * 0.8;
            let phase2 = u * std::f64::consts::PI * 3.0 + time * 2.0 - line as f64 * 0.3;
            let combined = phase1.sin() * 0.7 + phase2.sin() * 0.3;
            let y = field_y + y_offset + combined * amplitude * (1.0 - progress * 0.4);

            let p = Point::new(x, y);
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }

        let color = match ctx.cfg.color_mode {
            ColorMode::Solid => ctx.cfg.primary_rgb(),
            ColorMode::Gradient => ctx
                .cfg
                .primary_rgb()
                .lerp(ctx.cfg.secondary_rgb(), progress as f32),
            ColorMode::Rainbow => {
                let hue =
                    progress as f32 * 60.0 - (time as f32) * 80.0 + 180.0;
                let (r, g, b) = hsl_to_rgb8(hue, 0.85, 0.5 + progress as f32 * 0.15);
                crate::foundation::core::Rgb8 { r, g, b }
            }
        };

        ctx.painter.stroke_glow(&path, thickness, color, alpha, glow);
    }
}
