//! Compact bar cluster: reduced band count, half the footprint of `bars`,
//! fixed smoothing instead of the user speed knob.

use crate::foundation::core::Rect;
use crate::styles::{StyleCtx, band_color};

pub(crate) fn render(ctx: &mut StyleCtx<'_>) {
    let count = (ctx.cfg.bands() / 3).clamp(16, 32);

    let bar_width = f64::from(ctx.cfg.spectrum_bar_width.max(0.5));
    let gap = f64::from(ctx.cfg.spectrum_bar_gap.max(0.0));
    let requested = count as f64 * bar_width + (count as f64 - 1.0) * gap;
    let mini_span = ctx.visual_width() * 0.5;

    let scale = if requested > mini_span {
        mini_span / requested
    } else {
        1.0
    };
    let actual_bar = (bar_width * scale).max(2.0);
    let actual_gap = gap * scale;
    let total = count as f64 * actual_bar + (count as f64 - 1.0) * actual_gap;

    let start_x = ctx.span_start_x(total);
    let base_y = ctx.anchor_y();
    let max_height = ctx.height * f64::from(ctx.cfg.max_height()) * 0.6;
    let sensitivity = f64::from(ctx.cfg.sensitivity());
    let alpha = ctx.cfg.spectrum_alpha();
    let factor = ctx
        .cfg
        .visual_style
        .fixed_smoothing()
        .unwrap_or(0.4);

    ctx.smoother.ensure_len(count);

    for i in 0..count {
        let raw = ctx.band(i, count);
        let value = ctx.smoother.advance(i, raw, factor);

        let height = (f64::from(value) / 255.0 * max_height * sensitivity * 0.6).max(3.0);
        let x = start_x + i as f64 * (actual_bar + actual_gap);

        let t = i as f32 / count as f32;
        let color = band_color(ctx.cfg, t, 300.0, 40.0, ctx.time);

        ctx.painter.fill_rect_glow(
            Rect::new(x, base_y - height, x + actual_bar, base_y),
            color,
            alpha,
            8.0,
        );
    }
}
