//! Bottom-anchored vertical bars, the default style.

use crate::foundation::core::Rect;
use crate::styles::{StyleCtx, band_color};

pub(crate) fn render(ctx: &mut StyleCtx<'_>) {
    let count = ctx.cfg.bands();
    if count == 0 {
        return;
    }

    let visual_width = ctx.visual_width();
    let bar_width = f64::from(ctx.cfg.spectrum_bar_width.max(0.5));
    let gap = f64::from(ctx.cfg.spectrum_bar_gap.max(0.0));
    let requested = count as f64 * bar_width + (count as f64 - 1.0) * gap;

    // Rescale the layout to fit the configured span instead of overflowing.
    let scale = if requested > visual_width {
        visual_width / requested
    } else {
        1.0
    };
    let actual_bar = (bar_width * scale).max(1.0);
    let actual_gap = gap * scale;
    let total = count as f64 * actual_bar + (count as f64 - 1.0) * actual_gap;

    let start_x = ctx.span_start_x(total);
    let base_y = ctx.anchor_y();
    let factor = ctx.cfg.smoothing_factor();
    let sensitivity = f64::from(ctx.cfg.sensitivity());
    let max_height = f64::from(ctx.cfg.max_height());
    let alpha = ctx.cfg.spectrum_alpha();

    ctx.smoother.ensure_len(count);

    for i in 0..count {
        let raw = ctx.band(i, count);
        let value = ctx.smoother.advance(i, raw, factor);

        let height = (f64::from(value) / 255.0 * ctx.height * max_height * sensitivity * 0.5)
            .max(2.0);
        let x = start_x + i as f64 * (actual_bar + actual_gap);

        let t = i as f32 / count as f32;
        let color = band_color(ctx.cfg, t, 360.0, 50.0, ctx.time);

        ctx.painter.set_solid(color, alpha);
        ctx.painter
            .fill_rect(Rect::new(x, base_y - height, x + actual_bar, base_y));
    }
}
