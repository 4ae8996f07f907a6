//! Mirrored bars: half the bands, each drawn twice outward from a center
//! line. Only `band_count / 2` independent samples exist; the mirror is
//! exact by construction regardless of color mode.

use crate::foundation::core::Rect;
use crate::styles::{StyleCtx, band_color};

pub(crate) fn render(ctx: &mut StyleCtx<'_>) {
    let half_count = ctx.cfg.bands() / 2;
    if half_count == 0 {
        return;
    }

    let visual_width = ctx.visual_width();
    let bar_width = f64::from(ctx.cfg.spectrum_bar_width.max(0.5));
    let gap = f64::from(ctx.cfg.spectrum_bar_gap.max(0.0));

    let half_width = half_count as f64 * bar_width + (half_count as f64 - 1.0) * gap;
    let total = half_width * 2.0 + gap;
    let scale = if total > visual_width {
        visual_width / total
    } else {
        1.0
    };
    let actual_bar = (bar_width * scale).max(1.0);
    let actual_gap = gap * scale;

    let center_x = ctx.anchor_x();
    let base_y = ctx.anchor_y();
    let factor = ctx.cfg.smoothing_factor();
    let sensitivity = f64::from(ctx.cfg.sensitivity());
    let max_height = f64::from(ctx.cfg.max_height());
    let alpha = ctx.cfg.spectrum_alpha();

    ctx.smoother.ensure_len(half_count);

    for i in 0..half_count {
        let raw = ctx.band(i, half_count);
        let value = ctx.smoother.advance(i, raw, factor);

        let height = (f64::from(value) / 255.0 * ctx.height * max_height * sensitivity * 0.5)
            .max(4.0);
        let offset = (i as f64 + 0.5) * (actual_bar + actual_gap);

        let t = i as f32 / half_count as f32;
        let color = band_color(ctx.cfg, t, 180.0, 50.0, ctx.time);

        let right = Rect::new(
            center_x + offset - actual_bar / 2.0,
            base_y - height,
            center_x + offset + actual_bar / 2.0,
            base_y,
        );
        let left = Rect::new(
            center_x - offset - actual_bar / 2.0,
            base_y - height,
            center_x - offset + actual_bar / 2.0,
            base_y,
        );
        ctx.painter.fill_rect_glow(right, color, alpha, 6.0);
        ctx.painter.fill_rect_glow(left, color, alpha, 6.0);
    }
}
