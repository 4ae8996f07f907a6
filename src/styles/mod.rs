//! The eight spectrum-visualization styles.
//!
//! Each style is an independent module with a single `render` entry point
//! over the shared [`StyleCtx`]; adding or testing one never touches the
//! others. Dispatch is a plain match over the style enum.

use crate::audio::smoothing::BandSmoother;
use crate::audio::spectrum::map_band;
use crate::config::{ColorMode, VisualConfig, VisualStyle};
use crate::foundation::core::Rgb8;
use crate::foundation::error::SoniformResult;
use crate::foundation::math::hsl_to_rgb8;
use crate::render::painter::Painter;

mod bars;
mod circle;
mod field;
mod linear;
mod mini;
mod symmetric;
mod wave;

/// Everything a style needs for one frame.
pub(crate) struct StyleCtx<'a> {
    pub(crate) painter: &'a mut Painter,
    pub(crate) cfg: &'a VisualConfig,
    pub(crate) spectrum: &'a [u8],
    pub(crate) smoother: &'a mut BandSmoother,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) time: f64,
}

impl StyleCtx<'_> {
    /// Spectrum span in pixels.
    pub(crate) fn visual_width(&self) -> f64 {
        self.width * f64::from(self.cfg.spectrum_width.clamp(1.0, 100.0)) / 100.0
    }

    /// Left edge for width-spanning styles, honoring the centered override.
    pub(crate) fn span_start_x(&self, span: f64) -> f64 {
        if self.cfg.spectrum_pos.centered {
            (self.width - span) / 2.0
        } else {
            self.width * f64::from(self.cfg.spectrum_x_percent()) / 100.0 - span / 2.0
        }
    }

    /// Horizontal anchor for center-based styles.
    pub(crate) fn anchor_x(&self) -> f64 {
        if self.cfg.spectrum_pos.centered {
            self.width / 2.0
        } else {
            self.width * f64::from(self.cfg.spectrum_x_percent()) / 100.0
        }
    }

    /// Vertical anchor (baseline / center) in pixels.
    pub(crate) fn anchor_y(&self) -> f64 {
        self.height * f64::from(self.cfg.spectrum_pos.y) / 100.0
    }

    /// Line thickness with the preview's fallback when unset.
    pub(crate) fn thickness_or(&self, fallback: f64) -> f64 {
        let t = f64::from(self.cfg.spectrum_thickness);
        if t > 0.0 { t } else { fallback }
    }

    /// Mapped magnitude for a band, guarded for `count == 0` upstream.
    pub(crate) fn band(&self, index: usize, count: usize) -> f32 {
        map_band(index, count, self.spectrum)
    }
}

/// Resolve a per-band color.
///
/// `t` is the band position in [0, 1]; `hue_span`/`hue_rate` tune the
/// rainbow sweep per style (bars cycle the full wheel, symmetric half of it,
/// and the rates differ so the marching speed matches the preview).
pub(crate) fn band_color(
    cfg: &VisualConfig,
    t: f32,
    hue_span: f32,
    hue_rate: f32,
    time: f64,
) -> Rgb8 {
    match cfg.color_mode {
        ColorMode::Solid => cfg.primary_rgb(),
        ColorMode::Gradient => cfg.primary_rgb().lerp(cfg.secondary_rgb(), t),
        ColorMode::Rainbow => {
            let hue = t * hue_span - (time as f32) * hue_rate;
            let (r, g, b) = hsl_to_rgb8(hue, 0.85, 0.55);
            Rgb8 { r, g, b }
        }
    }
}

/// Build the horizontal stroke paint for curve styles: a three-stop
/// primary/secondary/primary sweep for gradient mode, or a marching hue ramp
/// for rainbow mode. `span` is (start_x, width_px) in canvas coordinates;
/// `hue_shift` offsets the rainbow per layer.
pub(crate) fn curve_stroke_paint(
    cfg: &VisualConfig,
    canvas_width: f64,
    span: (f64, f64),
    time: f64,
    hue_shift: f32,
    lightness: f32,
) -> SoniformResult<Option<vello_cpu::Image>> {
    let (start_x, span_w) = span;
    if span_w <= 0.0 {
        return Ok(None);
    }
    match cfg.color_mode {
        ColorMode::Solid => Ok(None),
        ColorMode::Gradient => {
            let primary = cfg.primary_rgb();
            let secondary = cfg.secondary_rgb();
            let img = crate::render::painter::hstrip_image(canvas_width.max(1.0) as u32, |x| {
                let rel = ((f64::from(x) - start_x) / span_w).clamp(0.0, 1.0) as f32;
                // Mirror around the midpoint: primary -> secondary -> primary.
                let t = 1.0 - (rel * 2.0 - 1.0).abs();
                let c = primary.lerp(secondary, t);
                [c.r, c.g, c.b, 255]
            })?;
            Ok(Some(img))
        }
        ColorMode::Rainbow => {
            let img = crate::render::painter::hstrip_image(canvas_width.max(1.0) as u32, |x| {
                let rel = ((f64::from(x) - start_x) / span_w).clamp(0.0, 1.0) as f32;
                let hue = rel * 360.0 - (time as f32) * 50.0 + hue_shift;
                let (r, g, b) = hsl_to_rgb8(hue, 0.75, lightness);
                [r, g, b, 255]
            })?;
            Ok(Some(img))
        }
    }
}

/// Render the active style. A band/point count that resolves to zero makes
/// the style a no-op rather than a divide-by-zero.
pub(crate) fn render_style(ctx: &mut StyleCtx<'_>) {
    match ctx.cfg.visual_style {
        VisualStyle::None => {}
        VisualStyle::Bars => bars::render(ctx),
        VisualStyle::Symmetric => symmetric::render(ctx),
        VisualStyle::Mini => mini::render(ctx),
        VisualStyle::Circle => circle::render(ctx),
        VisualStyle::Linear => linear::render(ctx),
        VisualStyle::Wave => wave::render(ctx),
        VisualStyle::Field => field::render(ctx),
    }
}
