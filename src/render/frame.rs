//! The compositor: one `render_frame` call per tick fuses background,
//! vignette, spectrum, logo, particles and overlays into the frame buffer.
//!
//! All mutable animation state (smoothing array, particle pool, derived
//! image caches) lives on the instance, not in globals; lifecycle is tied
//! to the instance and caches are keyed by the config fields that feed them.

use tracing::debug;

use crate::assets::decode::PreparedImage;
use crate::assets::logo::key_out_background;
use crate::audio::sampler::AudioFrame;
use crate::audio::smoothing::BandSmoother;
use crate::audio::spectrum::average_level;
use crate::config::{OverlayKind, VisualConfig, VisualStyle};
use crate::foundation::core::{Canvas, FrameRGBA, Rect, Vec2};
use crate::foundation::error::SoniformResult;
use crate::foundation::math::Rng64;
use crate::overlays;
use crate::particles::sim::ParticleSim;
use crate::render::filters;
use crate::render::painter::{ImagePaint, Painter};
use crate::styles::{StyleCtx, render_style};

struct BackgroundCache {
    key: (crate::config::FilterKind, u32, u64),
    paint: ImagePaint,
}

struct LogoCache {
    key: (bool, u32, u64),
    paint: ImagePaint,
    aspect: f64,
}

struct VignetteCache {
    key: u32,
    mask: Vec<u8>,
}

/// Per-instance frame driver. See the module docs for the pass order.
pub struct Compositor {
    canvas: Canvas,
    seed: u64,
    frame_counter: u64,

    painter: Painter,
    frame: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    out: FrameRGBA,

    smoother: BandSmoother,
    particles: ParticleSim,

    background: Option<PreparedImage>,
    background_generation: u64,
    background_cache: Option<BackgroundCache>,

    logo: Option<PreparedImage>,
    logo_generation: u64,
    logo_cache: Option<LogoCache>,

    vignette_cache: Option<VignetteCache>,
    blur_scratch: Vec<u8>,
}

impl Compositor {
    /// Create a compositor for `canvas`. `seed` drives every stochastic
    /// effect, so a preview and an export with the same seed replay
    /// identically.
    pub fn new(canvas: Canvas, seed: u64) -> SoniformResult<Self> {
        let w = canvas.width as u16;
        let h = canvas.height as u16;
        Ok(Self {
            canvas,
            seed,
            frame_counter: 0,
            painter: Painter::new(w, h),
            frame: vello_cpu::Pixmap::new(w, h),
            scratch: vello_cpu::Pixmap::new(w, h),
            out: FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data: vec![0; canvas.width as usize * canvas.height as usize * 4],
            },
            smoother: BandSmoother::new(),
            particles: ParticleSim::new(seed ^ 0x70_61_72_74),
            background: None,
            background_generation: 0,
            background_cache: None,
            logo: None,
            logo_generation: 0,
            logo_cache: None,
            vignette_cache: None,
            blur_scratch: Vec::new(),
        })
    }

    /// Canvas size this compositor renders at.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Install or clear the background image.
    pub fn set_background(&mut self, image: Option<PreparedImage>) {
        self.background = image;
        self.background_generation += 1;
        self.background_cache = None;
    }

    /// Install or clear the logo image.
    pub fn set_logo(&mut self, image: Option<PreparedImage>) {
        self.logo = image;
        self.logo_generation += 1;
        self.logo_cache = None;
    }

    /// Render one frame.
    ///
    /// `audio` is the latest spectrum snapshot or `None` when no audio is
    /// available; with `None` the spectrum step is skipped but everything
    /// else (background, vignette, logo, particles, overlays) still renders,
    /// so the output is never blank. `time_secs` is wall-clock-style elapsed
    /// time; every time-based effect keys off it rather than frame count, so
    /// variable frame intervals stay visually consistent.
    pub fn render_frame(
        &mut self,
        cfg: &VisualConfig,
        audio: Option<&AudioFrame>,
        time_secs: f64,
    ) -> &FrameRGBA {
        self.frame_counter += 1;
        let mut frame_rng = Rng64::new(
            self.seed ^ self.frame_counter.wrapping_mul(0xD6E8_FEB8_6659_FD93),
        );

        let shake = if cfg.overlay_enabled(OverlayKind::Shake) {
            overlays::shake::offset(cfg.overlay_intensity(OverlayKind::Shake), &mut frame_rng)
        } else {
            Vec2::ZERO
        };

        // Pass 1: background (through its filter) into the frame buffer.
        // Rendering replaces the buffer, which doubles as the frame clear.
        self.ensure_background_cache(cfg);
        self.painter.begin(shake);
        if let Some(cache) = &self.background_cache {
            let dst = Rect::new(
                0.0,
                0.0,
                f64::from(self.canvas.width),
                f64::from(self.canvas.height),
            );
            self.painter.draw_image(&cache.paint, dst);
        }
        self.painter.finish_into(&mut self.frame);

        // Vignette darkens the base before any geometry lands on top.
        let vignette = cfg.vignette_strength.clamp(0.0, 100.0) / 100.0;
        if vignette > 0.0 {
            self.ensure_vignette_cache(vignette);
            if let Some(cache) = &self.vignette_cache {
                filters::apply_black_mask(self.frame.data_as_u8_slice_mut(), &cache.mask);
            }
        }

        // Pass 2: spectrum, logo, particles.
        self.ensure_logo_cache(cfg);
        self.painter.begin(shake);
        let spectrum = audio.map(|a| a.bins());
        if cfg.visual_style != VisualStyle::None
            && let Some(spectrum) = spectrum
        {
            let mut ctx = StyleCtx {
                painter: &mut self.painter,
                cfg,
                spectrum,
                smoother: &mut self.smoother,
                width: f64::from(self.canvas.width),
                height: f64::from(self.canvas.height),
                time: time_secs,
            };
            render_style(&mut ctx);
        }
        if let Some(cache) = &self.logo_cache {
            let x = f64::from(self.canvas.width) * f64::from(cfg.logo_pos.x) / 100.0;
            let y = f64::from(self.canvas.height) * f64::from(cfg.logo_pos.y) / 100.0;
            let w = f64::from(cfg.logo_size.clamp(20.0, 1000.0));
            let h = w / cache.aspect;
            self.painter.draw_image(&cache.paint, Rect::new(x, y, x + w, y + h));
        }
        self.particles.tick(
            &mut self.painter,
            cfg,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
            time_secs,
        );
        self.painter.finish_into(&mut self.scratch);
        filters::premul_over_in_place(
            self.frame.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
        );

        // Post passes sit on top of all geometry.
        let level = spectrum.map(average_level);
        overlays::apply_overlays(
            self.frame.data_as_u8_slice_mut(),
            self.canvas.width,
            self.canvas.height,
            cfg,
            time_secs,
            level,
            &mut frame_rng,
        );

        self.out.data.copy_from_slice(self.frame.data_as_u8_slice());
        &self.out
    }

    /// Latest rendered frame without re-rendering.
    pub fn last_frame(&self) -> &FrameRGBA {
        &self.out
    }

    #[cfg(test)]
    pub(crate) fn particle_count(&self) -> usize {
        self.particles.len()
    }

    fn ensure_background_cache(&mut self, cfg: &VisualConfig) {
        let Some(bg) = &self.background else {
            self.background_cache = None;
            return;
        };
        let key = (
            cfg.filter_kind,
            cfg.filter_strength.to_bits(),
            self.background_generation,
        );
        if let Some(cache) = &self.background_cache
            && cache.key == key
        {
            return;
        }

        debug!(filter = ?cfg.filter_kind, "rebuilding filtered background");
        let (matrix, blur) = filters::preset_matrix(cfg.filter_kind, cfg.filter_strength);
        let mut graded = bg.rgba8.as_ref().clone();
        crate::assets::decode::premultiply_rgba8_in_place(&mut graded);
        let src = graded.clone();
        filters::color_matrix_rgba8_premul(&src, &mut graded, &matrix);
        for _ in 0..blur {
            filters::blur3_rgba8_premul(
                &mut graded,
                &mut self.blur_scratch,
                bg.width as usize,
                bg.height as usize,
            );
        }

        match ImagePaint::from_premul(&graded, bg.width, bg.height) {
            Ok(paint) => self.background_cache = Some(BackgroundCache { key, paint }),
            Err(_) => self.background_cache = None,
        }
    }

    fn ensure_logo_cache(&mut self, cfg: &VisualConfig) {
        let Some(logo) = &self.logo else {
            self.logo_cache = None;
            return;
        };
        let key = (
            cfg.remove_logo_bg,
            cfg.logo_bg_threshold.to_bits(),
            self.logo_generation,
        );
        if let Some(cache) = &self.logo_cache
            && cache.key == key
        {
            return;
        }

        debug!(keyed = cfg.remove_logo_bg, "rebuilding logo paint");
        let prepared = if cfg.remove_logo_bg {
            key_out_background(logo, cfg.logo_bg_threshold)
        } else {
            logo.clone()
        };
        match ImagePaint::from_straight(&prepared) {
            Ok(paint) => {
                self.logo_cache = Some(LogoCache {
                    key,
                    paint,
                    aspect: logo.aspect_ratio().max(0.01),
                })
            }
            Err(_) => self.logo_cache = None,
        }
    }

    fn ensure_vignette_cache(&mut self, strength01: f32) {
        let key = strength01.to_bits();
        if let Some(cache) = &self.vignette_cache
            && cache.key == key
        {
            return;
        }
        self.vignette_cache = Some(VignetteCache {
            key,
            mask: filters::vignette_mask(self.canvas.width, self.canvas.height, strength01),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
