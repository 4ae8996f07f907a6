use crate::foundation::core::Rgb8;

/// One of the eight mutually exclusive spectrum-visualization algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
    /// No spectrum rendering.
    None,
    /// Bottom-anchored vertical bars, left to right.
    #[default]
    Bars,
    /// Half the bands mirrored left/right from a center line.
    Symmetric,
    /// Compact bar cluster with a reduced band count.
    Mini,
    /// Radial spokes around a center point.
    Circle,
    /// A single smooth curve above a baseline.
    Linear,
    /// Three parallel smoothed curves, center emphasized.
    Wave,
    /// Twelve layered sine-modulated curves.
    Field,
}

impl VisualStyle {
    /// Styles that ignore the user speed knob use a fixed smoothing factor.
    pub(crate) fn fixed_smoothing(self) -> Option<f32> {
        match self {
            VisualStyle::Mini => Some(0.4),
            VisualStyle::Circle => Some(0.35),
            VisualStyle::Linear => Some(0.3),
            _ => None,
        }
    }
}

/// Named background color-filter preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// No color grading; brightness scaling only.
    #[default]
    Original,
    /// Higher contrast, muted saturation, a touch of sepia.
    Cinematic,
    /// Sepia-heavy, slightly lifted brightness.
    Vintage,
    /// Full grayscale with boosted contrast.
    Noir,
    /// Soft blur with saturated color.
    Dreamy,
    /// Heavily saturated.
    Vivid,
}

/// Full-frame generative post-process effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// Per-frame random film grain.
    Grain,
    /// Scanlines, chromatic aberration and glitch blocks.
    Vhs,
    /// Orbiting additive light leaks.
    Light,
    /// Oscillating RGB channel separation.
    Rgb,
    /// Audio-level-driven radial pulse.
    Pulse,
    /// Random per-frame canvas translation.
    Shake,
}

/// Particle flavor; kinematics and the draw routine are fixed per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    /// Upward-drifting outlined circles with a highlight.
    Bubbles,
    /// Twinkling four-point stars that reflect off edges.
    Sparkles,
    /// Glowing outlined polygons that reflect off edges.
    Neon,
    /// Upward-drifting bezier hearts.
    Hearts,
    /// Fast upward-drifting glowing dots with a trailing ghost.
    Embers,
    /// Downward-drifting six-armed snowflakes.
    Snow,
}

/// How a style resolves per-band color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// The configured primary color everywhere.
    #[default]
    Solid,
    /// Interpolate primary -> secondary by band position.
    Gradient,
    /// Hue cycling by band position plus a time-based rotation.
    Rainbow,
}

/// Position of the spectrum anchor, in percent of canvas size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpectrumPos {
    /// Horizontal anchor in percent; ignored while `centered` is set.
    pub x: f32,
    /// Vertical anchor in percent.
    pub y: f32,
    /// When set, forces x = 50% regardless of the x field.
    pub centered: bool,
}

/// Logo anchor position in percent of canvas size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogoPos {
    /// Horizontal anchor in percent.
    pub x: f32,
    /// Vertical anchor in percent.
    pub y: f32,
}

/// The complete per-frame visual configuration.
///
/// Owned by the embedding UI layer and re-read by the engine every tick; the
/// engine holds no state derived from it other than documented caches keyed
/// by the relevant fields. Out-of-range values never crash the render loop:
/// every consumer clamps through the accessors below.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VisualConfig {
    /// Active spectrum style.
    pub visual_style: VisualStyle,
    /// Background color-filter preset.
    pub filter_kind: FilterKind,
    /// Background brightness in percent (nominal 0-200, 100 = unchanged).
    pub filter_strength: f32,
    /// Vignette edge darkness in percent (0-100).
    pub vignette_strength: f32,
    /// Enabled overlays; application order is fixed by the compositor.
    pub overlays: Vec<OverlayKind>,
    /// Film grain strength in percent.
    pub grain_strength: f32,
    /// VHS strength in percent.
    pub vhs_strength: f32,
    /// Light-leak strength in percent.
    pub light_strength: f32,
    /// RGB-shift strength in percent.
    pub rgb_strength: f32,
    /// Beat-pulse strength in percent.
    pub pulse_strength: f32,
    /// Camera-shake strength in percent.
    pub shake_strength: f32,
    /// Enabled particle kinds.
    pub particles: Vec<ParticleKind>,
    /// Particle color as `#rrggbb`; empty falls back to `effect_color`.
    pub particle_color: String,
    /// Spawn density in percent (0-100).
    pub particle_density: f32,
    /// Particle opacity multiplier in percent (10-100).
    pub particle_opacity: f32,
    /// Particle speed multiplier in percent (nominal 20-300).
    pub particle_speed: f32,
    /// Particle size multiplier in percent (nominal 20-300).
    pub particle_size: f32,
    /// Primary effect color as `#rrggbb`.
    pub effect_color: String,
    /// Secondary color for gradient mode as `#rrggbb`.
    pub secondary_color: String,
    /// Per-band color resolution mode.
    pub color_mode: ColorMode,
    /// Logo anchor position.
    pub logo_pos: LogoPos,
    /// Logo width in pixels (height follows the image aspect ratio).
    pub logo_size: f32,
    /// Whether the background-keyed logo is used.
    pub remove_logo_bg: bool,
    /// Background-removal tolerance in percent (50-100).
    pub logo_bg_threshold: f32,
    /// Spectrum anchor position.
    pub spectrum_pos: SpectrumPos,
    /// Spectrum width in percent of the canvas width.
    pub spectrum_width: f32,
    /// Bar width in pixels before overflow rescaling.
    pub spectrum_bar_width: f32,
    /// Gap between bars in pixels before overflow rescaling.
    pub spectrum_bar_gap: f32,
    /// Smoothing aggressiveness in percent (0-100); higher = jumpier.
    pub spectrum_speed: f32,
    /// Gain in percent (nominal 20-200).
    pub spectrum_sensitivity: f32,
    /// Requested band count.
    pub spectrum_bands: u32,
    /// Maximum bar height in percent of the canvas height.
    pub spectrum_max_height: f32,
    /// Line thickness in pixels for curve styles.
    pub spectrum_thickness: f32,
    /// Spectrum opacity in percent (10-100).
    pub spectrum_opacity: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            visual_style: VisualStyle::Bars,
            filter_kind: FilterKind::Original,
            filter_strength: 100.0,
            vignette_strength: 70.0,
            overlays: Vec::new(),
            grain_strength: 18.0,
            vhs_strength: 20.0,
            light_strength: 50.0,
            rgb_strength: 20.0,
            pulse_strength: 30.0,
            shake_strength: 20.0,
            particles: Vec::new(),
            particle_color: String::from("#ffffff"),
            particle_density: 20.0,
            particle_opacity: 50.0,
            particle_speed: 100.0,
            particle_size: 100.0,
            effect_color: String::from("#6366f1"),
            secondary_color: String::from("#06b6d4"),
            color_mode: ColorMode::Rainbow,
            logo_pos: LogoPos { x: 5.0, y: 5.0 },
            logo_size: 150.0,
            remove_logo_bg: false,
            logo_bg_threshold: 90.0,
            spectrum_pos: SpectrumPos {
                x: 50.0,
                y: 75.0,
                centered: true,
            },
            spectrum_width: 100.0,
            spectrum_bar_width: 3.0,
            spectrum_bar_gap: 2.0,
            spectrum_speed: 50.0,
            spectrum_sensitivity: 120.0,
            spectrum_bands: 64,
            spectrum_max_height: 40.0,
            spectrum_thickness: 2.0,
            spectrum_opacity: 90.0,
        }
    }
}

impl VisualConfig {
    /// Parsed primary color; white when unparseable.
    pub(crate) fn primary_rgb(&self) -> Rgb8 {
        Rgb8::parse_or_white(&self.effect_color)
    }

    /// Parsed secondary color; white when unparseable.
    pub(crate) fn secondary_rgb(&self) -> Rgb8 {
        Rgb8::parse_or_white(&self.secondary_color)
    }

    /// Parsed particle color, falling back to the primary effect color.
    pub(crate) fn particle_rgb(&self) -> Rgb8 {
        Rgb8::parse_hex(&self.particle_color).unwrap_or_else(|| self.primary_rgb())
    }

    /// Spectrum opacity normalized to [0.1, 1].
    pub(crate) fn spectrum_alpha(&self) -> f32 {
        (self.spectrum_opacity / 100.0).clamp(0.1, 1.0)
    }

    /// Sensitivity gain normalized to [0.2, 2].
    pub(crate) fn sensitivity(&self) -> f32 {
        (self.spectrum_sensitivity / 100.0).clamp(0.2, 2.0)
    }

    /// Max height fraction normalized to [0, 2].
    pub(crate) fn max_height(&self) -> f32 {
        (self.spectrum_max_height / 100.0).clamp(0.0, 2.0)
    }

    /// Smoothing factor derived from the speed knob: 0.15-0.85.
    pub(crate) fn smoothing_factor(&self) -> f32 {
        (self.spectrum_speed.clamp(0.0, 100.0) / 100.0) * 0.7 + 0.15
    }

    /// Requested band count, floored at 1 for styles that render.
    pub(crate) fn bands(&self) -> usize {
        self.spectrum_bands.max(1) as usize
    }

    /// Horizontal spectrum anchor in percent, honoring the centered override.
    pub(crate) fn spectrum_x_percent(&self) -> f32 {
        if self.spectrum_pos.centered {
            50.0
        } else {
            self.spectrum_pos.x
        }
    }

    /// Strength for one overlay kind, normalized to [0, 1].
    pub(crate) fn overlay_intensity(&self, kind: OverlayKind) -> f32 {
        let pct = match kind {
            OverlayKind::Grain => self.grain_strength,
            OverlayKind::Vhs => self.vhs_strength,
            OverlayKind::Light => self.light_strength,
            OverlayKind::Rgb => self.rgb_strength,
            OverlayKind::Pulse => self.pulse_strength,
            OverlayKind::Shake => self.shake_strength,
        };
        (pct / 100.0).clamp(0.0, 1.0)
    }

    /// Whether `kind` is enabled.
    pub(crate) fn overlay_enabled(&self, kind: OverlayKind) -> bool {
        self.overlays.contains(&kind)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
