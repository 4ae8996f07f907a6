use super::*;
use crate::audio::sampler::{AudioFrame, SPECTRUM_BINS};
use crate::config::{ColorMode, ParticleKind};

fn bare_config(style: VisualStyle) -> VisualConfig {
    let mut cfg = VisualConfig::default();
    cfg.visual_style = style;
    cfg.vignette_strength = 0.0;
    cfg.overlays.clear();
    cfg.particles.clear();
    cfg
}

fn alpha_at(frame: &crate::foundation::core::FrameRGBA, x: u32, y: u32) -> u8 {
    frame.data[((y * frame.width + x) * 4 + 3) as usize]
}

#[test]
fn degenerate_render_is_stable_without_audio_or_effects() {
    let canvas = Canvas::new(96, 54).unwrap();
    let mut comp = Compositor::new(canvas, 42).unwrap();
    let cfg = VisualConfig::default();

    let a = comp.render_frame(&cfg, None, 0.5).data.clone();
    let b = comp.render_frame(&cfg, None, 1.5).data.clone();
    assert_eq!(a, b, "static composite must not vary per frame");
}

#[test]
fn bars_at_idle_draw_only_the_minimum_height_floor() {
    let canvas = Canvas::new(160, 80).unwrap();
    let mut comp = Compositor::new(canvas, 1).unwrap();
    let mut cfg = bare_config(VisualStyle::Bars);
    cfg.spectrum_bands = 80;
    cfg.spectrum_sensitivity = 110.0;
    cfg.spectrum_opacity = 70.0;

    let silent = AudioFrame::silent();
    let frame = comp.render_frame(&cfg, Some(&silent), 0.0).clone();

    // Baseline sits at 75% of the canvas height: y = 60, bars 2px tall.
    let base_y = 60u32;
    let floor_row: u32 = (0..160).filter(|&x| alpha_at(&frame, x, base_y - 1) > 0).count() as u32;
    assert!(floor_row > 0, "minimum-height bars must be visible");
    for y in 0..base_y - 3 {
        for x in 0..160 {
            assert_eq!(alpha_at(&frame, x, y), 0, "unexpected pixel at ({x},{y})");
        }
    }
}

#[test]
fn no_audio_skips_the_spectrum_entirely() {
    let canvas = Canvas::new(96, 54).unwrap();
    let mut comp = Compositor::new(canvas, 1).unwrap();
    let cfg = bare_config(VisualStyle::Bars);
    let frame = comp.render_frame(&cfg, None, 0.0);
    assert!(frame.data.iter().all(|&b| b == 0), "no audio, no geometry");
}

#[test]
fn symmetric_style_mirrors_exactly_around_the_center() {
    let canvas = Canvas::new(128, 64).unwrap();
    let mut comp = Compositor::new(canvas, 5).unwrap();
    let mut cfg = bare_config(VisualStyle::Symmetric);
    cfg.spectrum_bands = 64;
    cfg.spectrum_opacity = 100.0;
    cfg.color_mode = ColorMode::Solid;

    let mut bins = [0u8; SPECTRUM_BINS];
    bins[0] = 255;
    for b in bins.iter_mut().skip(1).take(40) {
        *b = 180;
    }
    let audio = AudioFrame::from_bins(bins);

    // A few frames so the smoothing history charges up.
    for i in 0..4 {
        comp.render_frame(&cfg, Some(&audio), i as f64 / 30.0);
    }
    let frame = comp.last_frame().clone();

    for y in 0..frame.height {
        for x in 0..frame.width / 2 {
            let l = ((y * frame.width + x) * 4) as usize;
            let r = ((y * frame.width + (frame.width - 1 - x)) * 4) as usize;
            for c in 0..4 {
                let dl = frame.data[l + c];
                let dr = frame.data[r + c];
                assert!(
                    dl.abs_diff(dr) <= 2,
                    "mirror mismatch at ({x},{y}) channel {c}: {dl} vs {dr}"
                );
            }
        }
    }
}

#[test]
fn particles_animate_without_audio() {
    let canvas = Canvas::new(96, 54).unwrap();
    let mut comp = Compositor::new(canvas, 9).unwrap();
    let mut cfg = bare_config(VisualStyle::None);
    cfg.particles = vec![ParticleKind::Snow];
    cfg.particle_density = 100.0;

    for i in 0..30 {
        comp.render_frame(&cfg, None, i as f64 / 30.0);
    }
    assert!(comp.particle_count() > 0, "degenerate mode still animates");
}

#[test]
fn vignette_darkens_corners_of_a_lit_background() {
    use std::sync::Arc;

    let canvas = Canvas::new(64, 64).unwrap();
    let mut comp = Compositor::new(canvas, 3).unwrap();
    // Uniform white background.
    let bg = crate::assets::decode::PreparedImage {
        width: 8,
        height: 8,
        rgba8: Arc::new(vec![255u8; 8 * 8 * 4]),
    };
    comp.set_background(Some(bg));

    let mut cfg = bare_config(VisualStyle::None);
    cfg.vignette_strength = 80.0;
    let frame = comp.render_frame(&cfg, None, 0.0).clone();

    let center = frame.data[((32 * 64 + 32) * 4) as usize];
    let corner = frame.data[0];
    assert!(corner < center, "corner {corner} should be darker than {center}");
}

#[test]
fn style_switch_resets_band_history_without_artifacts() {
    let canvas = Canvas::new(96, 54).unwrap();
    let mut comp = Compositor::new(canvas, 2).unwrap();
    let loud = AudioFrame::from_bins([255u8; SPECTRUM_BINS]);

    let mut cfg = bare_config(VisualStyle::Bars);
    cfg.spectrum_bands = 64;
    comp.render_frame(&cfg, Some(&loud), 0.0);

    // Shrinking the band count must not carry loud history into the first
    // silent frame: the resized history starts at zero, so the new frame is
    // identical to one rendered by a fresh compositor.
    cfg.spectrum_bands = 16;
    let silent = AudioFrame::silent();
    let switched = comp.render_frame(&cfg, Some(&silent), 1.0).data.clone();

    let mut fresh = Compositor::new(canvas, 2).unwrap();
    fresh.render_frame(&cfg, Some(&silent), 1.0);
    // Align frame counters: rendering twice keeps the comparison honest for
    // anything seeded per frame (nothing stochastic is active here).
    let fresh_frame = fresh.render_frame(&cfg, Some(&silent), 1.0).data.clone();
    assert_eq!(switched, fresh_frame);
}
