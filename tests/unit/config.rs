use super::*;

#[test]
fn defaults_match_editor_initial_state() {
    let cfg = VisualConfig::default();
    assert_eq!(cfg.visual_style, VisualStyle::Bars);
    assert_eq!(cfg.filter_kind, FilterKind::Original);
    assert_eq!(cfg.spectrum_bands, 64);
    assert!(cfg.spectrum_pos.centered);
    assert!(cfg.overlays.is_empty());
    assert!(cfg.particles.is_empty());
}

#[test]
fn serde_roundtrip_preserves_enums() {
    let mut cfg = VisualConfig::default();
    cfg.visual_style = VisualStyle::Circle;
    cfg.color_mode = ColorMode::Rainbow;
    cfg.overlays = vec![OverlayKind::Grain, OverlayKind::Shake];
    cfg.particles = vec![ParticleKind::Snow];

    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"circle\""));
    assert!(json.contains("\"rainbow\""));
    let back: VisualConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.visual_style, VisualStyle::Circle);
    assert_eq!(back.overlays, cfg.overlays);
    assert_eq!(back.particles, cfg.particles);
}

#[test]
fn accessors_clamp_out_of_range_input() {
    let mut cfg = VisualConfig::default();
    cfg.spectrum_opacity = 500.0;
    cfg.spectrum_sensitivity = -10.0;
    cfg.spectrum_speed = 1000.0;
    cfg.grain_strength = 900.0;

    assert_eq!(cfg.spectrum_alpha(), 1.0);
    assert_eq!(cfg.sensitivity(), 0.2);
    assert!((cfg.smoothing_factor() - 0.85).abs() < 1e-6);
    assert_eq!(cfg.overlay_intensity(OverlayKind::Grain), 1.0);
}

#[test]
fn smoothing_factor_spans_documented_range() {
    let mut cfg = VisualConfig::default();
    cfg.spectrum_speed = 0.0;
    assert!((cfg.smoothing_factor() - 0.15).abs() < 1e-6);
    cfg.spectrum_speed = 100.0;
    assert!((cfg.smoothing_factor() - 0.85).abs() < 1e-6);
}

#[test]
fn centered_flag_overrides_x() {
    let mut cfg = VisualConfig::default();
    cfg.spectrum_pos.x = 10.0;
    cfg.spectrum_pos.centered = true;
    assert_eq!(cfg.spectrum_x_percent(), 50.0);
    cfg.spectrum_pos.centered = false;
    assert_eq!(cfg.spectrum_x_percent(), 10.0);
}

#[test]
fn malformed_colors_fall_back_instead_of_panicking() {
    let mut cfg = VisualConfig::default();
    cfg.effect_color = String::from("not-a-color");
    cfg.particle_color = String::new();
    assert_eq!(cfg.primary_rgb(), crate::foundation::core::Rgb8::WHITE);
    // Particle color falls back to the (already fallen back) primary.
    assert_eq!(cfg.particle_rgb(), crate::foundation::core::Rgb8::WHITE);
}

#[test]
fn bands_floors_at_one() {
    let mut cfg = VisualConfig::default();
    cfg.spectrum_bands = 0;
    assert_eq!(cfg.bands(), 1);
}
