use super::*;
use crate::config::{ParticleKind, VisualConfig};
use crate::foundation::core::Vec2;
use crate::particles::particle::{NeonShape, Particle};
use crate::render::painter::Painter;

fn sim_config(kinds: &[ParticleKind], density: f32) -> VisualConfig {
    let mut cfg = VisualConfig::default();
    cfg.particles = kinds.to_vec();
    cfg.particle_density = density;
    cfg
}

fn run_ticks(sim: &mut ParticleSim, cfg: &VisualConfig, ticks: usize) {
    let mut painter = Painter::new(64, 64);
    for i in 0..ticks {
        painter.begin(Vec2::ZERO);
        let time = i as f64 / 60.0;
        sim.tick(&mut painter, cfg, 64.0, 64.0, time);
        assert!(sim.len() <= POOL_CAP, "pool exceeded cap at tick {i}");
    }
}

#[test]
fn pool_stays_bounded_under_sustained_spawning() {
    let mut sim = ParticleSim::new(11);
    // Max density with a reflecting kind, which never dies from position.
    let cfg = sim_config(&[ParticleKind::Sparkles], 100.0);
    run_ticks(&mut sim, &cfg, 1_200);
    assert!(sim.len() > 0);
}

#[test]
fn overfull_pool_evicts_oldest_by_truncating_the_front() {
    let mut sim = ParticleSim::new(11);
    let cfg = sim_config(&[ParticleKind::Sparkles], 100.0);

    // Preload far past the cap with immortal reflectors, tagging each with
    // its spawn order through the (never-mutated) size field.
    let preload = POOL_CAP + 150;
    for i in 0..preload {
        let mut p = test_particle(ParticleKind::Sparkles);
        p.max_life = 10_000;
        p.size = i as f64;
        sim.pool.push(p);
    }
    sim.active_kinds = cfg.particles.clone();
    sim.last_spawn_secs = Some(0.0); // suppress spawning this tick

    let mut painter = Painter::new(64, 64);
    painter.begin(Vec2::ZERO);
    sim.tick(&mut painter, &cfg, 64.0, 64.0, 0.0);

    assert_eq!(sim.len(), POOL_CAP);
    // The 150 oldest are gone; the survivors keep their original order.
    assert_eq!(sim.pool()[0].size, 150.0);
    assert_eq!(sim.pool()[POOL_CAP - 1].size, (preload - 1) as f64);
}

#[test]
fn eviction_drops_the_oldest_first() {
    let mut sim = ParticleSim::new(7);
    let cfg = sim_config(&[ParticleKind::Sparkles], 100.0);
    run_ticks(&mut sim, &cfg, 1_000);

    // Spawns append at the back and eviction truncates the front, so ages
    // (life ticks) must be non-increasing from front to back.
    let lives: Vec<u32> = sim.pool().iter().map(|p| p.life).collect();
    assert!(
        lives.windows(2).all(|w| w[0] >= w[1]),
        "pool order lost FIFO age ordering"
    );
}

#[test]
fn changing_kind_selection_clears_the_pool() {
    let mut sim = ParticleSim::new(3);
    let cfg = sim_config(&[ParticleKind::Snow], 100.0);
    run_ticks(&mut sim, &cfg, 50);
    assert!(sim.len() > 0);

    let mut painter = Painter::new(64, 64);
    painter.begin(Vec2::ZERO);
    let cfg2 = sim_config(&[ParticleKind::Hearts], 100.0);
    sim.tick(&mut painter, &cfg2, 64.0, 64.0, 100.0);
    assert!(sim.pool().iter().all(|p| p.kind == ParticleKind::Hearts));
}

fn test_particle(kind: ParticleKind) -> Particle {
    Particle {
        x: 32.0,
        y: 32.0,
        size: 5.0,
        speed_x: 0.0,
        speed_y: 0.0,
        opacity: 0.5,
        rotation: 0.0,
        rotation_speed: 0.0,
        life: 0,
        max_life: 1_000,
        kind,
        color: crate::foundation::core::Rgb8::WHITE,
        twinkle: 0.0,
        shape: NeonShape::Circle,
    }
}

#[test]
fn bubble_dies_exactly_past_twice_its_size_above_the_top() {
    let mut p = test_particle(ParticleKind::Bubbles);
    p.y = 5.0;
    p.speed_y = -10.0;
    // 5 -> -5: not yet past -2*size (-10).
    assert!(particle::update(&mut p, 64.0, 64.0, 1.0));
    assert_eq!(p.y, -5.0);
    // -5 -> -15: past the exit edge, removed.
    assert!(!particle::update(&mut p, 64.0, 64.0, 1.0));
}

#[test]
fn snow_dies_past_the_bottom_edge() {
    let mut p = test_particle(ParticleKind::Snow);
    p.y = 70.0;
    p.speed_y = 10.0;
    assert!(!particle::update(&mut p, 64.0, 64.0, 1.0));
}

#[test]
fn neon_reflects_with_clamped_position_and_flipped_velocity() {
    let mut p = test_particle(ParticleKind::Neon);
    p.x = 2.0;
    p.speed_x = -5.0;
    assert!(particle::update(&mut p, 64.0, 64.0, 1.0));
    assert_eq!(p.x, 0.0, "position must clamp to the boundary");
    assert_eq!(p.speed_x, 5.0, "velocity sign must flip");

    p.x = 63.0;
    assert!(particle::update(&mut p, 64.0, 64.0, 1.0));
    // Crossed the right edge: clamped back and flipped again.
    assert_eq!(p.x, 64.0);
    assert_eq!(p.speed_x, -5.0);
}

#[test]
fn reflectors_fade_out_after_max_life() {
    let mut p = test_particle(ParticleKind::Sparkles);
    p.max_life = 3;
    p.opacity = 0.05;
    let mut survived = 0;
    while particle::update(&mut p, 64.0, 64.0, 1.0) {
        survived += 1;
        assert!(survived < 100, "faded particle must eventually die");
    }
    assert!(p.opacity <= 0.0);
}
