//! Particle model: kinematics are fixed at spawn time and never
//! reconfigured mid-life.

use crate::config::ParticleKind;
use crate::foundation::core::Rgb8;
use crate::foundation::math::Rng64;

/// Polygon variant for neon particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NeonShape {
    Circle,
    Triangle,
    Square,
    Diamond,
}

/// One live particle.
#[derive(Clone, Debug)]
pub(crate) struct Particle {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) size: f64,
    pub(crate) speed_x: f64,
    pub(crate) speed_y: f64,
    pub(crate) opacity: f32,
    pub(crate) rotation: f64,
    pub(crate) rotation_speed: f64,
    pub(crate) life: u32,
    pub(crate) max_life: u32,
    pub(crate) kind: ParticleKind,
    pub(crate) color: Rgb8,
    /// Twinkle phase; advances only for sparkles.
    pub(crate) twinkle: f64,
    /// Polygon shape; meaningful only for neon.
    pub(crate) shape: NeonShape,
}

/// Spawn one particle of `kind` inside `width` x `height` bounds.
pub(crate) fn spawn(
    kind: ParticleKind,
    width: f64,
    height: f64,
    color: Rgb8,
    size_multiplier: f64,
    rng: &mut Rng64,
) -> Particle {
    let base_size = (f64::from(rng.range_f32(0.0, 8.0)) + 4.0) * size_multiplier;

    let mut p = Particle {
        x: f64::from(rng.next_f32_01()) * width,
        y: f64::from(rng.next_f32_01()) * height,
        size: base_size,
        speed_x: 0.0,
        speed_y: 0.0,
        opacity: rng.range_f32(0.3, 0.8),
        rotation: f64::from(rng.next_f32_01()) * std::f64::consts::TAU,
        rotation_speed: f64::from(rng.range_f32(-0.01, 0.01)),
        life: 0,
        max_life: 100 + (rng.next_u64() % 200) as u32,
        kind,
        color,
        twinkle: 0.0,
        shape: NeonShape::Circle,
    };

    match kind {
        ParticleKind::Bubbles => {
            p.y = height + base_size;
            p.speed_y = -f64::from(rng.range_f32(0.5, 2.0));
            p.speed_x = f64::from(rng.range_f32(-0.25, 0.25));
            p.size = base_size * 1.5;
            p.opacity = rng.range_f32(0.1, 0.4);
        }
        ParticleKind::Sparkles => {
            p.twinkle = f64::from(rng.next_f32_01()) * std::f64::consts::TAU;
            p.speed_x = f64::from(rng.range_f32(-0.15, 0.15));
            p.speed_y = f64::from(rng.range_f32(-0.15, 0.15));
        }
        ParticleKind::Neon => {
            p.shape = match rng.range_usize(4) {
                0 => NeonShape::Circle,
                1 => NeonShape::Triangle,
                2 => NeonShape::Square,
                _ => NeonShape::Diamond,
            };
            p.speed_x = f64::from(rng.range_f32(-0.5, 0.5));
            p.speed_y = f64::from(rng.range_f32(-0.5, 0.5));
            p.size = base_size * 2.0;
            p.rotation_speed = f64::from(rng.range_f32(-0.025, 0.025));
        }
        ParticleKind::Hearts => {
            p.y = height + base_size;
            p.speed_y = -f64::from(rng.range_f32(0.3, 1.3));
            p.speed_x = f64::from(rng.range_f32(-0.4, 0.4));
            p.rotation_speed = f64::from(rng.range_f32(-0.015, 0.015));
        }
        ParticleKind::Embers => {
            p.y = height + base_size;
            p.speed_y = -f64::from(rng.range_f32(1.0, 3.0));
            p.speed_x = f64::from(rng.range_f32(-0.75, 0.75));
            p.size = base_size * 0.7;
            // Half the embers burn a little brighter.
            if rng.next_f32_01() > 0.5 {
                p.color = color.scaled(1.3);
            }
        }
        ParticleKind::Snow => {
            p.y = -base_size;
            p.speed_y = f64::from(rng.range_f32(0.5, 1.5));
            p.speed_x = f64::from(rng.range_f32(-0.25, 0.25));
            p.opacity = rng.range_f32(0.4, 1.0);
        }
    }

    p
}

/// Advance one particle a tick. Returns whether it stays alive.
///
/// Directional kinds die past twice their size beyond the exit edge; snow
/// dies symmetrically at the bottom; reflecting kinds clamp and flip at all
/// four edges and instead fade out after `max_life`.
pub(crate) fn update(p: &mut Particle, width: f64, height: f64, speed_multiplier: f64) -> bool {
    p.x += p.speed_x * speed_multiplier;
    p.y += p.speed_y * speed_multiplier;
    p.rotation += p.rotation_speed * speed_multiplier;
    p.life += 1;

    if p.kind == ParticleKind::Sparkles {
        p.twinkle += 0.15 * speed_multiplier;
    }

    match p.kind {
        ParticleKind::Bubbles | ParticleKind::Hearts | ParticleKind::Embers => {
            if p.y < -p.size * 2.0 {
                return false;
            }
        }
        ParticleKind::Snow => {
            if p.y > height + p.size * 2.0 {
                return false;
            }
        }
        ParticleKind::Sparkles | ParticleKind::Neon => {
            if p.x < 0.0 || p.x > width {
                p.speed_x = -p.speed_x;
            }
            if p.y < 0.0 || p.y > height {
                p.speed_y = -p.speed_y;
            }
            p.x = p.x.clamp(0.0, width);
            p.y = p.y.clamp(0.0, height);
        }
    }

    if p.life > p.max_life {
        p.opacity -= 0.02;
        if p.opacity <= 0.0 {
            return false;
        }
    }

    true
}
