//! Particle pool: spawn cadence, per-tick update/draw, bounded memory.

use crate::config::{ParticleKind, VisualConfig};
use crate::foundation::math::Rng64;
use crate::particles::{draw, particle};
use crate::render::painter::Painter;

/// Hard pool ceiling; oldest particles are dropped first past this.
pub(crate) const POOL_CAP: usize = 300;

/// Bounded particle simulation owned by one compositor instance.
pub(crate) struct ParticleSim {
    pool: Vec<particle::Particle>,
    rng: Rng64,
    last_spawn_secs: Option<f64>,
    active_kinds: Vec<ParticleKind>,
}

impl ParticleSim {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            pool: Vec::new(),
            rng: Rng64::new(seed),
            last_spawn_secs: None,
            active_kinds: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pool.len()
    }

    /// Run one simulation tick: spawn due batches, advance and draw every
    /// survivor, then enforce the pool ceiling (FIFO eviction — new spawns
    /// append at the back, so truncating the front drops the oldest).
    pub(crate) fn tick(
        &mut self,
        painter: &mut Painter,
        cfg: &VisualConfig,
        width: f64,
        height: f64,
        time_secs: f64,
    ) {
        // A changed kind selection restarts the field from empty.
        if self.active_kinds != cfg.particles {
            self.active_kinds = cfg.particles.clone();
            self.pool.clear();
            self.last_spawn_secs = None;
        }
        if cfg.particles.is_empty() {
            return;
        }

        let density = f64::from(cfg.particle_density.clamp(0.0, 100.0));
        let spawn_interval_secs = (500.0 - density * 4.0).max(50.0) / 1000.0;
        let size_multiplier = f64::from(cfg.particle_size.clamp(10.0, 300.0)) / 100.0;
        let speed_multiplier = f64::from(cfg.particle_speed.clamp(10.0, 300.0)) / 100.0;
        let opacity_multiplier = cfg.particle_opacity.clamp(0.0, 100.0) / 100.0;

        let due = match self.last_spawn_secs {
            None => true,
            Some(last) => time_secs - last > spawn_interval_secs,
        };
        if due {
            let per_kind =
                (density / 20.0 / cfg.particles.len() as f64).ceil().max(0.0) as usize;
            let color = cfg.particle_rgb();
            for &kind in &cfg.particles {
                for _ in 0..per_kind {
                    self.pool.push(particle::spawn(
                        kind,
                        width,
                        height,
                        color,
                        size_multiplier,
                        &mut self.rng,
                    ));
                }
            }
            self.last_spawn_secs = Some(time_secs);
        }

        self.pool.retain_mut(|p| {
            let alive = particle::update(p, width, height, speed_multiplier);
            if alive {
                draw::draw(painter, p, opacity_multiplier);
            }
            alive
        });

        if self.pool.len() > POOL_CAP {
            let excess = self.pool.len() - POOL_CAP;
            self.pool.drain(0..excess);
        }
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &[particle::Particle] {
        &self.pool
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/sim.rs"]
mod tests;
