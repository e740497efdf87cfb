//! The simulation engine: owns the pool, the choreography and the frame
//! buffers, and advances them together once per display frame.

use crate::choreography::Choreographer;
use crate::config::MAX_PARTICLES;
use crate::explosion;
use crate::packer::{FrameBuffers, TailStyle};
use crate::particle::{Particle, ParticleHandle, ParticlePool};
use crate::physics::{self, Step};
use crate::random::RandomSource;

/// A self-contained fireworks show.
///
/// Call [`tick`](FireworksEngine::tick) once per frame, then read
/// [`frame`](FireworksEngine::frame) before the next tick.
pub struct FireworksEngine<R = fastrand::Rng> {
    pool: ParticlePool,
    choreographer: Choreographer,
    frame: FrameBuffers,
    rng: R,
    ticks: u64,
}

impl FireworksEngine<fastrand::Rng> {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new(), TailStyle::default())
    }
}

impl Default for FireworksEngine<fastrand::Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> FireworksEngine<R> {
    pub fn with_rng(rng: R, tail_style: TailStyle) -> Self {
        Self::with_capacity(MAX_PARTICLES, rng, tail_style)
    }

    pub fn with_capacity(capacity: usize, rng: R, tail_style: TailStyle) -> Self {
        Self {
            pool: ParticlePool::new(capacity),
            choreographer: Choreographer::new(),
            frame: FrameBuffers::new(capacity, tail_style),
            rng,
            ticks: 0,
        }
    }

    /// Run one simulation step: choreography first, then physics and packing.
    pub fn tick(&mut self) {
        self.choreographer.tick(&mut self.pool, &mut self.rng);
        self.advance_particles();
        self.ticks += 1;
    }

    fn advance_particles(&mut self) {
        self.frame.clear();

        // Sparks spawned mid-pass land in free slots and may be visited later
        // in this same pass.
        for index in 0..self.pool.capacity() {
            let Some(handle) = self.pool.handle_at(index) else {
                continue;
            };
            let Some(particle) = self.pool.get_mut(handle) else {
                continue;
            };

            match physics::step(particle) {
                Step::Continue => {
                    physics::integrate(particle);
                    let particle = *particle;
                    self.frame.push(&particle);
                }
                Step::Detonate => {
                    let parent = *particle;
                    let sparks = explosion::explode(&mut self.pool, &parent, &mut self.rng);
                    log::trace!(
                        "rocket burst at ({:.0}, {:.0}) into {sparks} sparks",
                        parent.x,
                        parent.y
                    );
                    self.pool.release(handle);
                }
                Step::Expired => self.pool.release(handle),
            }
        }
    }

    /// Put a particle straight into the pool, bypassing the choreography.
    pub fn spawn(&mut self, particle: Particle) -> Option<ParticleHandle> {
        self.pool.allocate(particle)
    }

    pub fn frame(&self) -> &FrameBuffers {
        &self.frame
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn choreographer(&self) -> &Choreographer {
        &self.choreographer
    }

    /// Live particles packed by the last tick.
    pub fn particle_count(&self) -> usize {
        self.frame.particle_count()
    }

    /// Valid vertices in the tail buffer after the last tick.
    pub fn tail_vertex_count(&self) -> usize {
        self.frame.tail_vertex_count()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Drop every particle and start over with a fresh volley.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.frame.clear();
        self.choreographer = Choreographer::new();
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{ParticleKind, Rgb, Spark};
    use crate::random::Sequence;

    #[test]
    fn expired_spark_is_not_packed() {
        let mut engine = FireworksEngine::with_capacity(8, Sequence::constant(0.5), TailStyle::Line);
        let h = engine
            .spawn(Particle {
                x: 10.0,
                y: 10.0,
                vx: 0.0,
                vy: 0.0,
                color: Rgb::new(1.0, 1.0, 1.0),
                alpha: 0.001,
                size: 1.0,
                kind: ParticleKind::Spark(Spark::new(0.01)),
            })
            .unwrap();
        // First tick is setup only, so the spark is the sole occupant
        engine.tick();
        assert!(!engine.pool().is_active(h));
        assert_eq!(engine.particle_count(), 0);
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn reset_empties_everything() {
        let mut engine = FireworksEngine::with_rng(fastrand::Rng::with_seed(9), TailStyle::Ribbon);
        for _ in 0..400 {
            engine.tick();
        }
        assert!(engine.pool().active_count() > 0);
        engine.reset();
        assert_eq!(engine.pool().active_count(), 0);
        assert_eq!(engine.particle_count(), 0);
        assert_eq!(engine.tail_vertex_count(), 0);
    }
}
