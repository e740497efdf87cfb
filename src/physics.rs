//! Per-tick force models for rockets and sparks.
//!
//! Canvas y grows downwards, so a climbing rocket has negative `vy`.

use crate::config::{
    DETONATION_VY, DRAG_ROCKET, DRAG_SPARK, GRAVITY_ROCKET, GRAVITY_SPARK, HELIX_FORCE,
    HELIX_FREQ, SPARK_AGE_THRESHOLD, SPARK_DECAY_GROWTH, SPARK_SIZE, WIND_FORCE, WIND_FREQ,
};
use crate::particle::{Particle, ParticleKind, Rocket, Spark};

/// What the frame pass should do with a particle after its physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep it alive and integrate its position.
    Continue,
    /// The rocket reached its apex: burst it, then free its slot.
    Detonate,
    /// The spark burned out: free its slot.
    Expired,
}

/// Run the force model matching the particle's kind.
pub fn step(particle: &mut Particle) -> Step {
    let Particle {
        y,
        vx,
        vy,
        alpha,
        size,
        kind,
        ..
    } = particle;
    match kind {
        ParticleKind::Rocket(rocket) => step_rocket(rocket, *y, vx, vy),
        ParticleKind::Spark(spark) => step_spark(spark, vx, vy, alpha, size),
    }
}

fn step_rocket(rocket: &mut Rocket, y: f32, vx: &mut f32, vy: &mut f32) -> Step {
    let wind = ((y * WIND_FREQ) + rocket.wind_offset).sin() * WIND_FORCE * rocket.wind_direction;
    let helix = ((y * HELIX_FREQ) + rocket.wind_offset).cos() * HELIX_FORCE;
    *vx += wind + helix;

    *vx *= DRAG_ROCKET;
    *vy *= DRAG_ROCKET;
    // Half gravity so the climb eases off gently
    *vy -= GRAVITY_ROCKET * 0.5;

    if (*vy > DETONATION_VY || y <= rocket.target_y) && !rocket.exploded {
        rocket.exploded = true;
        return Step::Detonate;
    }
    Step::Continue
}

fn step_spark(spark: &mut Spark, vx: &mut f32, vy: &mut f32, alpha: &mut f32, size: &mut f32) -> Step {
    *vx *= DRAG_SPARK;
    *vy *= DRAG_SPARK;
    *vy += GRAVITY_SPARK;

    spark.age += 1;
    if spark.age > SPARK_AGE_THRESHOLD {
        spark.decay *= SPARK_DECAY_GROWTH;
    }
    *alpha -= spark.decay;
    *size = SPARK_SIZE * alpha.max(0.0);

    if *alpha <= 0.0 {
        Step::Expired
    } else {
        Step::Continue
    }
}

/// Advance position by one tick of velocity.
pub fn integrate(particle: &mut Particle) {
    particle.x += particle.vx;
    particle.y += particle.vy;
}
