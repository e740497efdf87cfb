//! Spark bursts spawned from spent rockets.

use std::f32::consts::PI;

use crate::config::{
    BURST_BASE_COUNT, BURST_COUNT_SPREAD, MAX_SPARKS_PER_BURST, SPARK_DECAY_MIN,
    SPARK_DECAY_SPREAD, SPARK_SIZE, SPARK_SPEED_JITTER,
};
use crate::particle::{Particle, ParticleKind, ParticlePool, Spark};
use crate::random::RandomSource;

/// Size and density of one burst, drawn before any spark is spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstPlan {
    pub spark_count: usize,
    /// Shell speed before per-spark irregularity.
    pub base_speed: f32,
}

impl BurstPlan {
    pub fn draw<R: RandomSource>(rng: &mut R) -> Self {
        let size_mod = 0.8 + rng.unit() * 2.0;
        let density_mod = match rng.unit() {
            roll if roll < 0.3 => 0.4,
            roll if roll > 0.7 => 1.6,
            _ => 1.0,
        };

        let base = (BURST_BASE_COUNT + rng.below(BURST_COUNT_SPREAD)) as f32;
        let spark_count = ((base * size_mod * density_mod) as usize).min(MAX_SPARKS_PER_BURST);
        let base_speed = (1.8 + rng.unit() * 1.2) * size_mod;

        Self {
            spark_count,
            base_speed,
        }
    }

    /// Lowest and highest shell speed a spark of this burst can get.
    pub fn speed_band(&self) -> (f32, f32) {
        (
            self.base_speed * (1.0 - SPARK_SPEED_JITTER),
            self.base_speed * (1.0 + SPARK_SPEED_JITTER),
        )
    }

    /// Build one spark at the parent's position and colour.
    ///
    /// The direction is uniform on a sphere; the depth component is dropped,
    /// which packs the shell into a disc in the canvas plane.
    pub fn spark<R: RandomSource>(&self, parent: &Particle, rng: &mut R) -> Particle {
        let theta = rng.unit() * PI * 2.0;
        let phi = (rng.unit() * 2.0 - 1.0).acos();
        let dir_x = phi.sin() * theta.cos();
        let dir_y = phi.sin() * theta.sin();

        let irregularity = (1.0 - SPARK_SPEED_JITTER) + rng.unit() * (SPARK_SPEED_JITTER * 2.0);
        let speed = self.base_speed * irregularity;

        let decay = rng.unit() * SPARK_DECAY_SPREAD + SPARK_DECAY_MIN;

        Particle {
            x: parent.x,
            y: parent.y,
            vx: dir_x * speed,
            vy: dir_y * speed,
            color: parent.color,
            alpha: 1.0,
            size: SPARK_SIZE,
            kind: ParticleKind::Spark(Spark::new(decay)),
        }
    }
}

/// Burst `parent` into sparks. Returns how many sparks made it into the pool;
/// a nearly full pool just yields a sparser burst.
pub fn explode<R: RandomSource>(pool: &mut ParticlePool, parent: &Particle, rng: &mut R) -> usize {
    let plan = BurstPlan::draw(rng);
    let mut spawned = 0;
    for _ in 0..plan.spark_count {
        if pool.is_full() {
            break;
        }
        let spark = plan.spark(parent, rng);
        if pool.allocate(spark).is_some() {
            spawned += 1;
        }
    }
    if spawned < plan.spark_count {
        log::trace!(
            "burst at ({:.0}, {:.0}) clipped to {spawned}/{} sparks",
            parent.x,
            parent.y,
            plan.spark_count
        );
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Rgb, Rocket};
    use crate::random::Sequence;

    fn spent_rocket() -> Particle {
        Particle {
            x: 800.0,
            y: 250.0,
            vx: 0.3,
            vy: -0.2,
            color: Rgb::new(0.0, 1.0, 0.9),
            alpha: 1.0,
            size: 8.0,
            kind: ParticleKind::Rocket(Rocket {
                target_y: 260.0,
                wind_offset: 3.0,
                wind_direction: -1.0,
                exploded: true,
            }),
        }
    }

    #[test]
    fn plan_density_thresholds() {
        // size_mod 0.8, density roll, base count 100, speed roll
        let sparse = BurstPlan::draw(&mut Sequence::new(vec![0.0, 0.1, 0.0, 0.0]));
        let normal = BurstPlan::draw(&mut Sequence::new(vec![0.0, 0.5, 0.0, 0.0]));
        let dense = BurstPlan::draw(&mut Sequence::new(vec![0.0, 0.9, 0.0, 0.0]));
        assert_eq!(sparse.spark_count, 32);
        assert_eq!(normal.spark_count, 80);
        assert_eq!(dense.spark_count, 128);
        assert!((normal.base_speed - 1.8 * 0.8).abs() < 1e-6);
    }

    #[test]
    fn plan_is_capped() {
        let plan = BurstPlan::draw(&mut Sequence::new(vec![1.0, 1.0, 1.0, 1.0]));
        assert_eq!(plan.spark_count, MAX_SPARKS_PER_BURST);
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..500 {
            assert!(BurstPlan::draw(&mut rng).spark_count <= MAX_SPARKS_PER_BURST);
        }
    }

    #[test]
    fn sparks_start_at_parent_within_speed_band() {
        let parent = spent_rocket();
        let mut rng = fastrand::Rng::with_seed(11);
        let plan = BurstPlan::draw(&mut rng);
        let (_, hi) = plan.speed_band();
        for _ in 0..300 {
            let s = plan.spark(&parent, &mut rng);
            assert_eq!((s.x, s.y), (parent.x, parent.y));
            assert_eq!(s.color, parent.color);
            // Dropping depth can only shorten the shell speed
            let planar = (s.vx * s.vx + s.vy * s.vy).sqrt();
            assert!(planar <= hi + 1e-5);
            let ParticleKind::Spark(spark) = s.kind else { panic!("expected spark") };
            assert_eq!(spark.age, 0);
            assert_eq!(spark.decay, spark.base_decay);
            assert!((SPARK_DECAY_MIN..SPARK_DECAY_MIN + SPARK_DECAY_SPREAD).contains(&spark.decay));
        }
    }

    #[test]
    fn equatorial_spark_speed_hits_band_edges() {
        let parent = spent_rocket();
        let plan = BurstPlan {
            spark_count: 1,
            base_speed: 2.0,
        };
        let (lo, hi) = plan.speed_band();
        // theta 0, phi = acos(0) = pi/2, irregularity at each end
        let slow = plan.spark(&parent, &mut Sequence::new(vec![0.0, 0.5, 0.0, 0.0]));
        let fast = plan.spark(&parent, &mut Sequence::new(vec![0.0, 0.5, 1.0, 0.0]));
        assert!((slow.vx - lo).abs() < 1e-5);
        assert!((fast.vx - hi).abs() < 1e-5);
        assert!(slow.vy.abs() < 1e-5);
    }

    #[test]
    fn explode_fills_remaining_capacity() {
        let parent = spent_rocket();
        let mut pool = ParticlePool::new(10);
        let mut rng = Sequence::new(vec![0.5]);
        let spawned = explode(&mut pool, &parent, &mut rng);
        assert_eq!(spawned, 10);
        assert!(pool.is_full());
        assert!(pool.iter().all(|(_, p)| p.is_spark()));
    }
}
