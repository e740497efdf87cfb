//! Rocket launches from a ground shooter.

use crate::config::{
    GRAVITY_ROCKET, ROCKET_MAX_DIVERGENCE, ROCKET_SIZE, ROCKET_SPEED_BIAS,
    ROCKET_SPEED_MULTIPLIER, ROCKET_WIND_PHASE_MAX, VIRTUAL_HEIGHT,
};
use crate::particle::{Particle, ParticleHandle, ParticleKind, ParticlePool, Rgb, Rocket};
use crate::random::RandomSource;

/// Speed needed to climb `height` under rocket gravity so the rocket
/// arrives at its apex nearly stalled.
pub fn launch_speed(height: f32) -> f32 {
    ((2.0 * GRAVITY_ROCKET * height.max(0.0)).sqrt() + ROCKET_SPEED_BIAS) * ROCKET_SPEED_MULTIPLIER
}

/// Build a rocket leaving the canvas bottom at `x`.
pub fn rocket<R: RandomSource>(x: f32, color: Rgb, rng: &mut R) -> Particle {
    let y = VIRTUAL_HEIGHT;
    // Apex somewhere in the upper 10-40% of the canvas
    let target_y = VIRTUAL_HEIGHT * 0.1 + rng.unit() * VIRTUAL_HEIGHT * 0.3;
    let divergence = rng.range(-ROCKET_MAX_DIVERGENCE, ROCKET_MAX_DIVERGENCE);

    let angle = (target_y - y).atan2((x + divergence) - x);
    let speed = launch_speed(y - target_y);

    let wind_offset = rng.unit() * ROCKET_WIND_PHASE_MAX;
    let wind_direction = if rng.coin() { 1.0 } else { -1.0 };

    Particle {
        x,
        y,
        vx: angle.cos() * speed,
        vy: angle.sin() * speed,
        color,
        alpha: 1.0,
        size: ROCKET_SIZE,
        kind: ParticleKind::Rocket(Rocket {
            target_y,
            wind_offset,
            wind_direction,
            exploded: false,
        }),
    }
}

/// Launch a rocket into the pool. A saturated pool drops the launch.
pub fn launch<R: RandomSource>(
    pool: &mut ParticlePool,
    x: f32,
    color: Rgb,
    rng: &mut R,
) -> Option<ParticleHandle> {
    if pool.is_full() {
        log::trace!("pool saturated, dropping rocket at x={x:.0}");
        return None;
    }
    pool.allocate(rocket(x, color, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Sequence;

    const RED: Rgb = Rgb::new(1.0, 0.1, 0.1);

    #[test]
    fn rocket_leaves_from_canvas_bottom() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            let p = rocket(600.0, RED, &mut rng);
            assert_eq!((p.x, p.y), (600.0, VIRTUAL_HEIGHT));
            assert_eq!(p.size, ROCKET_SIZE);
            assert_eq!(p.color, RED);
            assert!(p.vy < 0.0, "rockets climb");
            let ParticleKind::Rocket(r) = p.kind else { panic!("expected rocket") };
            assert!(r.target_y >= VIRTUAL_HEIGHT * 0.1 && r.target_y < VIRTUAL_HEIGHT * 0.4);
            assert!(r.wind_direction == 1.0 || r.wind_direction == -1.0);
            assert!((0.0..ROCKET_WIND_PHASE_MAX).contains(&r.wind_offset));
            assert!(!r.exploded);
        }
    }

    #[test]
    fn rocket_speed_matches_apex_height() {
        // target_y at the lowest apex, no divergence
        let mut rng = Sequence::new(vec![0.0, 0.5, 0.0, 0.0]);
        let p = rocket(960.0, RED, &mut rng);
        let height = VIRTUAL_HEIGHT - VIRTUAL_HEIGHT * 0.1;
        let expected = launch_speed(height);
        let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
        assert!((speed - expected).abs() < 1e-3);
        assert!(p.vx.abs() < 1e-4, "straight up without divergence");
    }

    #[test]
    fn divergence_tilts_launch() {
        let mut rng = Sequence::new(vec![0.5, 0.0, 0.0, 0.0]);
        let left = rocket(960.0, RED, &mut rng);
        assert!(left.vx < 0.0);

        let mut rng = Sequence::new(vec![0.5, 1.0, 0.0, 0.0]);
        let right = rocket(960.0, RED, &mut rng);
        assert!(right.vx > 0.0);
    }

    #[test]
    fn launch_into_full_pool_is_dropped() {
        let mut pool = ParticlePool::new(1);
        let mut rng = fastrand::Rng::with_seed(1);
        assert!(launch(&mut pool, 100.0, RED, &mut rng).is_some());
        assert!(launch(&mut pool, 100.0, RED, &mut rng).is_none());
        assert_eq!(pool.active_count(), 1);
    }
}
