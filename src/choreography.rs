//! Volley choreography: six ground shooters fire staggered salvos, then the
//! sky is left to calm down before the next volley.

use crate::config::{
    INITIAL_TIMER_MAX, PALETTE, REFIRE_JITTER, REFIRE_TICKS, SHOOTER_COUNT, SHOOTER_JITTER,
    SHOOTER_MARGIN, VIRTUAL_WIDTH, VOLLEY_PAUSE_TICKS, VOLLEY_SHOTS_MAX, VOLLEY_SHOTS_MIN,
};
use crate::launch;
use crate::particle::{ParticlePool, Rgb};
use crate::random::RandomSource;

/// One launch position along the bottom of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shooter {
    pub x: f32,
    pub color: Rgb,
    /// Ticks until the next launch
    pub timer: i32,
    pub shots_fired: u32,
}

impl Default for Shooter {
    fn default() -> Self {
        Self {
            x: 0.0,
            color: PALETTE[0],
            timer: 0,
            shots_fired: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolleyState {
    Setup,
    Firing,
    Waiting { elapsed: u32 },
}

pub struct Choreographer {
    shooters: [Shooter; SHOOTER_COUNT],
    state: VolleyState,
    volley_shots: u32,
}

impl Choreographer {
    pub fn new() -> Self {
        Self {
            shooters: [Shooter::default(); SHOOTER_COUNT],
            state: VolleyState::Setup,
            volley_shots: 0,
        }
    }

    pub fn state(&self) -> VolleyState {
        self.state
    }

    pub fn shooters(&self) -> &[Shooter; SHOOTER_COUNT] {
        &self.shooters
    }

    /// Shots each shooter fires in the current volley.
    pub fn volley_shots(&self) -> u32 {
        self.volley_shots
    }

    /// Advance the state machine by one tick. Returns the number of rockets
    /// that made it into the pool.
    pub fn tick<R: RandomSource>(&mut self, pool: &mut ParticlePool, rng: &mut R) -> usize {
        match self.state {
            VolleyState::Setup => {
                self.setup(rng);
                self.state = VolleyState::Firing;
                0
            }
            VolleyState::Firing => {
                let launched = self.fire(pool, rng);
                if self.shooters.iter().all(|s| s.shots_fired >= self.volley_shots) {
                    log::debug!("volley finished, pausing");
                    self.state = VolleyState::Waiting { elapsed: 0 };
                }
                launched
            }
            VolleyState::Waiting { elapsed } => {
                let elapsed = elapsed + 1;
                self.state = if elapsed > VOLLEY_PAUSE_TICKS {
                    VolleyState::Setup
                } else {
                    VolleyState::Waiting { elapsed }
                };
                0
            }
        }
    }

    fn setup<R: RandomSource>(&mut self, rng: &mut R) {
        let margin = VIRTUAL_WIDTH * SHOOTER_MARGIN;
        let span = VIRTUAL_WIDTH - margin * 2.0;
        let step = span / (SHOOTER_COUNT - 1) as f32;

        for (i, shooter) in self.shooters.iter_mut().enumerate() {
            let jitter = rng.range(-step * SHOOTER_JITTER, step * SHOOTER_JITTER);
            *shooter = Shooter {
                x: margin + step * i as f32 + jitter,
                color: PALETTE[rng.below(PALETTE.len() as u32) as usize],
                timer: rng.below(INITIAL_TIMER_MAX) as i32,
                shots_fired: 0,
            };
        }
        self.volley_shots = rng.int_range(VOLLEY_SHOTS_MIN, VOLLEY_SHOTS_MAX) as u32;
        log::debug!("new volley: {} shots per shooter", self.volley_shots);
    }

    fn fire<R: RandomSource>(&mut self, pool: &mut ParticlePool, rng: &mut R) -> usize {
        let mut launched = 0;
        for shooter in &mut self.shooters {
            if shooter.shots_fired >= self.volley_shots {
                continue;
            }
            shooter.timer -= 1;
            if shooter.timer <= 0 {
                if launch::launch(pool, shooter.x, shooter.color, rng).is_some() {
                    launched += 1;
                }
                // A dropped launch still counts as a shot
                shooter.shots_fired += 1;
                shooter.timer = REFIRE_TICKS + rng.int_range(-REFIRE_JITTER, REFIRE_JITTER);
            }
        }
        launched
    }
}

impl Default for Choreographer {
    fn default() -> Self {
        Self::new()
    }
}
