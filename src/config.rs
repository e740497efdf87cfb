//! Tuning constants for the simulation.
//!
//! All distances are in virtual canvas units and all rates are per tick.

use crate::particle::Rgb;

pub const VIRTUAL_WIDTH: f32 = 1920.0;
pub const VIRTUAL_HEIGHT: f32 = 1080.0;

pub const GRAVITY_ROCKET: f32 = 0.006;
pub const DRAG_ROCKET: f32 = 0.992;

pub const GRAVITY_SPARK: f32 = 0.025;
pub const DRAG_SPARK: f32 = 0.975;

pub const WIND_FORCE: f32 = 0.001;
pub const WIND_FREQ: f32 = 0.01;
pub const HELIX_FORCE: f32 = 0.05;
pub const HELIX_FREQ: f32 = 0.15;

pub const MAX_PARTICLES: usize = 4000;

// Rockets
pub const ROCKET_SIZE: f32 = 8.0;
pub const ROCKET_MAX_DIVERGENCE: f32 = 40.0;
pub const ROCKET_SPEED_BIAS: f32 = 1.2;
pub const ROCKET_SPEED_MULTIPLIER: f32 = 2.2;
pub const ROCKET_WIND_PHASE_MAX: f32 = 100.0;
/// Vertical velocity above which a climbing rocket is considered spent.
pub const DETONATION_VY: f32 = -0.5;

// Bursts
pub const SPARK_SIZE: f32 = 12.0;
pub const BURST_BASE_COUNT: u32 = 100;
pub const BURST_COUNT_SPREAD: u32 = 80;
pub const MAX_SPARKS_PER_BURST: usize = 400;
pub const SPARK_AGE_THRESHOLD: u32 = 45;
pub const SPARK_DECAY_GROWTH: f32 = 1.03;
pub const SPARK_DECAY_MIN: f32 = 0.002;
pub const SPARK_DECAY_SPREAD: f32 = 0.004;
pub const SPARK_SPEED_JITTER: f32 = 0.05;

// Tails
pub const SPARK_TAIL_LENGTH: f32 = 6.0;
pub const ROCKET_TAIL_LENGTH: f32 = 3.0;
pub const SPARK_TAIL_WIDTH: f32 = 0.25;
pub const ROCKET_TAIL_WIDTH: f32 = 0.15;
pub const MIN_TAIL_LENGTH: f32 = 0.1;

// Choreography
pub const SHOOTER_COUNT: usize = 6;
pub const SHOOTER_MARGIN: f32 = 0.15;
pub const SHOOTER_JITTER: f32 = 0.3;
pub const INITIAL_TIMER_MAX: u32 = 40;
pub const REFIRE_TICKS: i32 = 90;
pub const REFIRE_JITTER: i32 = 15;
pub const VOLLEY_SHOTS_MIN: i32 = 8;
pub const VOLLEY_SHOTS_MAX: i32 = 16;
pub const VOLLEY_PAUSE_TICKS: u32 = 280;

// Realistic chemical colours plus a few modern additions; repeats weight the draw
pub const PALETTE: [Rgb; 11] = [
    Rgb::new(1.0, 0.1, 0.1),   // Strontium red
    Rgb::new(1.0, 0.4, 0.0),   // Calcium orange
    Rgb::new(1.0, 0.4, 0.0),
    Rgb::new(1.0, 0.8, 0.1),   // Sodium gold
    Rgb::new(1.0, 0.8, 0.1),
    Rgb::new(0.2, 1.0, 0.2),   // Barium green
    Rgb::new(0.7, 0.2, 1.0),   // Potassium violet
    Rgb::new(0.0, 1.0, 0.9),   // Cyan
    Rgb::new(1.0, 0.2, 0.6),   // Hot pink
    Rgb::new(0.9, 0.95, 1.0),  // Titanium white
    Rgb::new(0.9, 0.95, 1.0),
];
