//! Skyburst - an endless, choreographed fireworks show
//!
//! The simulation core runs entirely in a virtual 1920x1080 canvas:
//! - a fixed-capacity particle pool shared by rockets and sparks
//! - rocket ascent with wind and helix drift, spark bursts with accelerating fade
//! - a volley state machine driving six ground shooters
//! - per-tick packing into flat 9-float vertex buffers in NDC
//!
//! A renderer polls [`FireworksEngine`] once per frame. [`terminal`] ships one
//! such renderer for truecolor terminals.

pub mod choreography;
pub mod config;
pub mod engine;
pub mod error;
pub mod explosion;
pub mod launch;
pub mod packer;
pub mod particle;
pub mod physics;
pub mod random;
pub mod terminal;

pub use choreography::{Choreographer, Shooter, VolleyState};
pub use engine::FireworksEngine;
pub use error::{Error, Result};
pub use packer::{FLOATS_PER_VERTEX, FrameBuffers, TailStyle, Vertex};
pub use particle::{Particle, ParticleHandle, ParticleKind, ParticlePool, Rgb};
pub use random::{RandomSource, Sequence};
