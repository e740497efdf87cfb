//! Packing of live particles into flat vertex buffers for a renderer.
//!
//! Every vertex is nine floats, 36 bytes:
//!
//! | floats | meaning                         |
//! |--------|---------------------------------|
//! | 0..4   | `ndc_x, ndc_y, 0, 1` (position) |
//! | 4..8   | `r, g, b, alpha`                |
//! | 8      | point size in virtual units     |
//!
//! The point buffer holds one vertex per live particle. The tail buffer holds
//! two vertices per tail for [`TailStyle::Line`] and six (two triangles) for
//! [`TailStyle::Ribbon`]; tail-end vertices have alpha 0 and tail vertices have
//! point size 0.

use bytemuck::{Pod, Zeroable};

use crate::config::{
    MIN_TAIL_LENGTH, ROCKET_TAIL_LENGTH, ROCKET_TAIL_WIDTH, SPARK_TAIL_LENGTH,
    SPARK_TAIL_WIDTH, VIRTUAL_HEIGHT, VIRTUAL_WIDTH,
};
use crate::particle::{Particle, Rgb};

pub const FLOATS_PER_VERTEX: usize = 9;

/// One vertex of either buffer. Matches a 36-byte attribute stride.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub size: f32,
}

impl Vertex {
    fn at(x: f32, y: f32, color: Rgb, alpha: f32, size: f32) -> Self {
        let [nx, ny] = to_ndc(x, y);
        Self {
            position: [nx, ny, 0.0, 1.0],
            color: [color.r, color.g, color.b, alpha],
            size,
        }
    }
}

/// Map a virtual canvas point to normalized device coordinates.
/// Canvas top-left lands on (-1, 1), bottom-right on (1, -1).
pub fn to_ndc(x: f32, y: f32) -> [f32; 2] {
    [(x / VIRTUAL_WIDTH) * 2.0 - 1.0, 1.0 - (y / VIRTUAL_HEIGHT) * 2.0]
}

/// Tail geometry emitted behind each particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailStyle {
    None,
    /// Two-vertex line segment, fading to transparent.
    Line,
    /// Tapered quad (two triangles), full width at the head, zero at the tail.
    #[default]
    Ribbon,
}

impl TailStyle {
    pub fn vertices_per_tail(self) -> usize {
        match self {
            TailStyle::None => 0,
            TailStyle::Line => 2,
            TailStyle::Ribbon => 6,
        }
    }
}

/// Per-frame output buffers, reused across ticks.
pub struct FrameBuffers {
    tail_style: TailStyle,
    points: Vec<Vertex>,
    tails: Vec<Vertex>,
}

impl FrameBuffers {
    pub fn new(capacity: usize, tail_style: TailStyle) -> Self {
        Self {
            tail_style,
            points: Vec::with_capacity(capacity),
            tails: Vec::with_capacity(capacity * tail_style.vertices_per_tail()),
        }
    }

    pub fn tail_style(&self) -> TailStyle {
        self.tail_style
    }

    /// Start a new frame.
    pub fn clear(&mut self) {
        self.points.clear();
        self.tails.clear();
    }

    /// Emit the head point and, if enabled, the tail of one live particle.
    pub fn push(&mut self, p: &Particle) {
        self.push_tail(p);
        self.points.push(Vertex::at(p.x, p.y, p.color, p.alpha, p.size));
    }

    fn push_tail(&mut self, p: &Particle) {
        if self.tail_style == TailStyle::None {
            return;
        }
        let (length_mult, width_mult) = if p.is_spark() {
            (SPARK_TAIL_LENGTH, SPARK_TAIL_WIDTH)
        } else {
            (ROCKET_TAIL_LENGTH, ROCKET_TAIL_WIDTH)
        };

        let (head_x, head_y) = (p.x, p.y);
        let tail_x = head_x - p.vx * length_mult;
        let tail_y = head_y - p.vy * length_mult;

        let (dx, dy) = (head_x - tail_x, head_y - tail_y);
        let len = (dx * dx + dy * dy).sqrt();
        if len <= MIN_TAIL_LENGTH {
            return;
        }

        match self.tail_style {
            TailStyle::None => {}
            TailStyle::Line => {
                self.tails.push(Vertex::at(head_x, head_y, p.color, p.alpha, 0.0));
                self.tails.push(Vertex::at(tail_x, tail_y, p.color, 0.0, 0.0));
            }
            TailStyle::Ribbon => {
                let half_width = p.size * width_mult;
                // Perpendicular to the direction of travel
                let (px, py) = (-dy / len * half_width, dx / len * half_width);

                let left = Vertex::at(head_x + px, head_y + py, p.color, p.alpha, 0.0);
                let right = Vertex::at(head_x - px, head_y - py, p.color, p.alpha, 0.0);
                let tip = Vertex::at(tail_x, tail_y, p.color, 0.0, 0.0);

                self.tails.extend_from_slice(&[left, right, tip, right, tip, tip]);
            }
        }
    }

    pub fn points(&self) -> &[Vertex] {
        &self.points
    }

    pub fn tails(&self) -> &[Vertex] {
        &self.tails
    }

    /// Point buffer as flat floats, `FLOATS_PER_VERTEX` per particle.
    pub fn point_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Tail buffer as flat floats.
    pub fn tail_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tails)
    }

    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    pub fn tail_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tails)
    }

    pub fn particle_count(&self) -> usize {
        self.points.len()
    }

    pub fn tail_vertex_count(&self) -> usize {
        self.tails.len()
    }
}
