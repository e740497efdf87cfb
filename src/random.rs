//! Randomness seam for the simulation.
//!
//! Every draw the engine makes goes through [`RandomSource`], so tests can pin
//! exact values and the host can pick any generator it likes.

/// Uniform random draws used by the simulation.
///
/// Only [`unit`](RandomSource::unit) is required; the rest are derived from it
/// but may be overridden by generators with native integer support.
pub trait RandomSource {
    /// Returns a float in [0, 1)
    fn unit(&mut self) -> f32;

    /// Returns a float in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.unit() * (max - min)
    }

    /// Returns an integer in [0, n), or 0 when `n` is 0
    fn below(&mut self, n: u32) -> u32 {
        ((self.unit() * n as f32) as u32).min(n.saturating_sub(1))
    }

    /// Returns an integer in [lo, hi)
    fn int_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        lo + self.below((hi - lo) as u32) as i32
    }

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.unit() < 0.5
    }
}

impl RandomSource for fastrand::Rng {
    fn unit(&mut self) -> f32 {
        self.f32()
    }

    fn below(&mut self, n: u32) -> u32 {
        if n == 0 { 0 } else { self.u32(0..n) }
    }

    fn coin(&mut self) -> bool {
        self.bool()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn unit(&mut self) -> f32 {
        (**self).unit()
    }

    fn below(&mut self, n: u32) -> u32 {
        (**self).below(n)
    }

    fn coin(&mut self) -> bool {
        (**self).coin()
    }
}

/// Replays a fixed list of unit values, wrapping around at the end.
///
/// Values are clamped into [0, 1) so a script can ask for "the top of the
/// range" with `1.0` without escaping it.
#[derive(Debug, Clone)]
pub struct Sequence {
    values: Vec<f32>,
    cursor: usize,
}

impl Sequence {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 1.0 - f32::EPSILON);
        }
        Self { values, cursor: 0 }
    }

    /// A source that always returns the same value.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for Sequence {
    fn unit(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fastrand_range_bounds() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..1000 {
            let v = rng.range(-40.0, 40.0);
            assert!((-40.0..40.0).contains(&v));
            let i = rng.int_range(8, 16);
            assert!((8..16).contains(&i));
        }
    }

    #[test]
    fn below_never_reaches_n() {
        let mut seq = Sequence::new(vec![0.0, 0.5, 1.0]);
        assert_eq!(seq.below(40), 0);
        assert_eq!(seq.below(40), 20);
        assert_eq!(seq.below(40), 39);
        assert_eq!(seq.below(0), 0);
    }

    #[test]
    fn int_range_covers_both_ends() {
        let mut low = Sequence::constant(0.0);
        let mut high = Sequence::constant(1.0);
        assert_eq!(low.int_range(-15, 15), -15);
        assert_eq!(high.int_range(-15, 15), 14);
        assert_eq!(low.int_range(5, 5), 5);
    }

    #[test]
    fn sequence_wraps_and_counts() {
        let mut seq = Sequence::new(vec![0.25, 0.75]);
        assert_eq!(seq.unit(), 0.25);
        assert_eq!(seq.unit(), 0.75);
        assert_eq!(seq.unit(), 0.25);
        assert_eq!(seq.draws(), 3);
        assert!(!Sequence::constant(0.9).coin());
    }
}
