//! Particle records and the fixed-capacity pool that owns them.

/// Linear RGB colour, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// State only a climbing rocket carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rocket {
    /// Apex altitude; the rocket bursts once it climbs to here.
    pub target_y: f32,
    /// Phase offset for the lateral wind and helix forces.
    pub wind_offset: f32,
    /// Sign of the wind force, either 1.0 or -1.0.
    pub wind_direction: f32,
    pub exploded: bool,
}

/// State only a burning spark carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    /// Ticks since the burst.
    pub age: u32,
    /// Alpha lost per tick; grows once the spark is old.
    pub decay: f32,
    pub base_decay: f32,
}

impl Spark {
    pub fn new(decay: f32) -> Self {
        Self {
            age: 0,
            decay,
            base_decay: decay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    Rocket(Rocket),
    Spark(Spark),
}

/// A live particle. Free pool slots hold no particle at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgb,
    pub alpha: f32,
    /// Point diameter in virtual units
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn is_spark(&self) -> bool {
        matches!(self.kind, ParticleKind::Spark(_))
    }

    pub fn is_rocket(&self) -> bool {
        matches!(self.kind, ParticleKind::Rocket(_))
    }
}

/// Index of an occupied pool slot.
///
/// Handles are not stable across release: once a slot is freed the same
/// handle may later name an unrelated particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleHandle(usize);

impl ParticleHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed-capacity particle storage.
///
/// Allocation is a linear scan for the first free slot. That is O(n) per
/// spawn, which is fine at a few thousand slots; a much larger pool would
/// want a free list instead.
pub struct ParticlePool {
    slots: Vec<Option<Particle>>,
    active: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn is_full(&self) -> bool {
        self.active >= self.slots.len()
    }

    /// Place `particle` in the first free slot.
    /// Returns None if the pool is saturated; callers drop the spawn.
    pub fn allocate(&mut self, particle: Particle) -> Option<ParticleHandle> {
        if self.is_full() {
            return None;
        }
        let idx = self.slots.iter().position(Option::is_none)?;
        self.slots[idx] = Some(particle);
        self.active += 1;
        Some(ParticleHandle(idx))
    }

    /// Free the slot. Releasing an already free slot is a no-op.
    pub fn release(&mut self, handle: ParticleHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            if slot.take().is_some() {
                self.active -= 1;
            }
        }
    }

    pub fn is_active(&self, handle: ParticleHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Handle for the slot at `index` when that slot is occupied.
    pub fn handle_at(&self, index: usize) -> Option<ParticleHandle> {
        matches!(self.slots.get(index), Some(Some(_))).then_some(ParticleHandle(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (ParticleHandle(i), p)))
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.active = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spark_at(x: f32, y: f32) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            color: Rgb::new(1.0, 1.0, 1.0),
            alpha: 1.0,
            size: 12.0,
            kind: ParticleKind::Spark(Spark::new(0.004)),
        }
    }

    #[test]
    fn pool_allocate_and_release() {
        let mut pool = ParticlePool::new(4);
        assert_eq!(pool.active_count(), 0);

        let handles: Vec<_> = (0..3)
            .map(|i| pool.allocate(spark_at(i as f32, 0.0)).unwrap())
            .collect();
        assert_eq!(pool.active_count(), 3);

        pool.release(handles[1]);
        assert_eq!(pool.active_count(), 2);
        assert!(!pool.is_active(handles[1]));

        // First free slot is reused
        let reused = pool.allocate(spark_at(9.0, 9.0)).unwrap();
        assert_eq!(reused.index(), 1);

        pool.allocate(spark_at(0.0, 0.0)).unwrap();
        assert!(pool.is_full());
        assert!(pool.allocate(spark_at(0.0, 0.0)).is_none());
        assert_eq!(pool.active_count(), pool.capacity());
    }

    #[test]
    fn release_is_idempotent_and_leaves_no_residue() {
        let mut pool = ParticlePool::new(2);
        let h = pool.allocate(spark_at(5.0, 5.0)).unwrap();
        if let Some(p) = pool.get_mut(h) {
            p.alpha = 0.1;
            if let ParticleKind::Spark(s) = &mut p.kind {
                s.age = 90;
                s.decay = 0.5;
            }
        }
        pool.release(h);
        pool.release(h);
        assert_eq!(pool.active_count(), 0);
        assert!(pool.get(h).is_none());

        let fresh = pool.allocate(spark_at(1.0, 1.0)).unwrap();
        assert_eq!(fresh, h);
        let p = pool.get(fresh).unwrap();
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.kind, ParticleKind::Spark(Spark::new(0.004)));
    }

    #[test]
    fn iter_skips_free_slots() {
        let mut pool = ParticlePool::new(3);
        let a = pool.allocate(spark_at(0.0, 0.0)).unwrap();
        pool.allocate(spark_at(1.0, 0.0)).unwrap();
        pool.release(a);
        let xs: Vec<f32> = pool.iter().map(|(_, p)| p.x).collect();
        assert_eq!(xs, vec![1.0]);
        assert!(pool.handle_at(0).is_none());
        assert!(pool.handle_at(1).is_some());
        assert!(pool.handle_at(7).is_none());
    }
}
