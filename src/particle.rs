//! Particle state and the pool that owns it.
//!
//! Particles never interact: each one is a point carried through the selected
//! field plus the rendering metadata it needs (hue and, when trails are
//! enabled, a short position history).

use std::collections::VecDeque;

use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::field::{Dimension, InitialRange, VectorField};

/// Positions kept per particle when trails are enabled.
pub const TRAIL_CAPACITY: usize = 50;

/// Fixed-capacity FIFO of recent positions, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<DVec3>,
    capacity: usize,
}

impl Trail {
    /// Create an empty trail holding at most `capacity` points.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `point`, evicting the oldest entry when full.
    pub fn push(&mut self, point: DVec3) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Recorded points, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &DVec3> {
        self.points.iter()
    }

    /// Number of recorded points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True before the first push.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// A single point in the swarm.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in field state space. `z` stays 0 for planar fields.
    pub position: DVec3,
    /// Current hue in degrees, `[0, 360)`.
    pub hue: f32,
    /// Hue advance per frame at speed 1. Fixed for the particle's lifetime.
    pub hue_increment: f32,
    /// Recent positions, present only while trails are enabled.
    pub trail: Option<Trail>,
}

impl Particle {
    /// Create a particle at `position` with the given hue settings.
    pub fn new(position: DVec3, hue: f32, hue_increment: f32) -> Self {
        Self {
            position,
            hue,
            hue_increment,
            trail: None,
        }
    }
}

/// Owns every particle of a running simulation.
///
/// The pool is always rebuilt as a whole: changing the count or the field
/// throws the old particles away.
pub struct ParticlePool {
    particles: Vec<Particle>,
    field: VectorField,
    trails: bool,
    rng: StdRng,
}

impl ParticlePool {
    /// Create an empty pool seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create an empty pool with a deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            field: VectorField::default(),
            trails: false,
            rng,
        }
    }

    /// Replace the generator with one seeded from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Replace every particle with `count` fresh ones spawned for `field`.
    ///
    /// Positions are uniform within the field's initial range, hues uniform in
    /// `[0, 360)` and hue increments uniform in `[0.5, 1.5)`.
    pub fn initialize(&mut self, count: usize, field: VectorField) -> &[Particle] {
        let schema = field.schema();
        let range = schema.initial_range();
        let planar = schema.dimension == Dimension::Planar;
        let trails = self.trails;
        let rng = &mut self.rng;

        self.particles = (0..count)
            .map(|_| spawn_particle(rng, &range, planar, trails))
            .collect();
        self.field = field;

        debug!(field = %field, count, trails, "particle pool initialized");
        &self.particles
    }

    /// Rebuild the pool with `count` particles for the current field.
    pub fn resize(&mut self, count: usize) {
        self.initialize(count, self.field);
    }

    /// Rebuild the pool with the same count and field.
    pub fn reset(&mut self) {
        self.initialize(self.particles.len(), self.field);
    }

    /// Enable or disable position histories.
    ///
    /// Enabling starts every particle with an empty trail; disabling drops
    /// the recorded history.
    pub fn set_trails(&mut self, enabled: bool) {
        self.trails = enabled;
        for particle in &mut self.particles {
            particle.trail = enabled.then(|| Trail::new(TRAIL_CAPACITY));
        }
    }

    /// Whether new and existing particles carry a trail.
    pub fn trails_enabled(&self) -> bool {
        self.trails
    }

    /// Field the current particles were spawned for.
    pub fn field(&self) -> VectorField {
        self.field
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True before the first call to [`initialize`](Self::initialize).
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// All particles in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view used by the integrator and colorizer.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

fn spawn_particle<R: Rng + ?Sized>(
    rng: &mut R,
    range: &InitialRange,
    planar: bool,
    trails: bool,
) -> Particle {
    let mut axis = |min: f64, max: f64| min + rng.gen::<f64>() * (max - min);
    let x = axis(range.min.x, range.max.x);
    let y = axis(range.min.y, range.max.y);
    let z = if planar { 0.0 } else { axis(range.min.z, range.max.z) };
    // `gen_range` keeps both draws strictly below their upper bounds.
    let hue = rng.gen_range(0.0f32..360.0);
    let hue_increment = rng.gen_range(0.5f32..1.5);

    let mut particle = Particle::new(DVec3::new(x, y, z), hue, hue_increment);
    if trails {
        particle.trail = Some(Trail::new(TRAIL_CAPACITY));
    }
    particle
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}
