//! Advances every particle one logical step.

use crate::field::VectorField;
use crate::params::ParameterSet;
use crate::particle::ParticlePool;

/// Logical time advanced per rendered frame, before the speed multiplier.
pub const FRAME_DT: f64 = 1.0;

/// Fixed-step explicit integrator over a [`ParticlePool`].
pub struct Integrator;

impl Integrator {
    /// Move every particle by one step of `dt * speed` under `field`.
    ///
    /// `speed` scales simulated time, not frame rate. When trails are enabled
    /// the new position is appended to each particle's history.
    pub fn advance(
        pool: &mut ParticlePool,
        field: VectorField,
        params: &ParameterSet,
        speed: f64,
        dt: f64,
    ) {
        let step = dt * speed;
        for particle in pool.particles_mut() {
            particle.position = field.step(particle.position, params, step);
            if let Some(trail) = &mut particle.trail {
                trail.push(particle.position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_advance_matches_field_step() {
        let mut pool = ParticlePool::with_seed(9);
        pool.initialize(16, VectorField::Lorenz);
        let params = ParameterSet::defaults(VectorField::Lorenz);
        let before: Vec<DVec3> = pool.particles().iter().map(|p| p.position).collect();

        Integrator::advance(&mut pool, VectorField::Lorenz, &params, 2.0, FRAME_DT);

        for (old, p) in before.iter().zip(pool.particles()) {
            assert_eq!(p.position, VectorField::Lorenz.step(*old, &params, 2.0));
        }
    }

    #[test]
    fn test_speed_scales_step_length() {
        let params = ParameterSet::defaults(VectorField::Lorenz);
        let mut slow = ParticlePool::with_seed(5);
        let mut fast = ParticlePool::with_seed(5);
        slow.initialize(1, VectorField::Lorenz);
        fast.initialize(1, VectorField::Lorenz);
        let start = slow.particles()[0].position;

        Integrator::advance(&mut slow, VectorField::Lorenz, &params, 1.0, FRAME_DT);
        Integrator::advance(&mut fast, VectorField::Lorenz, &params, 3.0, FRAME_DT);

        let slow_delta = slow.particles()[0].position - start;
        let fast_delta = fast.particles()[0].position - start;
        assert!((fast_delta - slow_delta * 3.0).length() < 1e-9);
    }

    #[test]
    fn test_advance_records_trail() {
        let mut pool = ParticlePool::with_seed(6);
        pool.initialize(3, VectorField::Rossler);
        pool.set_trails(true);
        let params = ParameterSet::defaults(VectorField::Rossler);

        for _ in 0..4 {
            Integrator::advance(&mut pool, VectorField::Rossler, &params, 1.0, FRAME_DT);
        }

        for p in pool.particles() {
            let trail = p.trail.as_ref().unwrap();
            assert_eq!(trail.len(), 4);
            assert_eq!(trail.iter().last(), Some(&p.position));
        }
    }

    #[test]
    fn test_empty_pool_is_fine() {
        let mut pool = ParticlePool::with_seed(0);
        let params = ParameterSet::defaults(VectorField::Chen);
        Integrator::advance(&mut pool, VectorField::Chen, &params, 1.0, FRAME_DT);
        assert!(pool.is_empty());
    }
}
