//! Property tests for the numeric core.

use attractool::color::{advance_hue, ColorScheme};
use attractool::prelude::*;
use attractool::{project, Viewport};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn any_field() -> impl Strategy<Value = VectorField> {
    prop::sample::select(VectorField::ALL.to_vec())
}

fn finite_state() -> impl Strategy<Value = DVec3> {
    (-50.0f64..50.0, -50.0f64..50.0, -50.0f64..50.0).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

proptest! {
    /// Stepping is a pure function of its inputs.
    #[test]
    fn step_is_deterministic(field in any_field(), state in finite_state(), dt in 0.0f64..5.0) {
        let params = ParameterSet::defaults(field);
        let a = field.step(state, &params, dt);
        let b = field.step(state, &params, dt);
        prop_assert_eq!(a.to_array().map(f64::to_bits), b.to_array().map(f64::to_bits));
    }

    /// Planar maps never leave the z = 0 plane.
    #[test]
    fn planar_maps_stay_flat(x in -3.0f64..3.0, y in -3.0f64..3.0, steps in 1usize..50) {
        for field in [VectorField::Clifford, VectorField::DeJong] {
            let params = ParameterSet::defaults(field);
            let mut state = DVec3::new(x, y, 0.0);
            for _ in 0..steps {
                state = field.step(state, &params, 1.0);
            }
            prop_assert_eq!(state.z, 0.0);
        }
    }

    /// Hue always lands in [0, 360).
    #[test]
    fn hue_stays_in_range(hue in 0.0f32..360.0, increment in 0.5f32..1.5, speed in 0.0f64..10.0) {
        let next = advance_hue(hue, increment, speed);
        prop_assert!((0.0..360.0).contains(&next), "{} -> {}", hue, next);
    }

    /// Every scheme is total over the hue wheel.
    #[test]
    fn schemes_are_total(hue in 0.0f32..360.0) {
        for scheme in ColorScheme::ALL {
            let color = scheme.color(hue);
            prop_assert_eq!(color.a, 255);
        }
    }

    /// Randomized parameters respect the declared ranges.
    #[test]
    fn randomized_parameters_in_bounds(field in any_field(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut params = ParameterSet::defaults(field);
        params.randomize(&mut rng);
        for (spec, value) in params.specs().iter().zip(params.values()) {
            prop_assert!(spec.min <= *value && *value <= spec.max, "{}={}", spec.name, value);
        }
    }

    /// Re-initialization yields exactly `count` particles inside the spawn box.
    #[test]
    fn pool_initialization_in_range(field in any_field(), count in 1usize..500, seed in any::<u64>()) {
        let mut pool = attractool::ParticlePool::with_seed(seed);
        let range = field.schema().initial_range();
        let particles = pool.initialize(count, field);
        prop_assert_eq!(particles.len(), count);
        for p in particles {
            prop_assert!(range.contains(p.position));
        }
    }

    /// The view scale stays clamped whatever the zoom sequence.
    #[test]
    fn zoom_stays_clamped(factors in prop::collection::vec(0.01f64..100.0, 1..20)) {
        let mut view = ViewTransform::default();
        for factor in factors {
            view.zoom_by(factor);
            prop_assert!((1.0..=100.0).contains(&view.scale()));
        }
    }

    /// At zero rotation and unit scale the projection is a translation.
    #[test]
    fn zero_rotation_projection_translates(state in finite_state(), w in 1u32..2000, h in 1u32..2000) {
        let view = ViewTransform::new(1.0);
        let p = project(state, VectorField::Lorenz.dimension(), &view, Viewport::new(w, h));
        prop_assert!((p.x as f64 - (state.x + w as f64 / 2.0)).abs() < 1e-3);
        prop_assert!((p.y as f64 - (state.y + h as f64 / 2.0)).abs() < 1e-3);
    }
}
