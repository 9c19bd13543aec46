//! Mutable simulation state shared by the frame loop and the input handlers.
//!
//! A [`SimulationContext`] owns the particle pool, each field's parameter
//! values, the view and the render settings. Everything that changes between
//! frames goes through it, so handlers never touch the pool directly.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::color::{Color, ColorScheme};
use crate::config::{Settings, DEFAULT_FADE_OPACITY, DEFAULT_PARTICLE_COUNT, MAX_PARTICLE_COUNT};
use crate::error::ConfigurationError;
use crate::field::VectorField;
use crate::params::ParameterSet;
use crate::particle::ParticlePool;
use crate::projection::ViewTransform;

/// How particles are drawn each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub scheme: ColorScheme,
    pub background: Color,
    /// Overrides the scheme color when set.
    pub particle_color: Option<Color>,
    /// Draw each particle's history as a line instead of a single point.
    pub trails: bool,
    /// Background blend per frame, `[0, 1]`.
    pub fade_opacity: f32,
    /// Simulated-time multiplier.
    pub speed: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scheme: ColorScheme::Rainbow,
            background: Color::BLACK,
            particle_color: None,
            trails: false,
            fade_opacity: DEFAULT_FADE_OPACITY,
            speed: 1.0,
        }
    }
}

/// Which way an arrow key nudges a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}

/// The whole state of a running simulation, minus the frame clock.
pub struct SimulationContext {
    field: VectorField,
    parameters: HashMap<VectorField, ParameterSet>,
    pool: ParticlePool,
    particle_count: usize,
    reset_on_switch: bool,
    rng: StdRng,
    /// Rotation and zoom of the 3D view.
    pub view: ViewTransform,
    pub render: RenderSettings,
}

impl SimulationContext {
    /// Start `field` with `particle_count` particles and default everything else.
    pub fn new(field: VectorField, particle_count: usize) -> Result<Self, ConfigurationError> {
        Self::build(field, particle_count, None)
    }

    /// Like [`new`](Self::new) but with deterministic spawning and randomization.
    pub fn with_seed(
        field: VectorField,
        particle_count: usize,
        seed: u64,
    ) -> Result<Self, ConfigurationError> {
        Self::build(field, particle_count, Some(seed))
    }

    fn build(
        field: VectorField,
        particle_count: usize,
        seed: Option<u64>,
    ) -> Result<Self, ConfigurationError> {
        check_particle_count(particle_count)?;
        Ok(Self::spawn(field, particle_count, seed))
    }

    // `particle_count` must be non-zero.
    fn spawn(field: VectorField, particle_count: usize, seed: Option<u64>) -> Self {
        let (pool, rng) = match seed {
            Some(seed) => (
                ParticlePool::with_seed(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (ParticlePool::new(), StdRng::from_entropy()),
        };

        let mut context = Self {
            field,
            parameters: HashMap::new(),
            pool,
            particle_count,
            reset_on_switch: true,
            rng,
            view: ViewTransform::default(),
            render: RenderSettings::default(),
        };
        context.select_field(field);
        context
    }

    /// Build a context from loaded [`Settings`].
    ///
    /// Fails on the first invalid entry; callers decide whether to fall back.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigurationError> {
        let field: VectorField = settings.field.parse()?;
        let background = Color::from_hex(&settings.background)?;
        let particle_color = settings
            .particle_color
            .as_deref()
            .map(Color::from_hex)
            .transpose()?;

        let mut context = Self::build(field, settings.particle_count, settings.seed)?;
        context.reset_on_switch = settings.reset_parameters_on_switch;
        context.render = RenderSettings {
            scheme: settings.color_scheme,
            background,
            particle_color,
            trails: settings.trails,
            fade_opacity: settings.fade_opacity.clamp(0.0, 1.0),
            speed: settings.speed,
        };
        context.pool.set_trails(settings.trails);

        let params = context.params_mut();
        for (name, value) in &settings.parameters {
            params.set(name, *value)?;
        }
        Ok(context)
    }

    /// Like [`from_settings`](Self::from_settings), but an invalid configuration
    /// falls back to the default field with default settings.
    pub fn from_settings_or_default(settings: &Settings) -> Self {
        match Self::from_settings(settings) {
            Ok(context) => context,
            Err(e) => {
                warn!(error = %e, "invalid configuration, falling back to defaults");
                Self::spawn(VectorField::default(), DEFAULT_PARTICLE_COUNT, settings.seed)
            }
        }
    }

    pub fn field(&self) -> VectorField {
        self.field
    }

    /// Switch to `field`.
    ///
    /// Rebuilds the pool and sets the view zoom to the field's scale hint.
    /// Parameters are restored to their defaults unless the context was
    /// configured to keep per-field values across switches.
    pub fn select_field(&mut self, field: VectorField) {
        self.field = field;
        if self.reset_on_switch {
            self.parameters.insert(field, ParameterSet::defaults(field));
        } else {
            self.parameters
                .entry(field)
                .or_insert_with(|| ParameterSet::defaults(field));
        }
        self.pool.initialize(self.particle_count, field);
        self.view.set_scale(field.schema().scale_hint);
        info!(field = %field, particles = self.particle_count, "field selected");
    }

    /// Parameters of the current field.
    pub fn params(&self) -> &ParameterSet {
        // `select_field` always stores an entry for the current field.
        &self.parameters[&self.field]
    }

    pub fn params_mut(&mut self) -> &mut ParameterSet {
        let field = self.field;
        self.parameters
            .entry(field)
            .or_insert_with(|| ParameterSet::defaults(field))
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    /// Borrow the pool mutably alongside the current field's parameters.
    pub fn split_mut(&mut self) -> (&mut ParticlePool, &ParameterSet) {
        let field = self.field;
        let params = self
            .parameters
            .entry(field)
            .or_insert_with(|| ParameterSet::defaults(field));
        (&mut self.pool, params)
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Change the number of particles. The whole pool is respawned.
    pub fn set_particle_count(&mut self, count: usize) -> Result<(), ConfigurationError> {
        check_particle_count(count)?;
        self.particle_count = count;
        self.pool.initialize(count, self.field);
        Ok(())
    }

    /// Respawn every particle for the current field.
    pub fn reset_particles(&mut self) {
        self.pool.initialize(self.particle_count, self.field);
    }

    /// Draw new random values for every parameter of the current field and
    /// respawn the swarm under them.
    pub fn randomize_parameters(&mut self) {
        let field = self.field;
        let params = self
            .parameters
            .entry(field)
            .or_insert_with(|| ParameterSet::defaults(field));
        params.randomize(&mut self.rng);
        info!(field = %field, values = ?params.values(), "parameters randomized");
        self.pool.initialize(self.particle_count, field);
    }

    /// Restore the current field's default parameters.
    pub fn reset_parameters(&mut self) {
        self.params_mut().reset();
    }

    /// Nudge a parameter the way the arrow keys do.
    ///
    /// Lorenz maps up/down to `rho` and left/right to `sigma`; every other
    /// field moves its first parameter, up/right increasing it.
    pub fn nudge_parameter(&mut self, direction: Nudge, step: f64) {
        let field = self.field;
        let (name, delta) = match (field, direction) {
            (VectorField::Lorenz, Nudge::Up) => ("rho", step),
            (VectorField::Lorenz, Nudge::Down) => ("rho", -step),
            (VectorField::Lorenz, Nudge::Left) => ("sigma", -step),
            (VectorField::Lorenz, Nudge::Right) => ("sigma", step),
            (_, Nudge::Up | Nudge::Right) => (field.schema().params[0].name, step),
            (_, Nudge::Down | Nudge::Left) => (field.schema().params[0].name, -step),
        };
        if let Err(e) = self.params_mut().nudge(name, delta) {
            warn!(error = %e, "parameter nudge ignored");
        }
    }

    /// Turn position histories on or off.
    pub fn set_trails(&mut self, enabled: bool) {
        self.render.trails = enabled;
        self.pool.set_trails(enabled);
    }

    pub fn toggle_trails(&mut self) {
        self.set_trails(!self.render.trails);
    }

    /// Advance to the next color scheme.
    pub fn cycle_scheme(&mut self) {
        self.render.scheme = self.render.scheme.next();
        info!(scheme = %self.render.scheme, "color scheme changed");
    }

    /// Advance to the next field in catalog order.
    pub fn cycle_field(&mut self) {
        self.select_field(self.field.next());
    }
}

fn check_particle_count(count: usize) -> Result<(), ConfigurationError> {
    if count == 0 || count > MAX_PARTICLE_COUNT {
        return Err(ConfigurationError::InvalidParticleCount(count));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::Integrator;
    use glam::DVec3;

    #[test]
    fn test_out_of_range_particle_counts_rejected() {
        assert_eq!(
            SimulationContext::new(VectorField::Lorenz, 0).err(),
            Some(ConfigurationError::InvalidParticleCount(0))
        );
        let mut context = SimulationContext::with_seed(VectorField::Lorenz, 10, 1).unwrap();
        assert!(context.set_particle_count(0).is_err());
        assert!(context.set_particle_count(MAX_PARTICLE_COUNT + 1).is_err());
        assert_eq!(context.particle_count(), 10);
        assert_eq!(context.pool().len(), 10);
    }

    #[test]
    fn test_select_field_resets_pool_and_scale() {
        let mut context = SimulationContext::with_seed(VectorField::Lorenz, 64, 2).unwrap();
        context.view.rotate_by(30.0, 40.0);
        let rotation = (context.view.rotation_x, context.view.rotation_y);

        context.select_field(VectorField::Aizawa);

        assert_eq!(context.field(), VectorField::Aizawa);
        assert_eq!(context.pool().field(), VectorField::Aizawa);
        assert_eq!(context.pool().len(), 64);
        assert_eq!(context.view.scale(), 100.0);
        assert_eq!((context.view.rotation_x, context.view.rotation_y), rotation);
    }

    #[test]
    fn test_switching_back_restores_defaults() {
        let mut context = SimulationContext::with_seed(VectorField::Lorenz, 8, 3).unwrap();
        context.randomize_parameters();
        context.select_field(VectorField::Chen);
        context.select_field(VectorField::Lorenz);
        assert_eq!(context.params(), &ParameterSet::defaults(VectorField::Lorenz));
    }

    #[test]
    fn test_randomize_parameters_respawns_pool() {
        let mut context = SimulationContext::with_seed(VectorField::Lorenz, 16, 11).unwrap();
        context.set_trails(true);
        let defaults = ParameterSet::defaults(VectorField::Lorenz);
        for _ in 0..5 {
            Integrator::advance(context.pool_mut(), VectorField::Lorenz, &defaults, 1.0, 1.0);
        }
        let before: Vec<DVec3> = context.pool().particles().iter().map(|p| p.position).collect();

        context.randomize_parameters();

        let after: Vec<DVec3> = context.pool().particles().iter().map(|p| p.position).collect();
        assert_eq!(after.len(), 16);
        assert_ne!(before, after);
        let range = VectorField::Lorenz.schema().initial_range();
        for p in context.pool().particles() {
            assert!(range.contains(p.position));
            assert!(p.trail.as_ref().is_some_and(|t| t.is_empty()));
        }
    }

    #[test]
    fn test_switching_can_keep_tuned_values() {
        let settings = Settings {
            reset_parameters_on_switch: false,
            seed: Some(4),
            ..Default::default()
        };
        let mut context = SimulationContext::from_settings(&settings).unwrap();
        context.params_mut().set("rho", 14.0).unwrap();
        context.select_field(VectorField::Rossler);
        context.select_field(VectorField::Lorenz);
        assert_eq!(context.params().get("rho"), Some(14.0));
    }

    #[test]
    fn test_lorenz_arrow_mapping() {
        let mut context = SimulationContext::with_seed(VectorField::Lorenz, 1, 5).unwrap();
        context.nudge_parameter(Nudge::Up, 1.0);
        context.nudge_parameter(Nudge::Left, 1.0);
        assert_eq!(context.params().get("rho"), Some(29.0));
        assert_eq!(context.params().get("sigma"), Some(9.0));
    }

    #[test]
    fn test_other_fields_nudge_first_parameter() {
        let mut context = SimulationContext::with_seed(VectorField::Dadras, 1, 6).unwrap();
        context.nudge_parameter(Nudge::Right, 1.0);
        assert_eq!(context.params().get("p"), Some(4.0));
        context.nudge_parameter(Nudge::Down, 10.0);
        assert_eq!(context.params().get("p"), Some(0.0));
        assert_eq!(context.params().get("q"), Some(2.7));
    }

    #[test]
    fn test_from_settings_applies_overrides() {
        let mut settings = Settings {
            field: "Clifford".into(),
            background: "#102030".into(),
            particle_color: Some("#ffffff".into()),
            trails: true,
            seed: Some(7),
            ..Default::default()
        };
        settings.parameters.insert("a".into(), -9.0);

        let context = SimulationContext::from_settings(&settings).unwrap();
        assert_eq!(context.field(), VectorField::Clifford);
        assert_eq!(context.render.background, Color::rgb(16, 32, 48));
        assert_eq!(context.render.particle_color, Some(Color::WHITE));
        assert_eq!(context.params().get("a"), Some(-3.0));
        assert!(context.pool().trails_enabled());
    }

    #[test]
    fn test_invalid_settings_fall_back() {
        let settings = Settings {
            field: "thomas".into(),
            ..Default::default()
        };
        assert_eq!(
            SimulationContext::from_settings(&settings).err(),
            Some(ConfigurationError::UnknownField("thomas".into()))
        );
        let context = SimulationContext::from_settings_or_default(&settings);
        assert_eq!(context.field(), VectorField::Lorenz);
    }

    #[test]
    fn test_cycle_helpers() {
        let mut context = SimulationContext::with_seed(VectorField::DeJong, 4, 8).unwrap();
        context.cycle_field();
        assert_eq!(context.field(), VectorField::Lorenz);
        context.cycle_scheme();
        assert_eq!(context.render.scheme, ColorScheme::Fire);
        context.toggle_trails();
        assert!(context.pool().particles().iter().all(|p| p.trail.is_some()));
    }
}
