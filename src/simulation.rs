//! Simulation builder and runner

use tracing::info;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::canvas::Canvas;
use crate::color::ColorScheme;
use crate::config::Settings;
use crate::context::SimulationContext;
use crate::error::{ConfigurationError, SimulationError};
use crate::field::VectorField;
use crate::frame::FrameLoop;
use crate::window::App;

/// An attractor simulation builder.
///
/// Use method chaining to configure, then call `.run()` to open a window, or
/// `.run_headless()` to render a fixed number of frames off-screen.
///
/// ```ignore
/// Simulation::new()
///     .with_field(VectorField::Aizawa)
///     .with_particle_count(3000)
///     .with_color_scheme(ColorScheme::Neon)
///     .run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    settings: Settings,
    title: Option<String>,
}

impl Simulation {
    /// Create a new simulation with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every setting at once, e.g. with a loaded settings file.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_field(mut self, field: VectorField) -> Self {
        self.settings.field = field.id().to_string();
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.settings.particle_count = count;
        self
    }

    /// Set the simulated-time multiplier.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.settings.speed = speed;
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.settings.color_scheme = scheme;
        self
    }

    /// Set the background as a `#RRGGBB` string.
    pub fn with_background(mut self, hex: impl Into<String>) -> Self {
        self.settings.background = hex.into();
        self
    }

    /// Draw every particle in one `#RRGGBB` color instead of the scheme.
    pub fn with_particle_color(mut self, hex: impl Into<String>) -> Self {
        self.settings.particle_color = Some(hex.into());
        self
    }

    pub fn with_trails(mut self, enabled: bool) -> Self {
        self.settings.trails = enabled;
        self
    }

    /// Make spawning and parameter randomization reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self
    }

    /// Override one parameter of the starting field.
    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.settings.parameters.insert(name.into(), value);
        self
    }

    /// Set the window or off-screen canvas size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.settings.width = width;
        self.settings.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Validate the settings and build the frame loop.
    pub fn build(&self) -> Result<FrameLoop, ConfigurationError> {
        SimulationContext::from_settings(&self.settings).map(FrameLoop::new)
    }

    /// Render `frames` frames off-screen and return the final canvas.
    pub fn run_headless(&self, frames: u64) -> Result<Canvas, ConfigurationError> {
        let mut frame_loop = self.build()?;
        let background = frame_loop.context().render.background;
        let mut canvas = Canvas::new(self.settings.width, self.settings.height, background);
        frame_loop.run_ticks(frames, &mut canvas);
        info!(
            frames,
            width = canvas.width(),
            height = canvas.height(),
            "headless run finished"
        );
        Ok(canvas)
    }

    /// Open a window and run until it is closed.
    ///
    /// Invalid settings do not abort the run: the simulation falls back to
    /// the default field and logs a warning.
    pub fn run(self) -> Result<(), SimulationError> {
        let context = SimulationContext::from_settings_or_default(&self.settings);
        let title = self
            .title
            .unwrap_or_else(|| format!("attractool - {}", context.field().schema().name));
        info!(
            field = %context.field(),
            particles = context.particle_count(),
            "starting simulation"
        );

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let size = (self.settings.width, self.settings.height);
        let mut app = App::new(title, size, FrameLoop::new(context));
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let sim = Simulation::new()
            .with_field(VectorField::Dadras)
            .with_particle_count(42)
            .with_speed(2.5)
            .with_trails(true)
            .with_parameter("q", 3.0);
        let settings = sim.settings();
        assert_eq!(settings.field, "dadras");
        assert_eq!(settings.particle_count, 42);
        assert_eq!(settings.speed, 2.5);
        assert!(settings.trails);
        assert_eq!(settings.parameters.get("q"), Some(&3.0));
    }

    #[test]
    fn test_build_reports_configuration_errors() {
        let err = Simulation::new().with_background("black").build().err();
        assert_eq!(err, Some(ConfigurationError::InvalidColor("black".into())));

        let err = Simulation::new().with_particle_count(0).build().err();
        assert_eq!(err, Some(ConfigurationError::InvalidParticleCount(0)));
    }

    #[test]
    fn test_run_headless_draws_on_background() {
        let canvas = Simulation::new()
            .with_seed(3)
            .with_size(160, 120)
            .with_background("#101010")
            .with_particle_color("#ffffff")
            .run_headless(5)
            .unwrap();
        assert_eq!((canvas.width(), canvas.height()), (160, 120));
        assert!(canvas.pixels().iter().any(|c| c.r > 200));
    }
}
