//! # Attractool - Chaotic Attractor Particle Swarms
//!
//! Thousands of independent particles carried through a chaotic vector field,
//! projected to 2D and drawn with fading streaks.
//!
//! Attractool handles the integration, projection, coloring and presentation
//! so you only choose a field, its parameters and how it should look.
//!
//! ## Quick Start
//!
//! ```ignore
//! use attractool::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_field(VectorField::Lorenz)
//!         .with_particle_count(2000)
//!         .with_color_scheme(ColorScheme::Cyberpunk)
//!         .with_trails(true)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Fields
//!
//! A [`VectorField`] is either a continuous flow, advanced with one explicit
//! Euler step per frame, or a planar iterated map. Each field publishes a
//! [`FieldSchema`] describing its parameters and where particles spawn.
//!
//! ```ignore
//! let params = ParameterSet::defaults(VectorField::Lorenz);
//! let next = VectorField::Lorenz.step(DVec3::ONE, &params, 1.0);
//! ```
//!
//! ### The Frame Loop
//!
//! [`FrameLoop::tick`] renders one frame onto any [`DrawSurface`]: it fades
//! the previous frame, advances every particle (unless paused) and draws each
//! one as a point or as a polyline through its trail. [`Canvas`] rasterizes
//! in software; [`CommandBuffer`] records the draw calls instead.
//!
//! ```ignore
//! let context = SimulationContext::with_seed(VectorField::Aizawa, 500, 7)?;
//! let mut frames = FrameLoop::new(context);
//! let mut canvas = Canvas::new(800, 600, Color::BLACK);
//! frames.run_ticks(120, &mut canvas);
//! ```
//!
//! ## Feature Overview
//!
//! | Category | Fields |
//! |----------|--------|
//! | 3D flows | [`VectorField::Lorenz`], [`VectorField::Rossler`], [`VectorField::Halvorsen`], [`VectorField::Chen`], [`VectorField::Aizawa`], [`VectorField::Dadras`] |
//! | 2D maps | [`VectorField::Clifford`], [`VectorField::DeJong`] |

pub mod canvas;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod frame;
mod gpu;
pub mod input;
pub mod integrator;
pub mod params;
pub mod particle;
pub mod projection;
mod simulation;
pub mod time;
mod window;

pub use canvas::{Canvas, CommandBuffer, DrawCommand, DrawSurface};
pub use color::{Color, ColorScheme};
pub use config::Settings;
pub use context::{RenderSettings, SimulationContext};
pub use error::{ConfigurationError, GpuError, SettingsError, SimulationError};
pub use field::{FieldRegistry, FieldSchema, VectorField};
pub use frame::{FrameLoop, LoopState};
pub use glam::{DVec3, Vec2};
pub use gpu::BLIT_SHADER;
pub use integrator::Integrator;
pub use params::ParameterSet;
pub use particle::{Particle, ParticlePool};
pub use projection::{project, ViewTransform, Viewport};
pub use simulation::Simulation;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use attractool::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, CommandBuffer, DrawCommand, DrawSurface};
    pub use crate::color::{Color, ColorScheme};
    pub use crate::config::Settings;
    pub use crate::context::SimulationContext;
    pub use crate::error::{ConfigurationError, SimulationError};
    pub use crate::field::{FieldRegistry, VectorField};
    pub use crate::frame::FrameLoop;
    pub use crate::params::ParameterSet;
    pub use crate::projection::ViewTransform;
    pub use crate::simulation::Simulation;
    pub use crate::{DVec3, Vec2};
}
