//! The per-frame driver.
//!
//! One [`FrameLoop::tick`] is one visible frame:
//!
//! 1. fade the surface towards the background, leaving streaks behind moving
//!    particles;
//! 2. if running, advance every particle one step;
//! 3. project, color and draw every particle, as a point or as a polyline
//!    through its trail.
//!
//! Pausing only skips step 2. Hues keep cycling and the view can still be
//! rotated while paused.

use glam::Vec2;
use tracing::trace;

use crate::canvas::DrawSurface;
use crate::color::color_for;
use crate::context::SimulationContext;
use crate::integrator::{Integrator, FRAME_DT};
use crate::projection::{project, Viewport};

/// Whether particles advance on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Paused,
}

/// Drives a [`SimulationContext`] one frame at a time.
pub struct FrameLoop {
    context: SimulationContext,
    state: LoopState,
    frame: u64,
    // Reused projection buffer for trails.
    scratch: Vec<Vec2>,
}

impl FrameLoop {
    /// Wrap `context` in a running loop at frame zero.
    pub fn new(context: SimulationContext) -> Self {
        Self {
            context,
            state: LoopState::Running,
            frame: 0,
            scratch: Vec::new(),
        }
    }

    /// The simulation state being rendered.
    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    /// Mutable access for input handling between ticks.
    pub fn context_mut(&mut self) -> &mut SimulationContext {
        &mut self.context
    }

    /// Consume the loop and return its context.
    pub fn into_context(self) -> SimulationContext {
        self.context
    }

    /// Whether the loop is running or paused.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// True while integration is suspended.
    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }

    /// Pause or resume integration. Paused ticks still fade, recolor and draw.
    pub fn set_paused(&mut self, paused: bool) {
        self.state = if paused {
            LoopState::Paused
        } else {
            LoopState::Running
        };
    }

    /// Flip between running and paused.
    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.is_paused());
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Render one frame onto `surface`.
    pub fn tick(&mut self, surface: &mut dyn DrawSurface) {
        let (width, height) = surface.size();
        let viewport = Viewport::new(width, height);
        let render = self.context.render.clone();
        let field = self.context.field();

        surface.fade(render.background, render.fade_opacity);

        if self.state == LoopState::Running {
            let (pool, params) = self.context.split_mut();
            Integrator::advance(pool, field, params, render.speed, FRAME_DT);
        }

        let view = self.context.view;
        let dimension = field.dimension();
        let to_screen = |position| project(position, dimension, &view, viewport);

        for particle in self.context.pool_mut().particles_mut() {
            let scheme_color = color_for(particle, render.scheme, render.speed);
            let color = render.particle_color.unwrap_or(scheme_color);

            match &particle.trail {
                Some(trail) if trail.len() >= 2 => {
                    self.scratch.clear();
                    self.scratch.extend(
                        trail
                            .iter()
                            .map(|p| to_screen(*p))
                            .filter(|p| p.is_finite()),
                    );
                    match self.scratch.len() {
                        0 => {}
                        1 => surface.point(self.scratch[0], color),
                        _ => surface.polyline(&self.scratch, color),
                    }
                }
                _ => {
                    let at = to_screen(particle.position);
                    if at.is_finite() {
                        surface.point(at, color);
                    }
                }
            }
        }

        self.frame += 1;
        trace!(frame = self.frame, paused = self.is_paused(), "frame rendered");
    }

    /// Render `frames` consecutive frames onto `surface`.
    pub fn run_ticks(&mut self, frames: u64, surface: &mut dyn DrawSurface) {
        for _ in 0..frames {
            self.tick(surface);
        }
    }
}
