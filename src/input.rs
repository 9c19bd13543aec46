//! Keyboard and pointer controls for the interactive window.
//!
//! Raw winit events are translated into [`Control`]s, which are then applied
//! to a [`FrameLoop`] between frames. Keeping the translation separate from
//! the window makes the key bindings testable without an event loop.
//!
//! | Input            | Effect                                       |
//! |------------------|----------------------------------------------|
//! | Left drag        | Rotate the view                              |
//! | Wheel            | Zoom                                         |
//! | Space            | Pause / resume                               |
//! | Enter            | Restore default parameters                   |
//! | R                | Respawn particles                            |
//! | P                | Randomize parameters                         |
//! | T                | Toggle trails                                |
//! | C                | Next color scheme                            |
//! | Tab              | Next field                                   |
//! | Arrows           | Nudge a parameter (hold Shift for 1.0 steps) |

use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

use crate::context::Nudge;
use crate::frame::FrameLoop;

/// Parameter change per arrow key press.
pub const NUDGE_STEP: f64 = 0.1;
/// Parameter change per arrow key press with Shift held.
pub const NUDGE_STEP_COARSE: f64 = 1.0;
/// Zoom multiplier per wheel line.
pub const ZOOM_PER_LINE: f64 = 1.1;

/// A user action, independent of the input that triggered it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    TogglePause,
    RestoreParameters,
    ResetParticles,
    RandomizeParameters,
    ToggleTrails,
    CycleScheme,
    CycleField,
    Nudge { direction: Nudge, step: f64 },
    Rotate { dx: f64, dy: f64 },
    Zoom { factor: f64 },
}

impl Control {
    /// The control bound to `key`, if any.
    pub fn from_key(key: KeyCode, shift: bool) -> Option<Self> {
        let step = if shift { NUDGE_STEP_COARSE } else { NUDGE_STEP };
        let nudge = |direction| Some(Control::Nudge { direction, step });
        match key {
            KeyCode::Space => Some(Control::TogglePause),
            KeyCode::Enter | KeyCode::NumpadEnter => Some(Control::RestoreParameters),
            KeyCode::KeyR => Some(Control::ResetParticles),
            KeyCode::KeyP => Some(Control::RandomizeParameters),
            KeyCode::KeyT => Some(Control::ToggleTrails),
            KeyCode::KeyC => Some(Control::CycleScheme),
            KeyCode::Tab => Some(Control::CycleField),
            KeyCode::ArrowUp => nudge(Nudge::Up),
            KeyCode::ArrowDown => nudge(Nudge::Down),
            KeyCode::ArrowLeft => nudge(Nudge::Left),
            KeyCode::ArrowRight => nudge(Nudge::Right),
            _ => None,
        }
    }

    /// Zoom for a wheel movement. Scrolling up zooms in.
    pub fn from_scroll(delta: MouseScrollDelta) -> Self {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(pos) => pos.y / 40.0,
        };
        Control::Zoom {
            factor: ZOOM_PER_LINE.powf(lines),
        }
    }

    /// Apply this control to `frames`.
    pub fn apply(self, frames: &mut FrameLoop) {
        match self {
            Control::TogglePause => frames.toggle_pause(),
            Control::RestoreParameters => frames.context_mut().reset_parameters(),
            Control::ResetParticles => frames.context_mut().reset_particles(),
            Control::RandomizeParameters => frames.context_mut().randomize_parameters(),
            Control::ToggleTrails => frames.context_mut().toggle_trails(),
            Control::CycleScheme => frames.context_mut().cycle_scheme(),
            Control::CycleField => frames.context_mut().cycle_field(),
            Control::Nudge { direction, step } => {
                frames.context_mut().nudge_parameter(direction, step)
            }
            Control::Rotate { dx, dy } => frames.context_mut().view.rotate_by(dx, dy),
            Control::Zoom { factor } => frames.context_mut().view.zoom_by(factor),
        }
    }
}

/// Tracks a left-button drag across cursor events.
#[derive(Debug, Default)]
pub struct Drag {
    pressed: bool,
    last: Option<(f64, f64)>,
}

impl Drag {
    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.pressed
    }

    /// Record a cursor position, returning a rotation for the movement since
    /// the previous one while the button is held.
    pub fn moved(&mut self, x: f64, y: f64) -> Option<Control> {
        if !self.pressed {
            return None;
        }
        let control = self.last.map(|(last_x, last_y)| Control::Rotate {
            dx: x - last_x,
            dy: y - last_y,
        });
        self.last = Some((x, y));
        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimulationContext;
    use crate::field::VectorField;

    fn frames() -> FrameLoop {
        FrameLoop::new(SimulationContext::with_seed(VectorField::Lorenz, 10, 12).unwrap())
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(Control::from_key(KeyCode::Space, false), Some(Control::TogglePause));
        assert_eq!(Control::from_key(KeyCode::Tab, true), Some(Control::CycleField));
        assert_eq!(
            Control::from_key(KeyCode::ArrowUp, true),
            Some(Control::Nudge {
                direction: Nudge::Up,
                step: NUDGE_STEP_COARSE
            })
        );
        assert_eq!(Control::from_key(KeyCode::KeyZ, false), None);
    }

    #[test]
    fn test_arrow_nudges_lorenz_rho() {
        let mut frames = frames();
        for _ in 0..2 {
            Control::from_key(KeyCode::ArrowUp, false).unwrap().apply(&mut frames);
        }
        let rho = frames.context().params().get("rho").unwrap();
        assert!((rho - 28.2).abs() < 1e-9);
    }

    #[test]
    fn test_space_toggles_pause() {
        let mut frames = frames();
        Control::TogglePause.apply(&mut frames);
        assert!(frames.is_paused());
        Control::TogglePause.apply(&mut frames);
        assert!(!frames.is_paused());
    }

    #[test]
    fn test_enter_restores_defaults() {
        let mut frames = frames();
        Control::RandomizeParameters.apply(&mut frames);
        Control::RestoreParameters.apply(&mut frames);
        assert_eq!(frames.context().params().get("sigma"), Some(10.0));
    }

    #[test]
    fn test_drag_rotates_only_while_pressed() {
        let mut drag = Drag::default();
        assert_eq!(drag.moved(10.0, 10.0), None);

        drag.press();
        assert_eq!(drag.moved(10.0, 10.0), None);
        assert_eq!(drag.moved(15.0, 8.0), Some(Control::Rotate { dx: 5.0, dy: -2.0 }));

        drag.release();
        assert_eq!(drag.moved(50.0, 50.0), None);
    }

    #[test]
    fn test_scroll_zooms() {
        let mut frames = frames();
        let before = frames.context().view.scale();
        Control::from_scroll(MouseScrollDelta::LineDelta(0.0, 1.0)).apply(&mut frames);
        assert!(frames.context().view.scale() > before);
    }
}
