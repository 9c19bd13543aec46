//! The interactive window runner.

use std::sync::Arc;

use tracing::{error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::canvas::Canvas;
use crate::error::SimulationError;
use crate::frame::FrameLoop;
use crate::gpu::Presenter;
use crate::input::{Control, Drag};
use crate::time::FrameStats;

/// winit application driving one [`FrameLoop`].
///
/// Every `RedrawRequested` renders exactly one frame and then requests the
/// next, so input is always applied between frames.
pub(crate) struct App {
    title: String,
    initial_size: (u32, u32),
    frames: FrameLoop,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    canvas: Canvas,
    stats: FrameStats,
    drag: Drag,
    shift: bool,
    /// First fatal error, reported once the event loop exits.
    pub(crate) error: Option<SimulationError>,
}

impl App {
    pub(crate) fn new(title: String, initial_size: (u32, u32), frames: FrameLoop) -> Self {
        let background = frames.context().render.background;
        Self {
            title,
            initial_size,
            frames,
            window: None,
            presenter: None,
            canvas: Canvas::new(0, 0, background),
            stats: FrameStats::new(),
            drag: Drag::default(),
            shift: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SimulationError) {
        error!(error = %err, "simulation window failed");
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(presenter) = &mut self.presenter else {
            return;
        };

        let (width, height) = presenter.size();
        if (self.canvas.width(), self.canvas.height()) != (width, height) {
            self.canvas
                .resize(width, height, self.frames.context().render.background);
        }

        self.frames.tick(&mut self.canvas);

        match presenter.present(&self.canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => presenter.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => error!(error = ?e, "render error"),
        }

        if let Some(fps) = self.stats.record() {
            info!(
                fps = format_args!("{fps:.1}"),
                frame = self.frames.frame(),
                field = %self.frames.context().field(),
                "frame rate"
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let (width, height) = self.initial_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        self.window = Some(window.clone());

        match pollster::block_on(Presenter::new(window.clone())) {
            Ok(presenter) => {
                self.presenter = Some(presenter);
                window.request_redraw();
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(physical_size);
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(control) = Control::from_key(code, self.shift) {
                        control.apply(&mut self.frames);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => self.drag.press(),
                        ElementState::Released => self.drag.release(),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(control) = self.drag.moved(position.x, position.y) {
                    control.apply(&mut self.frames);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                Control::from_scroll(delta).apply(&mut self.frames);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
