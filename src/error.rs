//! Error types for Attractool.
//!
//! Configuration problems are reported once, at setup time. Nothing in the
//! per-frame path returns an error: degenerate numbers simply draw nothing.

use thiserror::Error;

/// Errors raised while resolving a field, its parameters or render settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// No vector field is registered under this identifier.
    #[error("Unknown vector field '{0}'. Use --list-fields to see the available fields.")]
    UnknownField(String),
    /// The field has no parameter with this name.
    #[error("Field '{field}' has no parameter named '{name}'")]
    UnknownParameter {
        /// Field identifier.
        field: String,
        /// Requested parameter name.
        name: String,
    },
    /// A color string was not a `#RRGGBB` hex value.
    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),
    /// A parameter set was handed to a field it does not belong to.
    #[error("Parameters for '{params}' cannot drive field '{field}'")]
    ParameterMismatch {
        /// Field being stepped.
        field: String,
        /// Field the parameters were built for.
        params: String,
    },
    /// Particle count outside `1..=MAX_PARTICLE_COUNT`.
    #[error("Particle count must be between 1 and 5000, got {0}")]
    InvalidParticleCount(usize),
}

/// Errors that can occur while loading or saving [`Settings`](crate::config::Settings).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read or write the settings file.
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The file was not valid settings JSON.
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture format.
    #[error("GPU surface has no supported texture formats")]
    NoSurfaceFormat,
}

/// Errors that can occur when running a simulation window.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Failed to create or run the event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The simulation could not be configured.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}
