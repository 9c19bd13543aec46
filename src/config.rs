//! User settings, loadable from and savable to JSON.
//!
//! Every field has a default, so a settings file only needs the keys it
//! wants to change:
//!
//! ```json
//! { "field": "aizawa", "particle_count": 2500, "color_scheme": "neon" }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::ColorScheme;
use crate::error::SettingsError;

/// Particle count used when nothing else is configured.
pub const DEFAULT_PARTICLE_COUNT: usize = 1000;
/// Largest particle count the interactive controls offer.
pub const MAX_PARTICLE_COUNT: usize = 5000;
/// Background blend applied every frame, which leaves fading streaks.
pub const DEFAULT_FADE_OPACITY: f32 = 0.1;

/// Startup configuration for a simulation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Field identifier, e.g. `"lorenz"`.
    pub field: String,
    pub particle_count: usize,
    /// Simulated-time multiplier. Also scales how fast hues cycle.
    pub speed: f64,
    pub color_scheme: ColorScheme,
    /// Background as `#RRGGBB`.
    pub background: String,
    /// Draw every particle in this `#RRGGBB` color instead of the scheme.
    pub particle_color: Option<String>,
    pub trails: bool,
    pub fade_opacity: f32,
    /// Restore a field's default parameters whenever it is selected.
    pub reset_parameters_on_switch: bool,
    /// Seed for particle spawning and parameter randomization.
    pub seed: Option<u64>,
    /// Parameter overrides for the starting field, by name.
    pub parameters: BTreeMap<String, f64>,
    pub width: u32,
    pub height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: "lorenz".into(),
            particle_count: DEFAULT_PARTICLE_COUNT,
            speed: 1.0,
            color_scheme: ColorScheme::Rainbow,
            background: "#000000".into(),
            particle_color: None,
            trails: false,
            fade_opacity: DEFAULT_FADE_OPACITY,
            reset_parameters_on_switch: true,
            seed: None,
            parameters: BTreeMap::new(),
            width: 1280,
            height: 720,
        }
    }
}

impl Settings {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        Ok(settings)
    }
}
