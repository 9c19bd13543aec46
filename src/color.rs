//! Colors and per-particle color schemes.
//!
//! Every particle carries a hue that advances a little each frame. A
//! [`ColorScheme`] turns that hue into the color actually drawn.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::particle::Particle;

/// An 8-bit RGBA color, laid out for direct upload as `Rgba8Unorm` texels.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque gray with all channels set to `value`.
    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Parse a `#RRGGBB` hex string.
    pub fn from_hex(hex: &str) -> Result<Self, ConfigurationError> {
        let invalid = || ConfigurationError::InvalidColor(hex.to_string());
        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb` form, alpha omitted.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Move each channel `amount` of the way towards `target`.
    pub fn blend(self, target: Color, amount: f32) -> Color {
        let mix = |from: u8, to: u8| {
            let value = from as f32 + (to as f32 - from as f32) * amount;
            value.round().clamp(0.0, 255.0) as u8
        };
        Color {
            r: mix(self.r, target.r),
            g: mix(self.g, target.g),
            b: mix(self.b, target.b),
            a: mix(self.a, target.a),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Convert HSL to an opaque [`Color`].
///
/// `hue` is in degrees and wraps; `saturation` and `lightness` are
/// percentages in `[0, 100]`.
pub fn hsl_to_color(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let channel = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::rgb(channel(r), channel(g), channel(b))
}

/// How a particle's hue becomes a drawn color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ColorScheme {
    /// Full saturation across the whole hue wheel.
    #[default]
    Rainbow,
    /// Reds through yellows.
    Fire,
    /// Cyans through blues.
    Cool,
    /// Alternating magenta and cyan bands.
    Neon,
    /// Desaturated, light hues.
    Pastel,
    /// Hue mapped linearly onto luminance.
    Grayscale,
    /// Alternating hot pink and electric blue bands.
    Cyberpunk,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 7] = [
        ColorScheme::Rainbow,
        ColorScheme::Fire,
        ColorScheme::Cool,
        ColorScheme::Neon,
        ColorScheme::Pastel,
        ColorScheme::Grayscale,
        ColorScheme::Cyberpunk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Fire => "fire",
            ColorScheme::Cool => "cool",
            ColorScheme::Neon => "neon",
            ColorScheme::Pastel => "pastel",
            ColorScheme::Grayscale => "grayscale",
            ColorScheme::Cyberpunk => "cyberpunk",
        }
    }

    /// Resolve a scheme by name. Anything unrecognized is [`ColorScheme::Rainbow`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    /// The scheme after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Map a hue in `[0, 360)` to this scheme's color.
    pub fn color(&self, hue: f32) -> Color {
        let h = hue;
        match self {
            ColorScheme::Rainbow => hsl_to_color(h, 100.0, 50.0),
            ColorScheme::Fire => hsl_to_color(h % 60.0, 100.0, 50.0),
            ColorScheme::Cool => hsl_to_color(180.0 + h % 60.0, 80.0, 60.0),
            ColorScheme::Neon => {
                if band(h, 60.0) == 0 {
                    hsl_to_color(300.0, 100.0, 50.0)
                } else {
                    hsl_to_color(180.0, 100.0, 50.0)
                }
            }
            ColorScheme::Pastel => hsl_to_color(h, 50.0, 85.0),
            ColorScheme::Grayscale => {
                Color::gray((h / 360.0 * 255.0).round().clamp(0.0, 255.0) as u8)
            }
            ColorScheme::Cyberpunk => {
                if band(h, 90.0) == 0 {
                    hsl_to_color(320.0, 100.0, 55.0)
                } else {
                    hsl_to_color(195.0, 100.0, 50.0)
                }
            }
        }
    }
}

// Parity of the hue band of width `width`.
fn band(hue: f32, width: f32) -> u32 {
    ((hue / width).floor() as u32) % 2
}

impl From<&str> for ColorScheme {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for ColorScheme {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Advance `hue` by `increment * speed`, wrapped into `[0, 360)`.
pub fn advance_hue(hue: f32, increment: f32, speed: f64) -> f32 {
    let next = (hue + increment * speed as f32).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if next >= 360.0 {
        0.0
    } else {
        next
    }
}

/// Advance the particle's hue and return its color under `scheme`.
pub fn color_for(particle: &mut Particle, scheme: ColorScheme, speed: f64) -> Color {
    particle.hue = advance_hue(particle.hue, particle.hue_increment, speed);
    scheme.color(particle.hue)
}
