//! Projection of field state onto the drawing surface.
//!
//! 3D fields are viewed through a [`ViewTransform`]: a rotation about the Y
//! axis, then about the X axis, then a uniform zoom. The order is fixed so that
//! the same angles always produce the same picture.

use glam::{DVec3, Vec2};

use crate::field::Dimension;

/// Smallest accepted zoom.
pub const MIN_SCALE: f64 = 1.0;
/// Largest accepted zoom.
pub const MAX_SCALE: f64 = 100.0;
/// Radians of rotation per pixel of pointer drag.
pub const DRAG_RADIANS_PER_PIXEL: f64 = 0.01;

/// Camera-like rotation and zoom applied before projecting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Accumulated rotation about the X axis in radians. Unbounded.
    pub rotation_x: f64,
    /// Accumulated rotation about the Y axis in radians. Unbounded.
    pub rotation_y: f64,
    scale: f64,
}

impl ViewTransform {
    /// Unrotated view at the given zoom (clamped).
    pub fn new(scale: f64) -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            scale: clamp_scale(scale),
        }
    }

    /// Current zoom, always within `[MIN_SCALE, MAX_SCALE]`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the zoom, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    /// Multiply the zoom by `factor`, clamped.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Apply a pointer drag of `(dx, dy)` pixels.
    ///
    /// Horizontal motion turns the view about Y, vertical motion about X.
    pub fn rotate_by(&mut self, dx: f64, dy: f64) {
        self.rotation_x += dy * DRAG_RADIANS_PER_PIXEL;
        self.rotation_y += dx * DRAG_RADIANS_PER_PIXEL;
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(10.0)
    }
}

fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        MIN_SCALE
    } else {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    }
}

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center of the surface in pixels.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// Map a particle position to surface coordinates.
///
/// Pure: depends only on its arguments. Non-finite positions produce
/// non-finite points, which callers skip.
pub fn project(position: DVec3, dimension: Dimension, view: &ViewTransform, viewport: Viewport) -> Vec2 {
    let (cx, cy) = viewport.center();
    match dimension {
        Dimension::Spatial => {
            let (sin_x, cos_x) = view.rotation_x.sin_cos();
            let (sin_y, cos_y) = view.rotation_y.sin_cos();
            let DVec3 { x, y, z } = position;

            // About Y using (x, z), then about X using (y, rotated z).
            let xr = x * cos_y - z * sin_y;
            let zr = z * cos_y + x * sin_y;
            let yr = y * cos_x - zr * sin_x;

            Vec2::new((xr * view.scale + cx) as f32, (yr * view.scale + cy) as f32)
        }
        Dimension::Planar => {
            let s = viewport.width.min(viewport.height) as f64 / 4.0 * view.scale;
            Vec2::new((position.x * s + cx) as f32, (position.y * s + cy) as f32)
        }
    }
}
