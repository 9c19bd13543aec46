//! Drawing surfaces.
//!
//! The frame loop draws through the [`DrawSurface`] trait using three
//! primitives: fade the whole surface, plot a point, stroke a polyline.
//! [`Canvas`] rasterizes them into an RGBA8 pixel buffer that the window
//! presents; [`CommandBuffer`] just records them, which makes frames easy to
//! inspect in tests.

use glam::Vec2;

use crate::color::Color;

/// Side length in pixels of the square drawn for a particle.
pub const POINT_SIZE: u32 = 2;

/// Something the frame loop can draw on.
pub trait DrawSurface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Blend the whole surface towards `color` by `opacity` in `[0, 1]`.
    fn fade(&mut self, color: Color, opacity: f32);

    /// Fill a [`POINT_SIZE`] square with its top-left corner at `at`.
    fn point(&mut self, at: Vec2, color: Color);

    /// Stroke connected segments through `points`, in order.
    fn polyline(&mut self, points: &[Vec2], color: Color);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fade { color: Color, opacity: f32 },
    Point { at: Vec2, color: Color },
    Polyline { points: Vec<Vec2>, color: Color },
}

/// A [`DrawSurface`] that stores the calls made against it.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for CommandBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fade(&mut self, color: Color, opacity: f32) {
        self.commands.push(DrawCommand::Fade { color, opacity });
    }

    fn point(&mut self, at: Vec2, color: Color) {
        self.commands.push(DrawCommand::Point { at, color });
    }

    fn polyline(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
        });
    }
}

/// Software RGBA8 raster, row-major with the origin at the top left.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    /// Change the size. Contents are discarded and refilled with `background`.
    pub fn resize(&mut self, width: u32, height: u32, background: Color) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, background);
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA bytes, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Color at `(x, y)`, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[(y * self.width + x) as usize])
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = color;
    }

    // Bresenham between two integer endpoints already clipped near the canvas.
    fn line(&mut self, from: (i64, i64), to: (i64, i64), color: Color) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Clip a segment to a one-pixel margin around the canvas (Liang-Barsky).
    fn clip(&self, a: Vec2, b: Vec2) -> Option<(Vec2, Vec2)> {
        let min = Vec2::splat(-1.0);
        let max = Vec2::new(self.width as f32 + 1.0, self.height as f32 + 1.0);
        let d = b - a;
        let mut t0 = 0.0f32;
        let mut t1 = 1.0f32;

        for (p, q) in [
            (-d.x, a.x - min.x),
            (d.x, max.x - a.x),
            (-d.y, a.y - min.y),
            (d.y, max.y - a.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some((a + d * t0, a + d * t1))
    }
}

impl DrawSurface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fade(&mut self, color: Color, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        for pixel in &mut self.pixels {
            *pixel = pixel.blend(color, opacity);
        }
    }

    fn point(&mut self, at: Vec2, color: Color) {
        let margin = -(POINT_SIZE as f32);
        if !at.is_finite()
            || at.x < margin
            || at.y < margin
            || at.x >= self.width as f32
            || at.y >= self.height as f32
        {
            return;
        }
        let x0 = at.x.floor() as i64;
        let y0 = at.y.floor() as i64;
        for y in y0..y0 + POINT_SIZE as i64 {
            for x in x0..x0 + POINT_SIZE as i64 {
                self.put(x, y, color);
            }
        }
    }

    fn polyline(&mut self, points: &[Vec2], color: Color) {
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if !a.is_finite() || !b.is_finite() {
                continue;
            }
            if let Some((a, b)) = self.clip(a, b) {
                let from = (a.x.floor() as i64, a.y.floor() as i64);
                let to = (b.x.floor() as i64, b.y.floor() as i64);
                self.line(from, to, color);
            }
        }
    }
}
