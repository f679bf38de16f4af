//! Textures: spatially varying colors sampled by materials.

use crate::error::{RenderError, RenderResult};
use crate::perlin::Perlin;
use lumen_math::{Color, Vec3};
use std::sync::Arc;

/// Trait for anything that yields a color at a surface point.
pub trait Texture: Send + Sync {
    /// Color at texture coordinates (u, v) and world position `p`.
    fn value(&self, u: f64, v: f64, p: Vec3) -> Color;
}

/// A single uniform color.
#[derive(Debug, Clone)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Vec3) -> Color {
        self.color
    }
}

/// 3D checkerboard alternating between two sub-textures.
///
/// Defined on world position, so it does not depend on how the surface is
/// parameterized.
pub struct CheckerTexture {
    odd: Arc<dyn Texture>,
    even: Arc<dyn Texture>,
    frequency: f64,
}

impl CheckerTexture {
    pub fn new(odd: Arc<dyn Texture>, even: Arc<dyn Texture>, frequency: f64) -> Self {
        Self {
            odd,
            even,
            frequency,
        }
    }

    /// Checker between two solid colors.
    pub fn from_colors(odd: Color, even: Color, frequency: f64) -> Self {
        Self::new(
            Arc::new(SolidColor::new(odd)),
            Arc::new(SolidColor::new(even)),
            frequency,
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Vec3) -> Color {
        let f = self.frequency;
        let sines = (f * p.x).sin() * (f * p.y).sin() * (f * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Gray-scale coherent noise.
pub struct NoiseTexture {
    noise: Perlin,
    frequency: f64,
}

impl NoiseTexture {
    pub fn new(noise: Perlin, frequency: f64) -> Self {
        Self { noise, frequency }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f64, _v: f64, p: Vec3) -> Color {
        let sample = self.noise.noise(self.frequency * p);
        Color::ONE * 0.5 * (1.0 + sample)
    }
}

/// Marble-like veins: a sine along Y phase-shifted by turbulence.
pub struct MarbleTexture {
    noise: Perlin,
    /// Number of turbulence octaves
    depth: u32,
    /// Phase shift applied per unit of turbulence
    turbulence: f64,
    scale: f64,
}

impl MarbleTexture {
    pub fn new(noise: Perlin, depth: u32, turbulence: f64, scale: f64) -> Self {
        Self {
            noise,
            depth,
            turbulence,
            scale,
        }
    }
}

impl Texture for MarbleTexture {
    fn value(&self, _u: f64, _v: f64, p: Vec3) -> Color {
        let turb = self.noise.turbulence(self.scale * p, self.depth);
        Color::ONE * 0.5 * (1.0 + (self.scale * p.y + self.turbulence * turb).sin())
    }
}

/// Texture backed by a decoded RGB bitmap.
///
/// Rows are stored top to bottom, so v = 1 maps to row 0.
#[derive(Clone)]
pub struct ImageTexture {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
    /// Horizontal wraparound offset as a fraction of the width
    x_offset: f64,
    /// Vertical wraparound offset as a fraction of the height
    y_offset: f64,
}

impl ImageTexture {
    /// Create a texture from row-major RGB8 pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidTexture(format!(
                "image must be non-empty, got {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(RenderError::InvalidTexture(format!(
                "expected {} pixels for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
            x_offset: 0.0,
            y_offset: 0.0,
        })
    }

    /// Create a texture from an already decoded image.
    pub fn from_rgb_image(image: &image::RgbImage) -> RenderResult<Self> {
        let pixels = image.pixels().map(|p| p.0).collect();
        Self::new(image.width(), image.height(), pixels)
    }

    /// Shift the lookup with wraparound, offsets given as fractions of the
    /// image size (0.25 rotates a quarter turn around a sphere).
    pub fn with_offset(mut self, x_offset: f64, y_offset: f64) -> Self {
        self.x_offset = x_offset.rem_euclid(1.0);
        self.y_offset = y_offset.rem_euclid(1.0);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Vec3) -> Color {
        let u = u.clamp(0.0, 1.0);
        // Flip V to image row order
        let v = 1.0 - v.clamp(0.0, 1.0);

        let (w, h) = (self.width as usize, self.height as usize);
        let x = (u * (w - 1) as f64) as usize;
        let y = (v * (h - 1) as f64) as usize;
        let x = (x + (self.x_offset * w as f64) as usize) % w;
        let y = (y + (self.y_offset * h as f64) as usize) % h;

        let [r, g, b] = self.pixels[y * w + x];
        let scale = 1.0 / 255.0;
        Color::new(r as f64 * scale, g as f64 * scale, b as f64 * scale)
    }
}
