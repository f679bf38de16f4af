//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling
//! - One scanline per parallel task

use crate::scanline::render_scanline;
use crate::{Color, Hittable, RenderConfig, RenderResult, Scene};
use lumen_math::{Interval, Ray, Vec3Ext};
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Hits closer than this are treated as self-intersections.
const T_MIN: f64 = 0.001;

/// Radiance for rays that escape the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Background {
    Solid(Color),
    /// Blend from `bottom` (looking straight down) to `top` (straight up)
    Gradient { bottom: Color, top: Color },
}

impl Background {
    pub fn color(&self, ray: &Ray) -> Color {
        match *self {
            Background::Solid(color) => color,
            Background::Gradient { bottom, top } => {
                let unit_direction = ray.direction().unit();
                let a = 0.5 * (unit_direction.y + 1.0);
                bottom * (1.0 - a) + top * a
            }
        }
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and accumulating color.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    background: &Background,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY), rng) else {
        return background.color(ray);
    };

    // Get emission from material (for lights)
    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, background, depth - 1, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Apply gamma correction (gamma = 2.0) and quantize to 8 bits.
///
/// NaN maps to 0; values clamp to `[0, 0.999]` before scaling by 256.
#[inline]
pub fn to_byte(linear: f64) -> u8 {
    let gamma = linear.sqrt();
    let clamped = if gamma.is_nan() { 0.0 } else { gamma.clamp(0.0, 0.999) };
    (256.0 * clamped) as u8
}

/// Convert a linear color to gamma-corrected RGB bytes.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Linear radiance per pixel, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y), y = 0 being the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Pixels of row `y`, y = 0 being the top row.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Convert to gamma-corrected RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb8(*color))
            .collect()
    }

    /// Convert to an `image` buffer for encoding.
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb8(self.get(x, y)))
        })
    }
}

/// Render the entire scene to an image buffer.
///
/// Scanlines are distributed over a thread pool of `config.threads`
/// workers, each writing only its own row of the buffer.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.unwrap_or(0))
        .thread_name(|i| format!("lumen-render-{i}"))
        .build()?;
    log::debug!("Render pool ready with {} threads", pool.current_num_threads());

    log::info!(
        "Rendering {}x{} at {} spp, max depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(config.width, config.height);
    let height = config.height;
    pool.install(|| {
        image
            .pixels
            .par_chunks_mut(config.width as usize)
            .enumerate()
            .for_each(|(r, row)| {
                // Buffer rows run top-down, scanlines bottom-up
                let j = height - 1 - r as u32;
                render_scanline(scene, config, j, row);
            });
    });

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}
