//! Scanline rendering.
//!
//! A scanline is the unit of parallel work. Its output depends only on the
//! scene, the configuration and its index, never on which worker ran it or
//! in what order.

use crate::renderer::ray_color;
use crate::{Color, RenderConfig, Scene};
use lumen_math::sampling::random_f64;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random stream for scanline `j`, derived from the base seed.
pub fn scanline_rng(seed: u64, j: u32) -> StdRng {
    let mixed = seed ^ (u64::from(j) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mixed)
}

/// Render scanline `j` (counted from the bottom of the image) into `row`.
///
/// `row` must hold exactly `config.width` pixels.
pub fn render_scanline(scene: &Scene, config: &RenderConfig, j: u32, row: &mut [Color]) {
    debug_assert_eq!(row.len(), config.width as usize);

    let mut rng = scanline_rng(config.seed, j);
    let width = config.width as f64;
    let height = config.height as f64;
    let samples = config.samples_per_pixel;

    for (i, pixel) in row.iter_mut().enumerate() {
        let mut pixel_color = Color::ZERO;

        for _ in 0..samples {
            let s = (i as f64 + random_f64(&mut rng)) / width;
            let t = (j as f64 + random_f64(&mut rng)) / height;
            let ray = scene.camera.ray_to(s, t, &mut rng);
            pixel_color += ray_color(
                &ray,
                scene.world.as_ref(),
                &scene.background,
                config.max_depth,
                &mut rng,
            );
        }

        // Average the samples
        *pixel = pixel_color / samples as f64;
    }
}
