//! Random sampling helpers.
//!
//! Every helper draws from an explicit random source so that each worker
//! owns its stream and concurrent renders stay reproducible per stream.

use crate::Vec3;
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Uniform sample in [0, 1).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform sample in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Uniform point inside the unit disk in the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Point uniformly distributed on the unit sphere.
///
/// Added to a surface normal this gives the usual approximation of a
/// cosine-weighted diffuse bounce.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let a = 2.0 * PI * random_f64(rng);
    let z = random_range(rng, -1.0, 1.0);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * a.cos(), r * a.sin(), z)
}

/// Vector with independent components uniform in [min, max).
pub fn random_vec(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}
