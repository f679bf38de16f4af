//! Constant-density participating medium.

use crate::geometry::{Geometry, SurfaceHit};
use lumen_math::{sampling::random_f64, Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Gap between the entry point and the search for the exit point.
const EXIT_EPSILON: f64 = 1e-4;

/// A volume of fog filling a closed boundary shape.
///
/// Rays passing through the boundary scatter at an exponentially
/// distributed depth, so the volume reads as density rather than a surface.
/// Pair it with an [`Isotropic`](crate::Isotropic) material.
pub struct Fog {
    boundary: Arc<dyn Geometry>,
    neg_inv_density: f64,
}

impl Fog {
    /// Fill `boundary` with a medium of the given density.
    ///
    /// The boundary must be convex: only its first entry and exit are used.
    /// Panics unless `density` is positive.
    pub fn new(boundary: Arc<dyn Geometry>, density: f64) -> Self {
        assert!(density > 0.0, "fog density must be positive, got {density}");
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
        }
    }
}

impl Geometry for Fog {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        let entry = self.boundary.hit(ray, Interval::UNIVERSE, rng)?;
        let exit = self.boundary.hit(
            ray,
            Interval::new(entry.t + EXIT_EPSILON, f64::INFINITY),
            rng,
        )?;

        let mut t_enter = entry.t.max(ray_t.min);
        let t_exit = exit.t.min(ray_t.max);
        if t_enter >= t_exit {
            return None;
        }
        t_enter = t_enter.max(0.0);

        let ray_length = ray.direction().length();
        let distance_inside = (t_exit - t_enter) * ray_length;
        // 1 - [0, 1) keeps the log argument away from zero
        let hit_distance = self.neg_inv_density * (1.0 - random_f64(rng)).ln();
        if hit_distance > distance_inside {
            return None;
        }

        let t = t_enter + hit_distance / ray_length;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(SurfaceHit {
            t,
            p: ray.at(t),
            // Isotropic scattering ignores the normal
            normal: Vec3::X,
            u: 0.0,
            v: 0.0,
        })
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        self.boundary.bounding_box(time0, time1)
    }
}
