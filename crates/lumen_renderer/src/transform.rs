//! Wrapper shapes that reorient or move another shape.
//!
//! Each wrapper shares the inner shape through an `Arc`, so one prototype can
//! be placed many times.

use crate::geometry::{Geometry, SurfaceHit};
use lumen_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Reverses the normal reported by the inner shape.
pub struct FlipFace {
    inner: Arc<dyn Geometry>,
}

impl FlipFace {
    pub fn new(inner: Arc<dyn Geometry>) -> Self {
        Self { inner }
    }
}

impl Geometry for FlipFace {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        self.inner.hit(ray, ray_t, rng).map(|hit| SurfaceHit {
            normal: -hit.normal,
            ..hit
        })
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        self.inner.bounding_box(time0, time1)
    }
}

/// Moves the inner shape by a fixed offset.
pub struct Translate {
    inner: Arc<dyn Geometry>,
    offset: Vec3,
}

impl Translate {
    pub fn new(inner: Arc<dyn Geometry>, offset: Vec3) -> Self {
        Self { inner, offset }
    }
}

impl Geometry for Translate {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        // Move the ray into object space instead of moving the object
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());
        self.inner.hit(&moved, ray_t, rng).map(|hit| SurfaceHit {
            p: hit.p + self.offset,
            ..hit
        })
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        self.inner
            .bounding_box(time0, time1)
            .map(|bbox| bbox.translate(self.offset))
    }
}

/// Rotates the inner shape about the Y axis.
pub struct RotateY {
    inner: Arc<dyn Geometry>,
    sin_theta: f64,
    cos_theta: f64,
}

impl RotateY {
    /// Rotate `inner` by `degrees` counter-clockwise looking down -Y.
    pub fn new(inner: Arc<dyn Geometry>, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self {
            inner,
            sin_theta: radians.sin(),
            cos_theta: radians.cos(),
        }
    }

    /// Object space to world space.
    #[inline]
    fn to_world(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * p.x + self.sin_theta * p.z,
            p.y,
            -self.sin_theta * p.x + self.cos_theta * p.z,
        )
    }

    /// World space to object space.
    #[inline]
    fn to_object(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * p.x - self.sin_theta * p.z,
            p.y,
            self.sin_theta * p.x + self.cos_theta * p.z,
        )
    }
}

impl Geometry for RotateY {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        let rotated = Ray::new(
            self.to_object(ray.origin()),
            self.to_object(ray.direction()),
            ray.time(),
        );

        self.inner.hit(&rotated, ray_t, rng).map(|hit| SurfaceHit {
            p: self.to_world(hit.p),
            normal: self.to_world(hit.normal),
            ..hit
        })
    }

    /// Envelope of the rotated corners of the inner box over the same interval.
    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        let bbox = self.inner.bounding_box(time0, time1)?;
        let corners = bbox.corners().map(|c| self.to_world(c));
        Aabb::enclosing(&corners)
    }
}
