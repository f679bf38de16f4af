//! Geometry trait and the geometric half of a hit.
//!
//! Shapes know nothing about materials; an [`Actor`](crate::Actor) pairs a
//! shape with its material when the hit is reported to the integrator.

use lumen_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Geometric information about a ray-shape intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal; outward by convention, never flipped toward
    /// the incoming ray
    pub normal: Vec3,
    /// UV texture coordinates
    pub u: f64,
    pub v: f64,
}

/// Trait for shapes that can be hit by rays.
pub trait Geometry: Send + Sync {
    /// Nearest intersection with `ray_t.min < t < ray_t.max`, if any.
    ///
    /// `rng` is only consumed by stochastic shapes such as [`Fog`](crate::Fog).
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<SurfaceHit>;

    /// Box enclosing the shape over `[time0, time1]`, or `None` when the
    /// shape has no finite extent.
    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb>;
}

impl<G: Geometry + ?Sized> Geometry for Arc<G> {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        (**self).hit(ray, ray_t, rng)
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        (**self).bounding_box(time0, time1)
    }
}

impl<G: Geometry + ?Sized> Geometry for Box<G> {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        (**self).hit(ray, ray_t, rng)
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        (**self).bounding_box(time0, time1)
    }
}

/// A group of shapes that behaves as a single shape.
#[derive(Default)]
pub struct GeometryList {
    shapes: Vec<Box<dyn Geometry>>,
}

impl GeometryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: impl Geometry + 'static) {
        self.shapes.push(Box::new(shape));
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Geometry for GeometryList {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        let mut closest: Option<SurfaceHit> = None;

        for shape in &self.shapes {
            let max = closest.map_or(ray_t.max, |h| h.t);
            if let Some(hit) = shape.hit(ray, ray_t.with_max(max), rng) {
                closest = Some(hit);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        let (first, rest) = self.shapes.split_first()?;
        rest.iter().try_fold(first.bounding_box(time0, time1)?, |acc, shape| {
            Some(Aabb::surrounding(&acc, &shape.bounding_box(time0, time1)?))
        })
    }
}
