//! Sphere primitives for ray tracing.

use crate::geometry::{Geometry, SurfaceHit};
use lumen_math::{Aabb, Interval, Ray, Vec3, Vec3Ext};
use rand::RngCore;
use std::f64::consts::PI;

/// A sphere primitive.
///
/// A negative radius keeps the same surface but turns the normal inward,
/// which is how hollow glass shells are modeled.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Get the UV coordinates for a point on the unit sphere centered at origin.
///
/// u follows the azimuth around Y, v the elevation from -Y to +Y.
fn sphere_uv(p: Vec3) -> (f64, f64) {
    let phi = p.z.atan2(p.x);
    let theta = p.y.clamp(-1.0, 1.0).asin();
    let u = 1.0 - (phi + PI) / (2.0 * PI);
    let v = (theta + PI / 2.0) / PI;
    (u, v)
}

/// Ray-sphere intersection shared by the static and moving spheres.
fn hit_sphere(center: Vec3, radius: f64, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
    let oc = ray.origin() - center;
    let a = ray.direction().length_squared();
    let b = oc.dot(ray.direction());
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - a * c;
    if discriminant <= 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Nearest root first, then the far one
    let mut root = (-b - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (-b + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let p = ray.at(root);
    // Dividing by the signed radius, not normalizing, keeps the
    // negative-radius convention intact.
    let normal = (p - center).div_scalar(radius);
    let (u, v) = sphere_uv((p - center).div_scalar(radius.abs()));

    Some(SurfaceHit {
        t: root,
        p,
        normal,
        u,
        v,
    })
}

impl Geometry for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        hit_sphere(self.center, self.radius, ray, ray_t)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        let rvec = Vec3::splat(self.radius.abs());
        Some(Aabb::from_points(self.center - rvec, self.center + rvec))
    }
}

/// A sphere whose center moves linearly between two keyframes.
#[derive(Debug, Clone)]
pub struct MovingSphere {
    center0: Vec3,
    center1: Vec3,
    time0: f64,
    time1: f64,
    radius: f64,
}

impl MovingSphere {
    /// Sphere at `center0` at `time0` and at `center1` at `time1`.
    pub fn new(center0: Vec3, center1: Vec3, time0: f64, time1: f64, radius: f64) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
        }
    }

    /// Center at `time`, clamped to the keyframe interval.
    pub fn center(&self, time: f64) -> Vec3 {
        let span = self.time1 - self.time0;
        let elapsed = if span == 0.0 {
            0.0
        } else {
            ((time - self.time0) / span).clamp(0.0, 1.0)
        };
        self.center0 + elapsed * (self.center1 - self.center0)
    }
}

impl Geometry for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        hit_sphere(self.center(ray.time()), self.radius, ray, ray_t)
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        let rvec = Vec3::splat(self.radius.abs());
        let c0 = self.center(time0);
        let c1 = self.center(time1);
        let box0 = Aabb::from_points(c0 - rvec, c0 + rvec);
        let box1 = Aabb::from_points(c1 - rvec, c1 + rvec);
        Some(Aabb::surrounding(&box0, &box1))
    }
}
