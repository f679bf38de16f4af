//! Axis-aligned rectangles and boxes.
//!
//! Rectangle normals always point along the positive fixed axis. Surfaces
//! that must face the other way are wrapped in [`FlipFace`].

use crate::geometry::{Geometry, GeometryList, SurfaceHit};
use crate::transform::FlipFace;
use lumen_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Thickness given to a rectangle's bounding box along its fixed axis.
const RECT_THICKNESS: f64 = 1e-4;

/// Extent of a rectangle in its two free axes.
#[derive(Debug, Clone, Copy)]
struct RectExtent {
    a0: f64,
    a1: f64,
    b0: f64,
    b1: f64,
    k: f64,
}

/// Intersect a rectangle lying in the plane `p[fixed] = k`.
///
/// `a` and `b` are the free axes, in (u, v) order.
fn hit_rect(
    ray: &Ray,
    ray_t: Interval,
    extent: &RectExtent,
    (fixed, a, b): (usize, usize, usize),
) -> Option<SurfaceHit> {
    let origin = ray.origin();
    let dir = ray.direction();

    let t = (extent.k - origin[fixed]) / dir[fixed];
    if !ray_t.surrounds(t) {
        return None;
    }

    let pa = origin[a] + t * dir[a];
    let pb = origin[b] + t * dir[b];
    if pa < extent.a0 || pa > extent.a1 || pb < extent.b0 || pb > extent.b1 {
        return None;
    }

    let mut normal = Vec3::ZERO;
    normal[fixed] = 1.0;

    Some(SurfaceHit {
        t,
        p: ray.at(t),
        normal,
        u: (pa - extent.a0) / (extent.a1 - extent.a0),
        v: (pb - extent.b0) / (extent.b1 - extent.b0),
    })
}

fn rect_bounds(extent: &RectExtent, (fixed, a, b): (usize, usize, usize)) -> Aabb {
    let mut min = Vec3::ZERO;
    let mut max = Vec3::ZERO;
    min[a] = extent.a0;
    max[a] = extent.a1;
    min[b] = extent.b0;
    max[b] = extent.b1;
    min[fixed] = extent.k;
    max[fixed] = extent.k;
    Aabb::new(min, max).pad(RECT_THICKNESS)
}

/// Rectangle in the plane z = k, facing +Z.
#[derive(Debug, Clone)]
pub struct XyRect {
    extent: RectExtent,
}

impl XyRect {
    const AXES: (usize, usize, usize) = (2, 0, 1);

    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64, k: f64) -> Self {
        Self {
            extent: RectExtent {
                a0: x0,
                a1: x1,
                b0: y0,
                b1: y1,
                k,
            },
        }
    }
}

impl Geometry for XyRect {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        hit_rect(ray, ray_t, &self.extent, Self::AXES)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(rect_bounds(&self.extent, Self::AXES))
    }
}

/// Rectangle in the plane y = k, facing +Y.
#[derive(Debug, Clone)]
pub struct XzRect {
    extent: RectExtent,
}

impl XzRect {
    const AXES: (usize, usize, usize) = (1, 0, 2);

    pub fn new(x0: f64, x1: f64, z0: f64, z1: f64, k: f64) -> Self {
        Self {
            extent: RectExtent {
                a0: x0,
                a1: x1,
                b0: z0,
                b1: z1,
                k,
            },
        }
    }
}

impl Geometry for XzRect {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        hit_rect(ray, ray_t, &self.extent, Self::AXES)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(rect_bounds(&self.extent, Self::AXES))
    }
}

/// Rectangle in the plane x = k, facing +X.
#[derive(Debug, Clone)]
pub struct YzRect {
    extent: RectExtent,
}

impl YzRect {
    const AXES: (usize, usize, usize) = (0, 1, 2);

    pub fn new(y0: f64, y1: f64, z0: f64, z1: f64, k: f64) -> Self {
        Self {
            extent: RectExtent {
                a0: y0,
                a1: y1,
                b0: z0,
                b1: z1,
                k,
            },
        }
    }
}

impl Geometry for YzRect {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        hit_rect(ray, ray_t, &self.extent, Self::AXES)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(rect_bounds(&self.extent, Self::AXES))
    }
}

/// Axis-aligned box built from six rectangles with outward normals.
pub struct Cuboid {
    min: Vec3,
    max: Vec3,
    sides: GeometryList,
}

impl Cuboid {
    /// Box spanning the two opposite corners `p0` and `p1`.
    pub fn new(p0: Vec3, p1: Vec3) -> Self {
        let min = p0.min(p1);
        let max = p0.max(p1);

        let mut sides = GeometryList::new();
        sides.add(XyRect::new(min.x, max.x, min.y, max.y, max.z));
        sides.add(FlipFace::new(Arc::new(XyRect::new(min.x, max.x, min.y, max.y, min.z))));
        sides.add(XzRect::new(min.x, max.x, min.z, max.z, max.y));
        sides.add(FlipFace::new(Arc::new(XzRect::new(min.x, max.x, min.z, max.z, min.y))));
        sides.add(YzRect::new(min.y, max.y, min.z, max.z, max.x));
        sides.add(FlipFace::new(Arc::new(YzRect::new(min.y, max.y, min.z, max.z, min.x))));

        Self { min, max, sides }
    }
}

impl Geometry for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        self.sides.hit(ray, ray_t, rng)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(Aabb::new(self.min, self.max))
    }
}
