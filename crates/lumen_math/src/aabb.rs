use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// Stored as its min and max corners; `min <= max` on every axis for any box
/// produced by a `bounding_box` query.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from its min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from two arbitrary corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Lower bound on an axis (0=X, 1=Y, 2=Z).
    #[inline]
    pub fn axis_min(&self, axis: usize) -> f64 {
        self.min[axis]
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method. A zero direction component gives an infinite inverse,
    /// which IEEE arithmetic resolves without special casing: the slab
    /// becomes (-inf, inf) when the origin lies between the planes and
    /// empty otherwise.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let inv = 1.0 / r.direction[axis];
            let mut t0 = (self.min[axis] - r.origin[axis]) * inv;
            let mut t1 = (self.max[axis] - r.origin[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > ray_t.min {
                ray_t.min = t0;
            }
            if t1 < ray_t.max {
                ray_t.max = t1;
            }
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Grow the box by `delta / 2` on every axis thinner than `delta`.
    pub fn pad(&self, delta: f64) -> Aabb {
        let mut out = *self;
        for axis in 0..3 {
            if out.max[axis] - out.min[axis] < delta {
                out.min[axis] -= delta / 2.0;
                out.max[axis] += delta / 2.0;
            }
        }
        out
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(self.min + offset, self.max + offset)
    }

    /// The eight corner points.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Smallest box holding every point of a non-empty set.
    pub fn enclosing(points: &[Vec3]) -> Option<Aabb> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Aabb::new(*first, *first), |acc, p| {
            Aabb::new(acc.min.min(*p), acc.max.max(*p))
        }))
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &Aabb) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }
}
