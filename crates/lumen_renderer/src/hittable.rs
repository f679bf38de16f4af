//! Hittable trait and HitRecord for ray-scene intersection.

use crate::geometry::Geometry;
use crate::Material;
use lumen_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Record of a ray-actor intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Outward surface normal at intersection
    pub normal: Vec3,
    /// Material of the actor that was hit, shared with every other hit on it
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f64,
    pub v: f64,
    /// Parameter t where the intersection occurs
    pub t: f64,
}

/// Trait for scene objects that report material-bearing hits.
pub trait Hittable: Send + Sync {
    /// Nearest hit with `ray_t.min < t < ray_t.max`, if any.
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>>;

    /// Box enclosing the object over `[time0, time1]`, `None` if unbounded.
    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb>;
}

/// A shape placed in the scene with its material.
///
/// Both halves are shared: the same sphere or the same glass can back any
/// number of actors.
#[derive(Clone)]
pub struct Actor {
    geometry: Arc<dyn Geometry>,
    material: Arc<dyn Material>,
}

impl Actor {
    pub fn new(geometry: Arc<dyn Geometry>, material: Arc<dyn Material>) -> Self {
        Self { geometry, material }
    }
}

impl Hittable for Actor {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let hit = self.geometry.hit(ray, ray_t, rng)?;
        Some(HitRecord {
            p: hit.p,
            normal: hit.normal,
            material: self.material.as_ref(),
            u: hit.u,
            v: hit.v,
            t: hit.t,
        })
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        self.geometry.bounding_box(time0, time1)
    }
}

/// A list of hittable objects searched linearly.
///
/// This is the brute-force reference for the BVH, and the place for
/// unbounded objects, which a BVH refuses.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Hittable + 'static) {
        self.objects.push(Box::new(object));
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Actor> for HittableList {
    fn from_iter<I: IntoIterator<Item = Actor>>(iter: I) -> Self {
        let mut list = HittableList::new();
        for actor in iter {
            list.add(actor);
        }
        list
    }
}

impl Hittable for HittableList {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for object in &self.objects {
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max), rng) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        let (first, rest) = self.objects.split_first()?;
        rest.iter()
            .try_fold(first.bounding_box(time0, time1)?, |acc, object| {
                Some(Aabb::surrounding(&acc, &object.bounding_box(time0, time1)?))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Metal, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Plane;

    impl Geometry for Plane {
        fn hit(
            &self,
            _ray: &Ray,
            _ray_t: Interval,
            _rng: &mut dyn RngCore,
        ) -> Option<crate::SurfaceHit> {
            None
        }

        fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
            None
        }
    }

    fn sphere_actor(center: Vec3, radius: f64, material: Arc<dyn Material>) -> Actor {
        Actor::new(Arc::new(Sphere::new(center, radius)), material)
    }

    #[test]
    fn test_actor_attaches_material() {
        let metal: Arc<dyn Material> = Arc::new(Metal::new(Vec3::splat(0.8), 0.0));
        let actor = sphere_actor(Vec3::new(0.0, 0.0, -2.0), 1.0, metal.clone());
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let mut rng = StdRng::seed_from_u64(0);

        let rec = actor
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .unwrap();
        assert!((rec.t - 1.0).abs() < 1e-9);
        assert!(std::ptr::addr_eq(rec.material, metal.as_ref()));
    }

    #[test]
    fn test_list_nearest_hit_wins() {
        let near: Arc<dyn Material> = Arc::new(Lambertian::from_color(Vec3::new(1.0, 0.0, 0.0)));
        let far: Arc<dyn Material> = Arc::new(Lambertian::from_color(Vec3::new(0.0, 1.0, 0.0)));

        let mut list = HittableList::new();
        list.add(sphere_actor(Vec3::new(0.0, 0.0, -10.0), 1.0, far));
        list.add(sphere_actor(Vec3::new(0.0, 0.0, -3.0), 1.0, near.clone()));

        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let mut rng = StdRng::seed_from_u64(0);
        let rec = list
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .unwrap();
        assert!((rec.t - 2.0).abs() < 1e-9);
        assert!(std::ptr::addr_eq(rec.material, near.as_ref()));
    }

    #[test]
    fn test_list_bounds() {
        let gray: Arc<dyn Material> = Arc::new(Lambertian::from_color(Vec3::splat(0.5)));
        let mut list = HittableList::new();
        assert!(list.bounding_box(0.0, 1.0).is_none());

        list.add(sphere_actor(Vec3::ZERO, 1.0, gray.clone()));
        list.add(sphere_actor(Vec3::new(0.0, 5.0, 0.0), 1.0, gray.clone()));
        let bbox = list.bounding_box(0.0, 1.0).unwrap();
        assert_eq!(bbox.max.y, 6.0);

        // One unbounded member makes the whole list unbounded
        list.add(Actor::new(Arc::new(Plane), gray));
        assert!(list.bounding_box(0.0, 1.0).is_none());
        assert_eq!(list.len(), 3);
    }
}
