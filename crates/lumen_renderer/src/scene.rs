//! A camera, the objects it sees and what lies beyond them.

use crate::bvh::Bvh;
use crate::camera::Camera;
use crate::error::RenderResult;
use crate::hittable::{Actor, Hittable};
use crate::renderer::Background;
use rand::RngCore;

/// Everything a render reads. Never mutated while rendering.
pub struct Scene {
    pub camera: Camera,
    pub world: Box<dyn Hittable>,
    pub background: Background,
}

impl Scene {
    /// Wrap an already assembled world.
    pub fn new(camera: Camera, world: impl Hittable + 'static, background: Background) -> Self {
        Self {
            camera,
            world: Box::new(world),
            background,
        }
    }

    /// Index `actors` in a BVH built over the camera's shutter interval.
    ///
    /// Fails if any actor is unbounded.
    pub fn with_index(
        camera: Camera,
        actors: Vec<Actor>,
        background: Background,
        rng: &mut dyn RngCore,
    ) -> RenderResult<Self> {
        let (time0, time1) = camera.shutter();
        let bvh = Bvh::new(actors, time0, time1, rng)?;
        Ok(Self::new(camera, bvh, background))
    }
}
