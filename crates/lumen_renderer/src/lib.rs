//! Lumen renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for physically-based rendering. Shapes are
//! paired with materials into actors, indexed in a BVH and rendered one
//! scanline per parallel task.

mod bvh;
mod camera;
mod config;
mod error;
mod fog;
mod geometry;
mod hittable;
mod material;
mod perlin;
mod rect;
mod renderer;
mod scanline;
mod scene;
mod sphere;
mod texture;
mod transform;

pub use bvh::{Bvh, BvhNode, Child};
pub use camera::Camera;
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use fog::Fog;
pub use geometry::{Geometry, GeometryList, SurfaceHit};
pub use hittable::{Actor, HitRecord, Hittable, HittableList};
pub use material::{
    Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult,
};
pub use perlin::Perlin;
pub use rect::{Cuboid, XyRect, XzRect, YzRect};
pub use renderer::{color_to_rgb8, ray_color, render, to_byte, Background, ImageBuffer};
pub use scanline::{render_scanline, scanline_rng};
pub use scene::Scene;
pub use sphere::{MovingSphere, Sphere};
pub use texture::{
    CheckerTexture, ImageTexture, MarbleTexture, NoiseTexture, SolidColor, Texture,
};
pub use transform::{FlipFace, RotateY, Translate};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Color, Interval, Ray, Vec3};
