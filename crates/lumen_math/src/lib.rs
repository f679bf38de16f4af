//! Lumen math - vector algebra, rays and bounding volumes.
//!
//! Everything is double precision: `Vec3` is `glam::DVec3` and is used
//! interchangeably as a point, a direction and an RGB color.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
pub mod sampling;
mod vec;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vec::{MathError, Vec3Ext};

/// Three-component double precision vector.
pub type Vec3 = glam::DVec3;

/// RGB color, expected in [0, 1] before gamma correction.
pub type Color = glam::DVec3;
