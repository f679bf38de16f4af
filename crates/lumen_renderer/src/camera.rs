//! Thin-lens camera for ray generation.

use lumen_math::sampling::{random_f64, random_in_unit_disk};
use lumen_math::{Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// Screen coordinates `(s, t)` span `[0, 1]²` with `t = 0` at the bottom
/// edge of the image.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f64,       // Vertical field of view in degrees
    aspect: f64,     // Viewport width over height
    aperture: f64,   // Lens diameter, 0 = pinhole
    focus_dist: f64, // Distance from camera to plane of perfect focus

    // Shutter interval
    time0: f64,
    time1: f64,

    // Derived by `update`
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Create a pinhole camera at the origin looking down -Z with a 90° field
    /// of view and a 2:1 aspect ratio.
    pub fn new() -> Self {
        let mut camera = Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect: 2.0,
            aperture: 0.0,
            focus_dist: 1.0,
            time0: 0.0,
            time1: 0.0,
            lower_left: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        };
        camera.update();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.update();
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self.update();
        self
    }

    pub fn with_aspect_ratio(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self.update();
        self
    }

    /// Set the shutter interval; ray times are uniform over `[time0, time1]`.
    pub fn with_shutter(mut self, time0: f64, time1: f64) -> Self {
        self.time0 = time0;
        self.time1 = time1;
        self
    }

    pub fn shutter(&self) -> (f64, f64) {
        (self.time0, self.time1)
    }

    /// Recompute the viewport from the current settings.
    ///
    /// Panics if `look_from == look_at` or `vup` is parallel to the view
    /// direction.
    fn update(&mut self) {
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect * half_height;

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).unit();
        self.u = self.vup.cross(self.w).unit();
        self.v = self.w.cross(self.u);

        self.lower_left = self.look_from
            - half_width * self.focus_dist * self.u
            - half_height * self.focus_dist * self.v
            - self.focus_dist * self.w;
        self.horizontal = 2.0 * half_width * self.focus_dist * self.u;
        self.vertical = 2.0 * half_height * self.focus_dist * self.v;
        self.lens_radius = self.aperture / 2.0;
    }

    /// Generate a ray through screen position `(s, t)`.
    pub fn ray_to(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let origin = self.look_from + offset;
        let direction = self.lower_left + s * self.horizontal + t * self.vertical - origin;
        let time = self.time0 + random_f64(rng) * (self.time1 - self.time0);

        Ray::new(origin, direction, time)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
