//! Coherent 3D gradient noise.
//!
//! Improved Perlin noise: a permutation table hashes lattice points onto
//! twelve edge gradients, blended with a quintic fade curve. The table is
//! shuffled from a seed so different textures can decorrelate.

use lumen_math::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const PERM_SIZE: usize = 256;

/// Seeded gradient noise with values in roughly [-1, 1].
#[derive(Clone)]
pub struct Perlin {
    /// Permutation repeated twice so lookups never wrap
    perm: [u8; 2 * PERM_SIZE],
}

impl Perlin {
    pub fn new(seed: u64) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(&mut StdRng::seed_from_u64(seed));

        let mut perm = [0u8; 2 * PERM_SIZE];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i % PERM_SIZE];
        }
        Self { perm }
    }

    /// Noise value at `p`.
    pub fn noise(&self, p: Vec3) -> f64 {
        let floor = p.floor();
        let ix = (floor.x as i64 & 255) as usize;
        let iy = (floor.y as i64 & 255) as usize;
        let iz = (floor.z as i64 & 255) as usize;
        let d = p - floor;

        let w = Vec3::new(fade(d.x), fade(d.y), fade(d.z));

        // Trilinear blend of the eight corner contributions
        let x00 = lerp(w.x, self.grad(ix, iy, iz, d), self.grad(ix + 1, iy, iz, d - Vec3::X));
        let x10 = lerp(
            w.x,
            self.grad(ix, iy + 1, iz, d - Vec3::Y),
            self.grad(ix + 1, iy + 1, iz, d - Vec3::new(1.0, 1.0, 0.0)),
        );
        let x01 = lerp(
            w.x,
            self.grad(ix, iy, iz + 1, d - Vec3::Z),
            self.grad(ix + 1, iy, iz + 1, d - Vec3::new(1.0, 0.0, 1.0)),
        );
        let x11 = lerp(
            w.x,
            self.grad(ix, iy + 1, iz + 1, d - Vec3::new(0.0, 1.0, 1.0)),
            self.grad(ix + 1, iy + 1, iz + 1, d - Vec3::ONE),
        );

        let y0 = lerp(w.y, x00, x10);
        let y1 = lerp(w.y, x01, x11);
        lerp(w.z, y0, y1)
    }

    /// Sum of `depth` octaves of noise, each at double the frequency and half
    /// the weight of the previous one. Returns the absolute value.
    pub fn turbulence(&self, p: Vec3, depth: u32) -> f64 {
        let mut sum = 0.0;
        let mut point = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            sum += weight * self.noise(point);
            weight *= 0.5;
            point *= 2.0;
        }

        sum.abs()
    }

    /// Dot product of the hashed lattice gradient with the offset `d`.
    fn grad(&self, x: usize, y: usize, z: usize, d: Vec3) -> f64 {
        let perm = &self.perm;
        let h = perm[perm[perm[x] as usize + y] as usize + z] & 15;
        let u = if h < 8 || h == 12 || h == 13 { d.x } else { d.y };
        let v = if h < 4 || h == 12 || h == 13 { d.y } else { d.z };
        (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
    }
}

impl std::fmt::Debug for Perlin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perlin").finish_non_exhaustive()
    }
}

/// 6t^5 - 15t^4 + 10t^3
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}
