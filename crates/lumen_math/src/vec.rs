//! Vector algebra that glam leaves out: checked division, reflection and
//! refraction.

use crate::Vec3;
use thiserror::Error;

/// Numerical degeneracies in vector algebra.
///
/// These indicate a modeling bug (a zero-radius sphere, a camera looking at
/// its own position), so the panicking variants of the operations below are
/// what the renderer uses.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("division of a vector by zero")]
    DivideByZero,

    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
}

/// Extension trait for `Vec3` used throughout the tracer.
pub trait Vec3Ext: Sized {
    /// Divide by a scalar, failing when the scalar is exactly zero.
    fn try_div(self, s: f64) -> Result<Self, MathError>;

    /// Divide by a scalar. Panics when the scalar is exactly zero.
    fn div_scalar(self, s: f64) -> Self;

    /// Unit vector in the same direction, failing on zero length.
    fn try_unit(self) -> Result<Self, MathError>;

    /// Unit vector in the same direction. Panics on zero length.
    fn unit(self) -> Self;

    /// Mirror `self` about the normal `n`: v - 2(v.n)n
    fn mirror(self, n: Self) -> Self;

    /// Refract `self` (unit length) through a surface with unit normal `n`.
    ///
    /// `ratio` is the ratio of indices of refraction (incident / transmitted).
    /// Returns `None` on total internal reflection.
    fn try_refract(self, n: Self, ratio: f64) -> Option<Self>;

    /// True if every component is close to zero.
    fn near_zero(self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn try_div(self, s: f64) -> Result<Self, MathError> {
        if s == 0.0 {
            return Err(MathError::DivideByZero);
        }
        Ok(self / s)
    }

    #[inline]
    fn div_scalar(self, s: f64) -> Self {
        assert!(s != 0.0, "{}", MathError::DivideByZero);
        self / s
    }

    #[inline]
    fn try_unit(self) -> Result<Self, MathError> {
        self.try_div(self.length())
            .map_err(|_| MathError::ZeroLength)
    }

    #[inline]
    fn unit(self) -> Self {
        let len = self.length();
        assert!(len != 0.0, "{}", MathError::ZeroLength);
        self / len
    }

    #[inline]
    fn mirror(self, n: Self) -> Self {
        self - 2.0 * self.dot(n) * n
    }

    fn try_refract(self, n: Self, ratio: f64) -> Option<Self> {
        let dot = self.dot(n);
        let discriminant = 1.0 - ratio * ratio * (1.0 - dot * dot);
        if discriminant > 0.0 {
            Some(ratio * (self - n * dot) - n * discriminant.sqrt())
        } else {
            None
        }
    }

    #[inline]
    fn near_zero(self) -> bool {
        const S: f64 = 1e-8;
        self.x.abs() < S && self.y.abs() < S && self.z.abs() < S
    }
}
