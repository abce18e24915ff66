//! Three-component single precision vector.

use std::ops::{Add, AddAssign, Mul};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise comparison with a relative tolerance.
    pub fn approx_eq(self, other: Self, rel_tol: f32) -> bool {
        fn close(a: f32, b: f32, rel_tol: f32) -> bool {
            let scale = a.abs().max(b.abs()).max(1.0);
            (a - b).abs() <= rel_tol * scale
        }
        close(self.x, other.x, rel_tol)
            && close(self.y, other.y, rel_tol)
            && close(self.z, other.z, rel_tol)
    }
}

impl Add for Vector3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let mut p = Vector3::new(1.0, 2.0, 3.0);
        p += Vector3::new(1.0, 1.0, 1.0) * 2.0;
        assert_eq!(p, Vector3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_approx_eq() {
        let a = Vector3::new(0.016, 0.032, 0.048);
        assert!(a.approx_eq(Vector3::new(0.016, 0.032, 0.048000001), 1e-5));
        assert!(!a.approx_eq(Vector3::new(0.017, 0.032, 0.048), 1e-5));
    }
}
