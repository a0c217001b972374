/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Cartesian vectors for cell edges, reciprocal vectors and site shifts

use nalgebra::Vector3;
use std::ops::{Add, Mul, Sub};

/// Cartesian 3D vector (Å for real space, Å⁻¹ for reciprocal space)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Integer or fractional combination `Σ c_i v_i` of three basis vectors
    pub fn combine(basis: &[Vector3D; 3], coefficients: [f64; 3]) -> Self {
        basis[0] * coefficients[0] + basis[1] * coefficients[1] + basis[2] * coefficients[2]
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Signed volume `self · (b × c)` of the parallelepiped spanned with `b` and `c`
    pub fn triple(&self, b: &Self, c: &Self) -> f64 {
        self.dot(&b.cross(c))
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vector3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vector3<f64>> for Vector3D {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3D> for Vector3<f64> {
    fn from(v: Vector3D) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Self;

    fn mul(self, scale: f64) -> Self {
        Self::new(self.x * scale, self.y * scale, self.z * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_products() {
        let a = Vector3D::new(1.0, 2.0, 3.0);
        let b = Vector3D::new(4.0, 5.0, 6.0);

        assert_relative_eq!(a.length(), 14.0_f64.sqrt());
        assert_relative_eq!(a.dot(&b), 32.0);
        assert_eq!(a.cross(&b), Vector3D::new(-3.0, 6.0, -3.0));
        assert_relative_eq!((b - a).length(), 27.0_f64.sqrt());
    }

    #[test]
    fn test_triple_product_is_cell_volume() {
        let a = Vector3D::new(2.0, 0.0, 0.0);
        let b = Vector3D::new(1.0, 3.0, 0.0);
        let c = Vector3D::new(0.5, 0.5, 4.0);

        assert_relative_eq!(a.triple(&b, &c), 24.0);
        assert_relative_eq!(b.triple(&a, &c), -24.0);
    }

    #[test]
    fn test_combine_basis() {
        let basis = [
            Vector3D::new(10.0, 0.0, 0.0),
            Vector3D::new(0.0, 10.0, 0.0),
            Vector3D::from([5.0, 0.0, 8.0]),
        ];
        assert_eq!(
            Vector3D::combine(&basis, [0.5, -1.0, 0.25]),
            Vector3D::new(6.25, -10.0, 2.0)
        );
    }
}
