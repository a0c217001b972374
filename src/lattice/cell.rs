/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Periodic cell representation
//!
//! A [`Lattice`] stores the three real-space basis vectors as matrix rows.
//! It is the geometric input to every lattice sum in this crate, so it is
//! validated once at construction and immutable afterwards.

use super::errors::{LatticeError, Result};
use super::vector::Vector3D;
use crate::utils::constants::SINGULAR_TOLERANCE;
use crate::utils::linear_algebra::{from_rows, to_rows, Matrix3, MatrixRows};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Real-space lattice with basis vectors a1, a2, a3 stored as rows (Å)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRows", into = "MatrixRows")]
pub struct Lattice {
    matrix: Matrix3,
    /// Inverse of `matrix`, kept for the reciprocal lattice
    inverse: Matrix3,
}

impl Lattice {
    /// Create a lattice from row vectors
    ///
    /// # Arguments
    ///
    /// * `rows` - Rows are the lattice vectors in Å
    ///
    /// # Returns
    ///
    /// The lattice, or [`LatticeError::Singular`] if the vectors are
    /// (nearly) coplanar
    pub fn new(rows: MatrixRows) -> Result<Self> {
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(LatticeError::InvalidParameter(
                "lattice vectors must be finite".to_string(),
            ));
        }

        let matrix = from_rows(&rows);
        let det = matrix.determinant();
        if det.abs() < SINGULAR_TOLERANCE {
            return Err(LatticeError::Singular(det));
        }
        let inverse = matrix.try_inverse().ok_or(LatticeError::Singular(det))?;

        Ok(Self { matrix, inverse })
    }

    /// Simple cubic lattice with edge length `a`
    pub fn cubic(a: f64) -> Result<Self> {
        Self::new([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]])
    }

    /// Orthorhombic lattice with edge lengths `a`, `b`, `c`
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<Self> {
        Self::new([[a, 0.0, 0.0], [0.0, b, 0.0], [0.0, 0.0, c]])
    }

    /// Lattice vectors as matrix rows
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Lattice vectors as row-major nested arrays
    pub fn rows(&self) -> MatrixRows {
        to_rows(&self.matrix)
    }

    /// The three lattice vectors
    pub fn vectors(&self) -> [Vector3D; 3] {
        std::array::from_fn(|i| Vector3D::from(self.matrix.row(i).transpose()))
    }

    /// Lengths of the three lattice vectors
    pub fn lengths(&self) -> [f64; 3] {
        std::array::from_fn(|i| self.matrix.row(i).norm())
    }

    /// Cell volume (always positive)
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    /// Reciprocal lattice including the 2π factor, so that a_i · b_j = 2π δ_ij
    ///
    /// The rows of `2π (A⁻¹)ᵀ`; its inverse is `Aᵀ / 2π`.
    pub fn reciprocal_lattice(&self) -> Lattice {
        Lattice {
            matrix: self.inverse.transpose() * (2.0 * PI),
            inverse: self.matrix.transpose() / (2.0 * PI),
        }
    }

    /// Distances between adjacent lattice planes normal to each reciprocal vector
    pub fn interplanar_spacings(&self) -> [f64; 3] {
        // |b_i| = 2π |column i of A⁻¹|
        std::array::from_fn(|i| 1.0 / self.inverse.column(i).norm())
    }

    /// Convert fractional coordinates to a Cartesian vector
    pub fn frac_to_cart(&self, frac: &[f64; 3]) -> Vector3D {
        Vector3D::from(self.matrix.tr_mul(&Vector3::from(*frac)))
    }

    /// Shortest Cartesian vector from `from` to any periodic image of `to`
    ///
    /// Both positions are fractional coordinates. The fractional difference is
    /// wrapped into [-0.5, 0.5] first. Any image shorter than the wrapped
    /// vector has fractional components bounded by its length over the
    /// interplanar spacings, so searching that box is exact for any cell.
    /// For a reduced cell the box is the 27 nearest images.
    pub fn minimum_image_vector(&self, from: &[f64; 3], to: &[f64; 3]) -> Vector3D {
        let wrapped = wrap_fractional(&[to[0] - from[0], to[1] - from[1], to[2] - from[2]]);

        let mut best = self.frac_to_cart(&wrapped);
        let mut best_length = best.length();
        let ranges = self
            .interplanar_spacings()
            .map(|d| (best_length / d + 0.5).floor() as i64);

        for i in -ranges[0]..=ranges[0] {
            for j in -ranges[1]..=ranges[1] {
                for k in -ranges[2]..=ranges[2] {
                    let candidate = self.frac_to_cart(&[
                        wrapped[0] + i as f64,
                        wrapped[1] + j as f64,
                        wrapped[2] + k as f64,
                    ]);
                    let length = candidate.length();
                    if length < best_length {
                        best = candidate;
                        best_length = length;
                    }
                }
            }
        }

        best
    }

    /// Minimum-image distance between two fractional positions (Å)
    pub fn minimum_image_distance(&self, from: &[f64; 3], to: &[f64; 3]) -> f64 {
        self.minimum_image_vector(from, to).length()
    }

    /// Whether every lattice vector component agrees within `tolerance` (Å)
    pub fn approx_eq(&self, other: &Lattice, tolerance: f64) -> bool {
        (self.matrix - other.matrix).amax() <= tolerance
    }
}

impl TryFrom<MatrixRows> for Lattice {
    type Error = LatticeError;

    fn try_from(rows: MatrixRows) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<Lattice> for MatrixRows {
    fn from(lattice: Lattice) -> Self {
        lattice.rows()
    }
}

/// Wrap fractional components into [-0.5, 0.5]
pub fn wrap_fractional(frac: &[f64; 3]) -> [f64; 3] {
    [
        frac[0] - frac[0].round(),
        frac[1] - frac[1].round(),
        frac[2] - frac[2].round(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_singular_lattice() {
        let flat = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]];
        assert!(matches!(Lattice::new(flat), Err(LatticeError::Singular(_))));
        assert!(Lattice::cubic(0.0).is_err());
    }

    #[test]
    fn test_reciprocal_lattice() {
        let lattice = Lattice::new([[3.0, 0.0, 0.0], [1.0, 4.0, 0.0], [0.5, 0.5, 5.0]]).unwrap();
        let real = lattice.vectors();
        let reciprocal = lattice.reciprocal_lattice().vectors();

        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 2.0 * PI } else { 0.0 };
                assert_relative_eq!(real[i].dot(&reciprocal[j]), expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_volume_ignores_handedness() {
        let right = Lattice::orthorhombic(2.0, 3.0, 4.0).unwrap();
        let left = Lattice::new([[0.0, 3.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 4.0]]).unwrap();
        assert_relative_eq!(right.volume(), 24.0);
        assert_relative_eq!(left.volume(), 24.0);
    }

    #[test]
    fn test_minimum_image_distance() {
        let lattice = Lattice::cubic(10.0).unwrap();

        // Across the periodic boundary
        let d = lattice.minimum_image_distance(&[0.05, 0.0, 0.0], &[0.95, 0.0, 0.0]);
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);

        let d = lattice.minimum_image_distance(&[0.0, 0.0, 0.0], &[0.5, 0.5, 0.5]);
        assert_relative_eq!(d, 75.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_minimum_image_in_skewed_cell() {
        // Hexagonal cell: the wrapped fractional vector is not the shortest one
        let a = 3.0;
        let lattice = Lattice::new([
            [a, 0.0, 0.0],
            [-a / 2.0, a * 3.0_f64.sqrt() / 2.0, 0.0],
            [0.0, 0.0, 5.0],
        ])
        .unwrap();

        let wrapped = lattice.frac_to_cart(&[0.5, -0.4, 0.0]).length();
        let d = lattice.minimum_image_distance(&[0.0, 0.0, 0.0], &[0.5, -0.4, 0.0]);
        assert!(d < wrapped);
        assert_relative_eq!(d, 1.89_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_approx_eq_tolerates_rounding() {
        let a = Lattice::cubic(5.0).unwrap();
        let b = Lattice::cubic(5.0 + 1e-12).unwrap();
        assert_ne!(a, b);
        assert!(a.approx_eq(&b, 1e-8));
        assert!(!a.approx_eq(&Lattice::cubic(5.1).unwrap(), 1e-8));
    }

    #[test]
    fn test_serde_validates_matrix() {
        let lattice = Lattice::cubic(5.0).unwrap();
        let json = serde_json::to_string(&lattice).unwrap();
        let back: Lattice = serde_json::from_str(&json).unwrap();
        assert_eq!(lattice, back);

        let singular = "[[1.0,0.0,0.0],[2.0,0.0,0.0],[0.0,0.0,1.0]]";
        assert!(serde_json::from_str::<Lattice>(singular).is_err());
    }
}
