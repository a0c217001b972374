/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Linear algebra utilities using the nalgebra library
//!
//! Lattices and dielectric tensors are fixed 3×3 matrices. They are held as
//! `nalgebra::Matrix3<f64>` and cross the serialization boundary as
//! row-major nested arrays.

use super::constants::SINGULAR_TOLERANCE;
use super::errors::{Result, UtilsError};
use nalgebra::Vector3;

/// 3×3 real matrix
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Row-major nested-array form of a 3×3 matrix
pub type MatrixRows = [[f64; 3]; 3];

/// Build a matrix from row-major nested arrays
pub fn from_rows(rows: &MatrixRows) -> Matrix3 {
    Matrix3::from_fn(|i, j| rows[i][j])
}

/// Row-major nested arrays of a matrix
pub fn to_rows(m: &Matrix3) -> MatrixRows {
    std::array::from_fn(|i| std::array::from_fn(|j| m[(i, j)]))
}

/// Inverse of a 3×3 matrix
///
/// Returns an error if the determinant is below the singular tolerance.
pub fn inverse(m: &Matrix3) -> Result<Matrix3> {
    let det = m.determinant();
    if det.abs() < SINGULAR_TOLERANCE {
        return Err(UtilsError::SingularMatrix(det));
    }
    m.try_inverse().ok_or(UtilsError::SingularMatrix(det))
}

/// Quadratic form v · m · v
pub fn quadratic_form(m: &Matrix3, v: &Vector3<f64>) -> f64 {
    v.dot(&(m * v))
}

/// Largest absolute difference between a matrix and its transpose
pub fn asymmetry(m: &Matrix3) -> f64 {
    (m - m.transpose()).amax()
}

/// Eigenvalues of a real symmetric matrix in ascending order
pub fn symmetric_eigenvalues(m: &Matrix3) -> [f64; 3] {
    let mut eigenvalues: [f64; 3] = m.symmetric_eigen().eigenvalues.into();
    eigenvalues.sort_by(f64::total_cmp);
    eigenvalues
}
