/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Dielectric tensor used to screen the point-charge interaction

use super::errors::{EwaldError, Result};
use crate::utils::linear_algebra::{
    asymmetry, from_rows, inverse, symmetric_eigenvalues, to_rows, Matrix3, MatrixRows,
};
use serde::{Deserialize, Serialize};

/// Largest accepted asymmetry between off-diagonal pairs
const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// Relative permittivity tensor (dimensionless, symmetric positive definite)
///
/// Either the total (ionic + electronic) tensor or the electronic-only
/// tensor. The determinant, inverse and eigenvalue extremes are computed
/// once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRows", into = "MatrixRows")]
pub struct DielectricTensor {
    matrix: Matrix3,
    inverse: Matrix3,
    determinant: f64,
    eigenvalues: [f64; 3],
}

impl DielectricTensor {
    /// Create a dielectric tensor
    ///
    /// # Arguments
    ///
    /// * `rows` - 3×3 tensor as rows; must be symmetric and positive definite
    pub fn new(rows: MatrixRows) -> Result<Self> {
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(EwaldError::InvalidDielectric(
                "components must be finite".to_string(),
            ));
        }

        let matrix = from_rows(&rows);
        if asymmetry(&matrix) > SYMMETRY_TOLERANCE {
            return Err(EwaldError::InvalidDielectric(format!(
                "tensor is not symmetric: {:?}",
                rows
            )));
        }

        let eigenvalues = symmetric_eigenvalues(&matrix);
        if eigenvalues[0] <= 0.0 {
            return Err(EwaldError::InvalidDielectric(format!(
                "tensor is not positive definite (eigenvalues {:?})",
                eigenvalues
            )));
        }

        Ok(Self {
            inverse: inverse(&matrix)?,
            determinant: matrix.determinant(),
            matrix,
            eigenvalues,
        })
    }

    /// Isotropic tensor ε·I
    pub fn isotropic(epsilon: f64) -> Result<Self> {
        Self::new([[epsilon, 0.0, 0.0], [0.0, epsilon, 0.0], [0.0, 0.0, epsilon]])
    }

    /// Diagonal tensor
    pub fn diagonal(xx: f64, yy: f64, zz: f64) -> Result<Self> {
        Self::new([[xx, 0.0, 0.0], [0.0, yy, 0.0], [0.0, 0.0, zz]])
    }

    /// The tensor components
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// The tensor components as row-major nested arrays
    pub fn rows(&self) -> MatrixRows {
        to_rows(&self.matrix)
    }

    /// The inverse tensor
    pub fn inverse(&self) -> &Matrix3 {
        &self.inverse
    }

    /// det(ε)
    pub fn determinant(&self) -> f64 {
        self.determinant
    }

    /// sqrt(det(ε))
    pub fn root_det(&self) -> f64 {
        self.determinant.sqrt()
    }

    /// Smallest eigenvalue
    pub fn min_eigenvalue(&self) -> f64 {
        self.eigenvalues[0]
    }

    /// Largest eigenvalue
    pub fn max_eigenvalue(&self) -> f64 {
        self.eigenvalues[2]
    }

    /// Average of the diagonal, trace(ε) / 3
    pub fn average_trace(&self) -> f64 {
        self.matrix.trace() / 3.0
    }
}

impl TryFrom<MatrixRows> for DielectricTensor {
    type Error = EwaldError;

    fn try_from(rows: MatrixRows) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<DielectricTensor> for MatrixRows {
    fn from(tensor: DielectricTensor) -> Self {
        tensor.rows()
    }
}
