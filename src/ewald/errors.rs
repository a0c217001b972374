/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the Ewald module

use thiserror::Error;

/// Result type for Ewald operations
pub type Result<T> = std::result::Result<T, EwaldError>;

/// Ewald-specific errors
#[derive(Error, Debug)]
pub enum EwaldError {
    /// The parameter search never balanced the real and reciprocal sums
    #[error(
        "Ewald parameter did not converge after {iterations} iterations \
         (last real/reciprocal ratio {ratio:.4}, parameter {param:.6}); \
         adjust the accuracy or convergence settings"
    )]
    ConvergenceError {
        iterations: usize,
        ratio: f64,
        param: f64,
    },

    /// Dielectric tensor is not symmetric positive definite
    #[error("Invalid dielectric tensor: {0}")]
    InvalidDielectric(String),

    /// Configuration values out of range
    #[error("Invalid Ewald configuration: {0}")]
    InvalidConfig(String),

    /// Lattice-point table could not be assembled
    #[error("Lattice point table error: {0}")]
    LatticePoints(String),

    /// Propagation of error from the lattice module
    #[error("Lattice error: {0}")]
    Lattice(#[from] crate::lattice::LatticeError),

    /// Propagation of error from the utils module
    #[error("Utils error: {0}")]
    Utils(#[from] crate::utils::errors::UtilsError),
}
