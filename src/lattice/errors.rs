/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the lattice module

/// Error types for the lattice module
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LatticeError {
    #[error("Singular lattice: determinant {0:e} is too close to zero")]
    Singular(f64),

    #[error("Invalid lattice parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for lattice operations
pub type Result<T> = std::result::Result<T, LatticeError>;
