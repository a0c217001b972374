/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the corrections module

use thiserror::Error;

/// Result type for correction operations
pub type Result<T> = std::result::Result<T, CorrectionError>;

/// Correction-specific errors
#[derive(Error, Debug)]
pub enum CorrectionError {
    /// No site lies outside the defect region, so the potential offset cannot be averaged
    #[error(
        "No site lies farther than {radius:.4} Å from the defect; \
         cannot average the potential difference (site distances: {distances:?})"
    )]
    EmptyRegionError { radius: f64, distances: Vec<f64> },

    /// Initial and final structures of a charge change do not match
    #[error("Structures before and after the charge change differ: {0}")]
    StructureMismatchError(String),

    /// Charge added in a GKFO transition is not ±1
    #[error("Additional charge must be +1 or -1, got {0}")]
    AdditionalChargeError(i32),

    /// A site used for averaging has no model potential
    #[error("Site {0} lies outside the defect region but has no point-charge potential")]
    MissingModelPotential(usize),

    /// Defect-to-perfect site mapping refers to missing sites
    #[error("Invalid atom mapping: {0}")]
    InvalidMapping(String),

    /// Scalar input out of range
    #[error("Invalid correction input: {0}")]
    InvalidInput(String),

    /// Propagation of error from the Ewald module
    #[error("Ewald error: {0}")]
    Ewald(#[from] crate::ewald::EwaldError),

    /// Propagation of error from the structure module
    #[error("Structure error: {0}")]
    Structure(#[from] crate::structure::StructureError),

    /// File access error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
