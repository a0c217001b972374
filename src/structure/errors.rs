/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the structure module

/// Error types for the structure module
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructureError {
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Site index {index} out of range for a structure with {len} sites")]
    SiteOutOfRange { index: usize, len: usize },

    #[error("Potential count {potentials} does not match site count {sites}")]
    PotentialCountMismatch { sites: usize, potentials: usize },

    #[error("Lattice error: {0}")]
    Lattice(#[from] crate::lattice::LatticeError),
}

/// Result type for structure operations
pub type Result<T> = std::result::Result<T, StructureError>;
