/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility functions for defect-correction calculations
//!
//! This module provides the numerical building blocks shared by the lattice,
//! Ewald and correction modules: physical constants, special functions and
//! small dense linear algebra on 3×3 matrices.

pub mod constants;
pub mod errors;
pub mod linear_algebra;
pub mod math;

pub use errors::{Result, UtilsError};
pub use linear_algebra::{Matrix3, MatrixRows};
pub use math::{erf, erfc};

/// Convert a raw Gaussian-unit potential (charge in e, lengths in Å, divided by 4π)
/// into volts with the supplied conversion factor
pub fn to_volts(raw: f64, unit_conversion: f64) -> f64 {
    raw * unit_conversion
}
