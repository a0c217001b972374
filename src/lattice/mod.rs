/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Lattice geometry module
//!
//! This module provides the periodic cell, its reciprocal lattice and the
//! geometric measures (defect-region radius, image counts) that bound the
//! Ewald lattice sums.

pub mod cell;
pub mod errors;
pub mod geometry;
pub mod vector;

pub use cell::{wrap_fractional, Lattice};
pub use errors::{LatticeError, Result};
pub use geometry::{grid_count, max_sphere_radius};
pub use vector::Vector3D;
