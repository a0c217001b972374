/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Anisotropic Ewald electrostatics
//!
//! This module evaluates the electrostatics of a periodic point charge in a
//! medium with an anisotropic dielectric tensor. The Ewald parameter is first
//! tuned so that the real-space and reciprocal-space series cost about the
//! same, then the lattice sums give model site potentials and the lattice
//! self-energy used by the finite-size corrections.

pub mod config;
pub mod dielectric;
mod errors;
pub mod optimizer;
pub mod potential;
pub mod summation;

pub use config::EwaldConfig;
pub use dielectric::DielectricTensor;
pub use errors::{EwaldError, Result};
pub use optimizer::{optimize_ewald_param, EwaldParameter, EwaldParameterOptimizer};
pub use potential::AnisotropicPotential;
pub use summation::EwaldSummation;
