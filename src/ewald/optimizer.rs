/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Ewald parameter optimization
//!
//! The Ewald parameter sets the width of the Gaussian charges that split the
//! point-charge lattice sum into a real-space and a reciprocal-space series.
//! A good parameter makes both series cost about the same, which is what the
//! iteration below aims for: it compares the number of lattice images each
//! series needs at the configured accuracy and rescales the parameter until
//! the two counts agree within the convergence ratio.

use super::config::EwaldConfig;
use super::dielectric::DielectricTensor;
use super::errors::{EwaldError, Result};
use crate::lattice::{grid_count, Lattice, Vector3D};
use crate::utils::constants::MAX_OPTIMIZATION_ITERATIONS;
use log::debug;
use serde::{Deserialize, Serialize};

/// Optimized Ewald parameter for one structure and dielectric tensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EwaldParameter(f64);

impl EwaldParameter {
    /// Wrap a raw parameter value
    pub fn new(value: f64) -> Result<Self> {
        if !(value.is_finite() && value > 0.0) {
            return Err(EwaldError::InvalidConfig(format!(
                "Ewald parameter must be positive, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// The raw parameter value
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Searches for the Ewald parameter balancing real and reciprocal sums
#[derive(Debug, Clone)]
pub struct EwaldParameterOptimizer {
    real_vectors: [Vector3D; 3],
    reciprocal_vectors: [Vector3D; 3],
    cube_root_volume: f64,
    root_det: f64,
    accuracy: f64,
    convergence: f64,
}

impl EwaldParameterOptimizer {
    /// Create an optimizer for a lattice and total dielectric tensor
    pub fn new(lattice: &Lattice, dielectric: &DielectricTensor, config: &EwaldConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            real_vectors: lattice.vectors(),
            reciprocal_vectors: lattice.reciprocal_lattice().vectors(),
            cube_root_volume: lattice.volume().cbrt(),
            root_det: dielectric.root_det(),
            accuracy: config.accuracy,
            convergence: config.convergence,
        })
    }

    /// Starting guess from the geometric means of the real and reciprocal vector lengths
    pub fn initial_param(&self) -> f64 {
        let real_length = geometric_mean_length(&self.real_vectors);
        let reciprocal_length = geometric_mean_length(&self.reciprocal_vectors);

        (reciprocal_length / real_length / 2.0).sqrt() * self.cube_root_volume / self.root_det
    }

    /// Effective damping used for the cutoffs, `p / V^(1/3) * sqrt(det ε)`
    pub fn effective_damping(&self, param: f64) -> f64 {
        param / self.cube_root_volume * self.root_det
    }

    /// Number of real and reciprocal lattice images needed for a parameter
    pub fn lattice_point_counts(&self, param: f64) -> (usize, usize) {
        let ewald = self.effective_damping(param);
        let real_cutoff = self.accuracy / ewald;
        let reciprocal_cutoff = 2.0 * ewald * self.accuracy;

        (
            grid_count(&self.real_vectors, real_cutoff),
            grid_count(&self.reciprocal_vectors, reciprocal_cutoff),
        )
    }

    /// Run the bounded search
    ///
    /// # Returns
    ///
    /// The first parameter whose real/reciprocal count ratio lies strictly
    /// inside `(1/convergence, convergence)`, or
    /// [`EwaldError::ConvergenceError`] after the iteration cap.
    pub fn optimize(&self) -> Result<EwaldParameter> {
        let mut param = self.initial_param();
        let mut ratio = f64::NAN;

        for iteration in 1..=MAX_OPTIMIZATION_ITERATIONS {
            let (num_real, num_reciprocal) = self.lattice_point_counts(param);
            ratio = num_real as f64 / num_reciprocal as f64;

            debug!(
                "Ewald iteration {}: param = {:.6}, real points = {}, reciprocal points = {}, ratio = {:.4}",
                iteration, param, num_real, num_reciprocal, ratio
            );

            if 1.0 / self.convergence < ratio && ratio < self.convergence {
                return EwaldParameter::new(param);
            }

            param *= ratio.powf(1.0 / 6.0);
        }

        Err(EwaldError::ConvergenceError {
            iterations: MAX_OPTIMIZATION_ITERATIONS,
            ratio,
            param,
        })
    }
}

/// Optimize the Ewald parameter for a lattice and dielectric tensor
pub fn optimize_ewald_param(
    lattice: &Lattice,
    dielectric: &DielectricTensor,
    config: &EwaldConfig,
) -> Result<EwaldParameter> {
    EwaldParameterOptimizer::new(lattice, dielectric, config)?.optimize()
}

fn geometric_mean_length(vectors: &[Vector3D; 3]) -> f64 {
    vectors.iter().map(|v| v.length()).product::<f64>().cbrt()
}
