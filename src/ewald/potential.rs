/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Point-charge model potentials in an anisotropic dielectric
//!
//! [`AnisotropicPotential`] turns the raw Ewald sums into the two quantities
//! the corrections need: the potential a periodic unit point charge creates
//! at other atomic sites, and the electrostatic self-energy of that charge.
//! Both are reported in externally visible units (V and eV for a unit
//! charge) using the configured conversion factor.

use super::config::EwaldConfig;
use super::dielectric::DielectricTensor;
use super::errors::Result;
use super::summation::EwaldSummation;
use crate::lattice::Lattice;
use crate::utils::to_volts;
use rayon::prelude::*;

/// Model potential of a periodic unit point charge with neutralizing background
#[derive(Debug, Clone)]
pub struct AnisotropicPotential {
    summation: EwaldSummation,
    unit_conversion: f64,
}

impl AnisotropicPotential {
    /// Optimize the Ewald parameter and prepare the potential
    pub fn new(lattice: &Lattice, dielectric: &DielectricTensor, config: &EwaldConfig) -> Result<Self> {
        Ok(Self {
            summation: EwaldSummation::new(lattice, dielectric, config)?,
            unit_conversion: config.unit_conversion,
        })
    }

    /// Wrap prepared lattice sums
    pub fn from_summation(summation: EwaldSummation, unit_conversion: f64) -> Self {
        Self {
            summation,
            unit_conversion,
        }
    }

    /// The underlying lattice sums
    pub fn summation(&self) -> &EwaldSummation {
        &self.summation
    }

    /// Potential (V) at a fractional shift from the charge
    pub fn potential_at(&self, shift: &[f64; 3]) -> f64 {
        let ewald = &self.summation;
        let raw = ewald.real_part(shift, true) + ewald.reciprocal_part(shift) + ewald.background_term();
        to_volts(raw, self.unit_conversion)
    }

    /// Potentials (V) at target sites from a unit charge at `defect_coord`
    ///
    /// # Arguments
    ///
    /// * `defect_coord` - Fractional position of the point charge
    /// * `target_coords` - Fractional positions of the sites
    ///
    /// # Returns
    ///
    /// One potential per target, in input order. Periodicity of the sums
    /// makes the result independent of which image of a site is given.
    pub fn model_potential(&self, defect_coord: &[f64; 3], target_coords: &[[f64; 3]]) -> Vec<f64> {
        target_coords
            .par_iter()
            .map(|target| {
                let shift = [
                    target[0] - defect_coord[0],
                    target[1] - defect_coord[1],
                    target[2] - defect_coord[2],
                ];
                self.potential_at(&shift)
            })
            .collect()
    }

    /// Electrostatic energy (eV) of a unit point charge in the periodic medium
    ///
    /// Half of the potential at the charge's own site from its images, its
    /// screening Gaussian and the background.
    pub fn lattice_energy(&self) -> f64 {
        let ewald = &self.summation;
        let zero = [0.0; 3];
        let raw = ewald.real_part(&zero, false)
            + ewald.reciprocal_part(&zero)
            + ewald.background_term()
            + ewald.self_term();
        to_volts(raw / 2.0, self.unit_conversion)
    }
}
