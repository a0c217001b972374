/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Per-site electrostatic potential records

use super::errors::{CorrectionError, Result};
use serde::{Deserialize, Serialize};

/// Electrostatic potentials at one atomic site of a defect supercell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialSite {
    /// Element label
    pub specie: String,
    /// Minimum-image distance from the defect centre (Å)
    pub distance: f64,
    /// Ab initio potential difference, defect minus reference (V)
    pub potential: f64,
    /// Point-charge model potential (V); `None` inside the defect region
    pub pc_potential: Option<f64>,
}

impl PotentialSite {
    /// Create a new site record
    pub fn new(specie: impl Into<String>, distance: f64, potential: f64, pc_potential: Option<f64>) -> Self {
        Self {
            specie: specie.into(),
            distance,
            potential,
            pc_potential,
        }
    }

    /// Ab initio minus model potential, if the model potential is defined
    pub fn diff_pot(&self) -> Option<f64> {
        self.pc_potential.map(|pc| self.potential - pc)
    }
}

/// Mean of `diff_pot` over sites strictly farther than `radius` from the defect
///
/// A site exactly at the radius belongs to the defect region.
pub(crate) fn average_diff_outside(sites: &[PotentialSite], radius: f64) -> Result<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;

    for (index, site) in sites.iter().enumerate() {
        if site.distance > radius {
            sum += site
                .diff_pot()
                .ok_or(CorrectionError::MissingModelPotential(index))?;
            count += 1;
        }
    }

    if count == 0 {
        return Err(CorrectionError::EmptyRegionError {
            radius,
            distances: sites.iter().map(|site| site.distance).collect(),
        });
    }

    Ok(sum / count as f64)
}
