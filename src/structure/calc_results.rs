/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Results of a single DFT supercell calculation

use super::crystal::Structure;
use super::errors::{Result, StructureError};
use serde::{Deserialize, Serialize};

/// The parts of a finished supercell calculation used by the corrections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalcResultsRecord", into = "CalcResultsRecord")]
pub struct CalcResults {
    structure: Structure,
    potentials: Vec<f64>,
    energy: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CalcResultsRecord {
    structure: Structure,
    potentials: Vec<f64>,
    #[serde(default)]
    energy: Option<f64>,
}

impl CalcResults {
    /// Create calculation results
    ///
    /// # Arguments
    ///
    /// * `structure` - Final structure of the calculation
    /// * `potentials` - Electrostatic potential at each site (V), in site order
    /// * `energy` - Total energy (eV), if available
    pub fn new(structure: Structure, potentials: Vec<f64>, energy: Option<f64>) -> Result<Self> {
        if structure.site_count() != potentials.len() {
            return Err(StructureError::PotentialCountMismatch {
                sites: structure.site_count(),
                potentials: potentials.len(),
            });
        }

        Ok(Self {
            structure,
            potentials,
            energy,
        })
    }

    /// Get the structure
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Get the site potentials (V)
    pub fn potentials(&self) -> &[f64] {
        &self.potentials
    }

    /// Get the site potential at an index
    pub fn potential(&self, index: usize) -> Result<f64> {
        self.potentials
            .get(index)
            .copied()
            .ok_or(StructureError::SiteOutOfRange {
                index,
                len: self.potentials.len(),
            })
    }

    /// Get the total energy (eV)
    pub fn energy(&self) -> Option<f64> {
        self.energy
    }
}

impl TryFrom<CalcResultsRecord> for CalcResults {
    type Error = StructureError;

    fn try_from(record: CalcResultsRecord) -> Result<Self> {
        Self::new(record.structure, record.potentials, record.energy)
    }
}

impl From<CalcResults> for CalcResultsRecord {
    fn from(results: CalcResults) -> Self {
        Self {
            structure: results.structure,
            potentials: results.potentials,
            energy: results.energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice;

    #[test]
    fn test_potential_count_must_match() {
        let structure = Structure::new(
            Lattice::cubic(4.0).unwrap(),
            vec!["Mg".into(), "O".into()],
            vec![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]],
        )
        .unwrap();

        assert!(CalcResults::new(structure.clone(), vec![-30.0, -70.0], Some(-12.0)).is_ok());
        assert!(matches!(
            CalcResults::new(structure, vec![-30.0], None),
            Err(StructureError::PotentialCountMismatch { sites: 2, potentials: 1 })
        ));
    }
}
