/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Crystal structure representation for defect supercells

use super::errors::{Result, StructureError};
use crate::lattice::Lattice;
use serde::{Deserialize, Serialize};

/// A periodic crystal structure: lattice plus species and fractional coordinates
///
/// This is the already-parsed form of a supercell handed over by a structure
/// reader. Sites are kept in file order since the correction builders pair
/// sites by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StructureRecord", into = "StructureRecord")]
pub struct Structure {
    lattice: Lattice,
    species: Vec<String>,
    frac_coords: Vec<[f64; 3]>,
}

/// Plain field layout used for (de)serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StructureRecord {
    lattice: Lattice,
    species: Vec<String>,
    frac_coords: Vec<[f64; 3]>,
}

impl Structure {
    /// Create a new structure
    ///
    /// # Arguments
    ///
    /// * `lattice` - The periodic cell
    /// * `species` - Element label of each site
    /// * `frac_coords` - Fractional coordinates of each site
    pub fn new(lattice: Lattice, species: Vec<String>, frac_coords: Vec<[f64; 3]>) -> Result<Self> {
        if species.len() != frac_coords.len() {
            return Err(StructureError::InvalidStructure(format!(
                "{} species labels for {} coordinates",
                species.len(),
                frac_coords.len()
            )));
        }
        if frac_coords.iter().flatten().any(|c| !c.is_finite()) {
            return Err(StructureError::InvalidStructure(
                "fractional coordinates must be finite".to_string(),
            ));
        }

        Ok(Self {
            lattice,
            species,
            frac_coords,
        })
    }

    /// Get the lattice
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Get the species labels in site order
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Get the fractional coordinates in site order
    pub fn frac_coords(&self) -> &[[f64; 3]] {
        &self.frac_coords
    }

    /// Get the number of sites
    pub fn site_count(&self) -> usize {
        self.species.len()
    }

    /// Get the species and fractional coordinate of one site
    pub fn site(&self, index: usize) -> Result<(&str, &[f64; 3])> {
        match (self.species.get(index), self.frac_coords.get(index)) {
            (Some(specie), Some(coord)) => Ok((specie.as_str(), coord)),
            _ => Err(StructureError::SiteOutOfRange {
                index,
                len: self.site_count(),
            }),
        }
    }

    /// Minimum-image distances of every site from a fractional position
    pub fn distances_from(&self, center: &[f64; 3]) -> Vec<f64> {
        self.frac_coords
            .iter()
            .map(|coord| self.lattice.minimum_image_distance(center, coord))
            .collect()
    }

    /// Check that two structures hold the same species in the same order
    ///
    /// Returns a description of the first difference, or `None` if the
    /// composition and ordering agree.
    pub fn composition_mismatch(&self, other: &Structure) -> Option<String> {
        if self.site_count() != other.site_count() {
            return Some(format!(
                "site counts differ: {} vs {}",
                self.site_count(),
                other.site_count()
            ));
        }

        self.species
            .iter()
            .zip(other.species.iter())
            .enumerate()
            .find(|(_, (a, b))| a != b)
            .map(|(index, (a, b))| format!("site {} is {} in one structure and {} in the other", index, a, b))
    }
}

impl TryFrom<StructureRecord> for Structure {
    type Error = StructureError;

    fn try_from(record: StructureRecord) -> Result<Self> {
        Self::new(record.lattice, record.species, record.frac_coords)
    }
}

impl From<Structure> for StructureRecord {
    fn from(structure: Structure) -> Self {
        Self {
            lattice: structure.lattice,
            species: structure.species,
            frac_coords: structure.frac_coords,
        }
    }
}
