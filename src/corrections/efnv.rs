/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Extended FNV finite-size correction
//!
//! A charged defect in a periodic supercell interacts with its own images and
//! the compensating background. The extended FNV scheme removes this spurious
//! energy in two parts:
//!
//! * the point-charge term, minus the lattice self-energy of the defect
//!   charge screened by the total dielectric tensor;
//! * the alignment term, which shifts the electrostatic reference by the
//!   average difference between the ab initio and point-charge site
//!   potentials far from the defect.

use super::errors::{CorrectionError, Result};
use super::site::{average_diff_outside, PotentialSite};
use crate::ewald::{AnisotropicPotential, DielectricTensor, EwaldConfig};
use crate::lattice::max_sphere_radius;
use crate::structure::CalcResults;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Extended FNV correction for one defect in one charge state
///
/// The record is immutable; every derived quantity is recomputed from the
/// stored fields on access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExtendedFnvRecord", into = "ExtendedFnvRecord")]
pub struct ExtendedFnvCorrection {
    charge: i32,
    point_charge_correction: f64,
    defect_region_radius: f64,
    sites: Vec<PotentialSite>,
    additional_correction: f64,
}

/// Field-for-field persisted form
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExtendedFnvRecord {
    charge: i32,
    point_charge_correction: f64,
    defect_region_radius: f64,
    sites: Vec<PotentialSite>,
    #[serde(default)]
    additional_correction: f64,
}

impl ExtendedFnvCorrection {
    /// Create a correction from precomputed terms
    ///
    /// # Arguments
    ///
    /// * `charge` - Defect charge in units of e
    /// * `point_charge_correction` - Point-charge term (eV)
    /// * `defect_region_radius` - Sites at or within this distance (Å) are not averaged
    /// * `sites` - Site potential records
    /// * `additional_correction` - Any further manual correction (eV)
    pub fn new(
        charge: i32,
        point_charge_correction: f64,
        defect_region_radius: f64,
        sites: Vec<PotentialSite>,
        additional_correction: f64,
    ) -> Result<Self> {
        if !point_charge_correction.is_finite() || !additional_correction.is_finite() {
            return Err(CorrectionError::InvalidInput(
                "correction terms must be finite".to_string(),
            ));
        }
        if !(defect_region_radius.is_finite() && defect_region_radius >= 0.0) {
            return Err(CorrectionError::InvalidInput(format!(
                "defect region radius must be non-negative, got {}",
                defect_region_radius
            )));
        }

        Ok(Self {
            charge,
            point_charge_correction,
            defect_region_radius,
            sites,
            additional_correction,
        })
    }

    /// Defect charge
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Point-charge term (eV)
    pub fn point_charge_correction(&self) -> f64 {
        self.point_charge_correction
    }

    /// Defect region radius (Å)
    pub fn defect_region_radius(&self) -> f64 {
        self.defect_region_radius
    }

    /// Site potential records
    pub fn sites(&self) -> &[PotentialSite] {
        &self.sites
    }

    /// Additional manual correction (eV)
    pub fn additional_correction(&self) -> f64 {
        self.additional_correction
    }

    /// Distances of all sites from the defect (Å)
    pub fn distances(&self) -> Vec<f64> {
        self.sites.iter().map(|site| site.distance).collect()
    }

    /// Ab initio minus model potential of every site, `None` inside the defect region
    pub fn potential_diffs(&self) -> Vec<Option<f64>> {
        self.sites.iter().map(PotentialSite::diff_pot).collect()
    }

    /// Average potential difference over sites outside the defect region (V)
    pub fn average_potential_diff(&self) -> Result<f64> {
        average_diff_outside(&self.sites, self.defect_region_radius)
    }

    /// Potential alignment term (eV)
    pub fn alignment_correction(&self) -> Result<f64> {
        Ok(-self.average_potential_diff()? * f64::from(self.charge))
    }

    /// Total correction energy (eV)
    pub fn correction_energy(&self) -> Result<f64> {
        Ok(self.point_charge_correction + self.alignment_correction()? + self.additional_correction)
    }
}

impl TryFrom<ExtendedFnvRecord> for ExtendedFnvCorrection {
    type Error = CorrectionError;

    fn try_from(record: ExtendedFnvRecord) -> Result<Self> {
        Self::new(
            record.charge,
            record.point_charge_correction,
            record.defect_region_radius,
            record.sites,
            record.additional_correction,
        )
    }
}

impl From<ExtendedFnvCorrection> for ExtendedFnvRecord {
    fn from(correction: ExtendedFnvCorrection) -> Self {
        Self {
            charge: correction.charge,
            point_charge_correction: correction.point_charge_correction,
            defect_region_radius: correction.defect_region_radius,
            sites: correction.sites,
            additional_correction: correction.additional_correction,
        }
    }
}

impl fmt::Display for ExtendedFnvCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outside = self
            .sites
            .iter()
            .filter(|site| site.distance > self.defect_region_radius)
            .count();

        writeln!(f, "charge                        {:>10}", self.charge)?;
        writeln!(f, "defect region radius (Å)      {:>10.4}", self.defect_region_radius)?;
        writeln!(f, "sites outside region          {:>10}", format!("{}/{}", outside, self.sites.len()))?;
        writeln!(f, "point charge correction (eV)  {:>10.4}", self.point_charge_correction)?;
        match self.alignment_correction() {
            Ok(alignment) => writeln!(f, "alignment correction (eV)     {:>10.4}", alignment)?,
            Err(_) => writeln!(f, "alignment correction (eV)     {:>10}", "n/a")?,
        }
        writeln!(f, "additional correction (eV)    {:>10.4}", self.additional_correction)?;
        match self.correction_energy() {
            Ok(energy) => write!(f, "correction energy (eV)        {:>10.4}", energy),
            Err(_) => write!(f, "correction energy (eV)        {:>10}", "n/a"),
        }
    }
}

/// Everything needed to build an extended FNV correction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EfnvInput {
    /// Defect charge in units of e
    pub charge: i32,
    /// Defect supercell calculation
    pub defect: CalcResults,
    /// Perfect (reference) supercell calculation
    pub perfect: CalcResults,
    /// Pairs of (defect site index, perfect site index) for sites present in both
    pub atom_mapping: Vec<(usize, usize)>,
    /// Total (ionic + electronic) dielectric tensor
    pub dielectric_tensor: DielectricTensor,
    /// Fractional coordinate of the defect centre in the defect supercell
    pub defect_coords: [f64; 3],
    /// Defect region radius (Å); defaults to the cell's max sphere radius
    #[serde(default)]
    pub defect_region_radius: Option<f64>,
    /// Additional manual correction (eV)
    #[serde(default)]
    pub additional_correction: f64,
}

impl EfnvInput {
    /// Pair every site with the site of the same index in the reference cell
    pub fn identity_mapping(site_count: usize) -> Vec<(usize, usize)> {
        (0..site_count).map(|i| (i, i)).collect()
    }
}

/// Build the extended FNV correction from a defect and a reference calculation
///
/// The point-charge term is `-E_lattice · q²`, where `E_lattice` is the
/// lattice energy of a unit charge screened by the total dielectric tensor.
/// Each mapped site gets the ab initio potential difference, and sites
/// outside the defect region also get the model potential `q · φ(r)`.
/// A neutral defect needs no lattice sums: both terms vanish.
pub fn make_efnv_correction(input: &EfnvInput, config: &EwaldConfig) -> Result<ExtendedFnvCorrection> {
    let structure = input.defect.structure();
    let lattice = structure.lattice();
    let charge = f64::from(input.charge);

    let radius = input
        .defect_region_radius
        .unwrap_or_else(|| max_sphere_radius(lattice));
    debug!("Defect region radius: {:.4} Å", radius);

    let mut targets = Vec::with_capacity(input.atom_mapping.len());
    let mut sites = Vec::with_capacity(input.atom_mapping.len());
    for &(defect_index, perfect_index) in &input.atom_mapping {
        let (specie, coord) = structure.site(defect_index).map_err(|_| {
            CorrectionError::InvalidMapping(format!(
                "defect site {} does not exist ({} sites)",
                defect_index,
                structure.site_count()
            ))
        })?;
        let perfect_potential = input.perfect.potential(perfect_index).map_err(|_| {
            CorrectionError::InvalidMapping(format!(
                "perfect site {} does not exist ({} sites)",
                perfect_index,
                input.perfect.potentials().len()
            ))
        })?;

        let distance = lattice.minimum_image_distance(&input.defect_coords, coord);
        let potential = input.defect.potential(defect_index)? - perfect_potential;
        sites.push(PotentialSite::new(specie, distance, potential, None));
        targets.push(*coord);
    }

    let outside: Vec<usize> = (0..sites.len())
        .filter(|&i| sites[i].distance > radius)
        .collect();

    let point_charge_correction = if input.charge == 0 {
        warn!("Neutral defect: point-charge and alignment terms are zero");
        for &i in &outside {
            sites[i].pc_potential = Some(0.0);
        }
        0.0
    } else {
        let model = AnisotropicPotential::new(lattice, &input.dielectric_tensor, config)?;
        let outside_coords: Vec<[f64; 3]> = outside.iter().map(|&i| targets[i]).collect();
        let potentials = model.model_potential(&input.defect_coords, &outside_coords);
        for (&i, phi) in outside.iter().zip(potentials) {
            sites[i].pc_potential = Some(phi * charge);
        }
        -model.lattice_energy() * charge * charge
    };

    let correction = ExtendedFnvCorrection::new(
        input.charge,
        point_charge_correction,
        radius,
        sites,
        input.additional_correction,
    )?;

    match correction.correction_energy() {
        Ok(energy) => info!(
            "Extended FNV correction for charge {}: {:.4} eV",
            input.charge, energy
        ),
        Err(e) => warn!("Extended FNV correction is incomplete: {}", e),
    }

    Ok(correction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_correction() -> ExtendedFnvCorrection {
        ExtendedFnvCorrection::new(
            10,
            1.0,
            2.0,
            vec![
                PotentialSite::new("H", 1.999, 1.0, None),
                PotentialSite::new("He", 2.0001, 1.5, Some(0.2)),
                PotentialSite::new("Li", 3.0, 2.0, Some(0.3)),
            ],
            100.0,
        )
        .unwrap()
    }

    #[test]
    fn test_derived_values() {
        let correction = reference_correction();
        let average = ((1.5 - 0.2) + (2.0 - 0.3)) / 2.0;

        assert_relative_eq!(correction.average_potential_diff().unwrap(), average);
        assert_relative_eq!(correction.alignment_correction().unwrap(), -10.0 * average);
        assert_relative_eq!(
            correction.correction_energy().unwrap(),
            1.0 - 10.0 * average + 100.0
        );
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let correction = reference_correction();
        assert_eq!(
            correction.correction_energy().unwrap().to_bits(),
            correction.correction_energy().unwrap().to_bits()
        );
        assert_eq!(correction.distances(), vec![1.999, 2.0001, 3.0]);
        assert_eq!(correction.potential_diffs()[0], None);
    }

    #[test]
    fn test_rejects_negative_radius() {
        assert!(matches!(
            ExtendedFnvCorrection::new(1, 0.0, -1.0, vec![], 0.0),
            Err(CorrectionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_display_summary() {
        let text = reference_correction().to_string();
        assert!(text.contains("sites outside region"));
        assert!(text.contains("2/3"));
        assert!(text.contains("86.0000"));
    }
}
