/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! GKFO correction for a ±1 change of the defect charge
//!
//! When one electron is added to or removed from a relaxed defect without
//! letting the ions respond, only the electronic part of the dielectric
//! response screens the added charge. The correction combines the extended
//! FNV correction of the initial state with point-charge and alignment terms
//! for the added charge screened by the electronic dielectric tensor.

use super::efnv::ExtendedFnvCorrection;
use super::errors::{CorrectionError, Result};
use super::site::{average_diff_outside, PotentialSite};
use crate::ewald::{AnisotropicPotential, DielectricTensor, EwaldConfig};
use crate::structure::CalcResults;
use crate::utils::constants::LATTICE_MATCH_TOLERANCE;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Correction for a vertical charge change from an initial defect state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GkfoRecord", into = "GkfoRecord")]
pub struct GkfoCorrection {
    init_efnv_correction: ExtendedFnvCorrection,
    additional_charge: i32,
    pc_2nd_term: f64,
    gkfo_sites: Vec<PotentialSite>,
    ave_dielectric_tensor: f64,
    ave_electronic_dielectric_tensor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GkfoRecord {
    init_efnv_correction: ExtendedFnvCorrection,
    additional_charge: i32,
    pc_2nd_term: f64,
    gkfo_sites: Vec<PotentialSite>,
    ave_dielectric_tensor: f64,
    ave_electronic_dielectric_tensor: f64,
}

impl GkfoCorrection {
    /// Create a correction from precomputed terms
    ///
    /// # Arguments
    ///
    /// * `init_efnv_correction` - Extended FNV correction of the initial state
    /// * `additional_charge` - Added charge, +1 or -1
    /// * `pc_2nd_term` - Point-charge term of the added charge (eV)
    /// * `gkfo_sites` - Sites holding final minus initial potentials
    /// * `ave_dielectric_tensor` - Average of the total dielectric tensor diagonal
    /// * `ave_electronic_dielectric_tensor` - Average of the electronic tensor diagonal
    pub fn new(
        init_efnv_correction: ExtendedFnvCorrection,
        additional_charge: i32,
        pc_2nd_term: f64,
        gkfo_sites: Vec<PotentialSite>,
        ave_dielectric_tensor: f64,
        ave_electronic_dielectric_tensor: f64,
    ) -> Result<Self> {
        if additional_charge.abs() != 1 {
            return Err(CorrectionError::AdditionalChargeError(additional_charge));
        }
        if !(ave_dielectric_tensor > 0.0 && ave_electronic_dielectric_tensor > 0.0) {
            return Err(CorrectionError::InvalidInput(format!(
                "average dielectric constants must be positive, got {} and {}",
                ave_dielectric_tensor, ave_electronic_dielectric_tensor
            )));
        }

        Ok(Self {
            init_efnv_correction,
            additional_charge,
            pc_2nd_term,
            gkfo_sites,
            ave_dielectric_tensor,
            ave_electronic_dielectric_tensor,
        })
    }

    /// Extended FNV correction of the initial state
    pub fn init_efnv_correction(&self) -> &ExtendedFnvCorrection {
        &self.init_efnv_correction
    }

    /// Charge added by the transition, +1 or -1
    pub fn additional_charge(&self) -> i32 {
        self.additional_charge
    }

    /// Charge of the initial state
    pub fn init_charge(&self) -> i32 {
        self.init_efnv_correction.charge()
    }

    /// Charge after the transition
    pub fn final_charge(&self) -> i32 {
        self.init_charge() + self.additional_charge
    }

    /// Sites holding final minus initial potentials and the added charge's model potential
    pub fn gkfo_sites(&self) -> &[PotentialSite] {
        &self.gkfo_sites
    }

    /// Average diagonal of the total dielectric tensor
    pub fn ave_dielectric_tensor(&self) -> f64 {
        self.ave_dielectric_tensor
    }

    /// Average diagonal of the electronic dielectric tensor
    pub fn ave_electronic_dielectric_tensor(&self) -> f64 {
        self.ave_electronic_dielectric_tensor
    }

    /// Interaction of the added charge with the initial charge, screened by the total tensor (eV)
    pub fn pc_1st_term(&self) -> f64 {
        let init_charge = self.init_charge();
        if init_charge == 0 {
            return 0.0;
        }
        self.init_efnv_correction.point_charge_correction() * 2.0 / f64::from(init_charge)
            * f64::from(self.additional_charge)
    }

    /// Self-interaction of the added charge, screened by the electronic tensor (eV)
    pub fn pc_2nd_term(&self) -> f64 {
        self.pc_2nd_term
    }

    /// Average of the potential difference caused by the added charge (V)
    pub fn average_potential_diff_by_addition(&self) -> Result<f64> {
        average_diff_outside(
            &self.gkfo_sites,
            self.init_efnv_correction.defect_region_radius(),
        )
    }

    /// Alignment of the initial charge to the potential change of the addition (eV)
    pub fn alignment_1st_term(&self) -> Result<f64> {
        Ok(-self.average_potential_diff_by_addition()? * f64::from(self.init_charge()))
    }

    /// Alignment of the added charge to the initial-state potential offset (eV)
    pub fn alignment_2nd_term(&self) -> Result<f64> {
        Ok(-self.init_efnv_correction.average_potential_diff()? * f64::from(self.additional_charge))
    }

    /// Alignment of the added charge to its own electronically screened offset (eV)
    pub fn alignment_3rd_term(&self) -> Result<f64> {
        Ok(-self.average_potential_diff_by_addition()?
            * f64::from(self.additional_charge)
            * self.ave_electronic_dielectric_tensor
            / self.ave_dielectric_tensor)
    }

    /// Sum of the three alignment terms (eV)
    pub fn sum_alignment_term(&self) -> Result<f64> {
        Ok(self.alignment_1st_term()? + self.alignment_2nd_term()? + self.alignment_3rd_term()?)
    }

    /// Total correction energy (eV)
    pub fn correction_energy(&self) -> Result<f64> {
        Ok(self.pc_1st_term() + self.pc_2nd_term + self.sum_alignment_term()?)
    }
}

impl TryFrom<GkfoRecord> for GkfoCorrection {
    type Error = CorrectionError;

    fn try_from(record: GkfoRecord) -> Result<Self> {
        Self::new(
            record.init_efnv_correction,
            record.additional_charge,
            record.pc_2nd_term,
            record.gkfo_sites,
            record.ave_dielectric_tensor,
            record.ave_electronic_dielectric_tensor,
        )
    }
}

impl From<GkfoCorrection> for GkfoRecord {
    fn from(correction: GkfoCorrection) -> Self {
        Self {
            init_efnv_correction: correction.init_efnv_correction,
            additional_charge: correction.additional_charge,
            pc_2nd_term: correction.pc_2nd_term,
            gkfo_sites: correction.gkfo_sites,
            ave_dielectric_tensor: correction.ave_dielectric_tensor,
            ave_electronic_dielectric_tensor: correction.ave_electronic_dielectric_tensor,
        }
    }
}

fn write_term(f: &mut fmt::Formatter<'_>, label: &str, value: Result<f64>) -> fmt::Result {
    match value {
        Ok(value) => writeln!(f, "{:<30}{:>10.4}", label, value),
        Err(_) => writeln!(f, "{:<30}{:>10}", label, "n/a"),
    }
}

impl fmt::Display for GkfoCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<30}{:>10}", "charge", format!("{} -> {}", self.init_charge(), self.final_charge()))?;
        writeln!(f, "{:<30}{:>10.4}", "average ε (total)", self.ave_dielectric_tensor)?;
        writeln!(f, "{:<30}{:>10.4}", "average ε (electronic)", self.ave_electronic_dielectric_tensor)?;
        writeln!(f, "{:<30}{:>10.4}", "pc 1st term (eV)", self.pc_1st_term())?;
        writeln!(f, "{:<30}{:>10.4}", "pc 2nd term (eV)", self.pc_2nd_term)?;
        write_term(f, "alignment 1st term (eV)", self.alignment_1st_term())?;
        write_term(f, "alignment 2nd term (eV)", self.alignment_2nd_term())?;
        write_term(f, "alignment 3rd term (eV)", self.alignment_3rd_term())?;
        match self.correction_energy() {
            Ok(energy) => write!(f, "{:<30}{:>10.4}", "correction energy (eV)", energy),
            Err(_) => write!(f, "{:<30}{:>10}", "correction energy (eV)", "n/a"),
        }
    }
}

/// Everything needed to build a GKFO correction on top of an initial-state correction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GkfoInput {
    /// Added charge, +1 or -1
    pub additional_charge: i32,
    /// Calculation of the initial charge state
    pub initial: CalcResults,
    /// Calculation after the charge change at fixed ionic positions
    #[serde(rename = "final")]
    pub final_state: CalcResults,
    /// Total (ionic + electronic) dielectric tensor
    pub dielectric_tensor: DielectricTensor,
    /// Electronic (clamped-ion) dielectric tensor
    pub electronic_dielectric_tensor: DielectricTensor,
    /// Fractional coordinate of the defect centre
    pub defect_coords: [f64; 3],
}

/// Build the GKFO correction for a charge change from the initial state
///
/// Both preconditions are checked before any lattice sum is evaluated: the
/// added charge must be ±1, and the two calculations must hold the same
/// species in the same order.
pub fn make_gkfo_correction(
    efnv: &ExtendedFnvCorrection,
    input: &GkfoInput,
    config: &EwaldConfig,
) -> Result<GkfoCorrection> {
    if input.additional_charge.abs() != 1 {
        return Err(CorrectionError::AdditionalChargeError(input.additional_charge));
    }

    let initial = input.initial.structure();
    if let Some(reason) = initial.composition_mismatch(input.final_state.structure()) {
        return Err(CorrectionError::StructureMismatchError(reason));
    }
    if !initial
        .lattice()
        .approx_eq(input.final_state.structure().lattice(), LATTICE_MATCH_TOLERANCE)
    {
        return Err(CorrectionError::StructureMismatchError(format!(
            "lattices differ by more than {} Å",
            LATTICE_MATCH_TOLERANCE
        )));
    }

    let lattice = initial.lattice();
    let radius = efnv.defect_region_radius();
    let additional = f64::from(input.additional_charge);

    let mut sites = Vec::with_capacity(initial.site_count());
    let mut outside = Vec::new();
    for (index, coord) in initial.frac_coords().iter().enumerate() {
        let (specie, _) = initial.site(index)?;
        let distance = lattice.minimum_image_distance(&input.defect_coords, coord);
        let potential = input.final_state.potential(index)? - input.initial.potential(index)?;
        if distance > radius {
            outside.push(index);
        }
        sites.push(PotentialSite::new(specie, distance, potential, None));
    }
    debug!(
        "GKFO sites: {} total, {} outside {:.4} Å",
        sites.len(),
        outside.len(),
        radius
    );

    let model = AnisotropicPotential::new(lattice, &input.electronic_dielectric_tensor, config)?;
    let outside_coords: Vec<[f64; 3]> = outside
        .iter()
        .map(|&i| initial.frac_coords()[i])
        .collect();
    let potentials = model.model_potential(&input.defect_coords, &outside_coords);
    for (&i, phi) in outside.iter().zip(potentials) {
        sites[i].pc_potential = Some(phi * additional);
    }
    let pc_2nd_term = -model.lattice_energy() * additional * additional;

    if efnv.charge() == 0 {
        warn!("Initial state is neutral: the first point-charge term vanishes");
    }

    let correction = GkfoCorrection::new(
        efnv.clone(),
        input.additional_charge,
        pc_2nd_term,
        sites,
        input.dielectric_tensor.average_trace(),
        input.electronic_dielectric_tensor.average_trace(),
    )?;

    match correction.correction_energy() {
        Ok(energy) => info!(
            "GKFO correction for charge {} -> {}: {:.4} eV",
            correction.init_charge(),
            correction.final_charge(),
            energy
        ),
        Err(e) => warn!("GKFO correction is incomplete: {}", e),
    }

    Ok(correction)
}
