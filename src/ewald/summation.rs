/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Anisotropic Ewald lattice sums
//!
//! The potential of a periodic array of unit point charges embedded in a
//! medium with dielectric tensor ε, plus a neutralizing uniform background,
//! is split into
//!
//! * a real-space sum `Σ_R erfc(γ d) / d / sqrt(det ε)` with
//!   `d = sqrt((R + r) · ε⁻¹ · (R + r))`,
//! * a reciprocal-space sum `(4π / V) Σ_{G≠0} exp(-G·ε·G / 4γ²) / (G·ε·G) cos(G · r)`,
//! * the self term `-2γ / sqrt(π det ε)` removing the Gaussian's own potential,
//! * the background term `-π / (V γ²)` from the G → 0 limit.
//!
//! All terms returned here are divided by 4π, so multiplying by
//! [`UNIT_CONVERSION`](crate::utils::constants::UNIT_CONVERSION) gives volts
//! for lengths in Å and charges in units of e.
//!
//! The kernel damping γ is the optimizer's effective damping scaled by
//! `det(ε)^(1/6)`, i.e. the damping measured in the ε-metric. Lattice images
//! are enumerated on integer boxes that bound the metric cutoff spheres and
//! then filtered, so the truncation error follows the accuracy setting for
//! any positive-definite tensor.

use super::config::EwaldConfig;
use super::dielectric::DielectricTensor;
use super::errors::{EwaldError, Result};
use super::optimizer::{EwaldParameter, EwaldParameterOptimizer};
use crate::lattice::{wrap_fractional, Lattice, Vector3D};
use crate::utils::linear_algebra::quadratic_form;
use crate::utils::math::erfc;
use log::debug;
use nalgebra::Vector3;
use ndarray::{Array1, Array2};
use std::f64::consts::PI;

/// Separations below this length (Å) are treated as the charge itself
const ZERO_SEPARATION: f64 = 1e-10;

/// Precomputed lattice sums for one lattice, dielectric tensor and parameter
#[derive(Debug, Clone)]
pub struct EwaldSummation {
    lattice: Lattice,
    dielectric: DielectricTensor,
    param: EwaldParameter,
    accuracy: f64,
    gamma: f64,
    /// Candidate real-space translations, one Cartesian vector per row
    real_translations: Array2<f64>,
    /// Reciprocal vectors inside the cutoff, one Cartesian vector per row
    reciprocal_vectors: Array2<f64>,
    /// exp(-G·ε·G / 4γ²) / (G·ε·G) for each reciprocal vector
    reciprocal_weights: Array1<f64>,
}

impl EwaldSummation {
    /// Optimize the Ewald parameter and prepare the lattice sums
    pub fn new(lattice: &Lattice, dielectric: &DielectricTensor, config: &EwaldConfig) -> Result<Self> {
        let param = EwaldParameterOptimizer::new(lattice, dielectric, config)?.optimize()?;
        Self::with_param(lattice, dielectric, param, config)
    }

    /// Prepare the lattice sums for an already fixed Ewald parameter
    pub fn with_param(
        lattice: &Lattice,
        dielectric: &DielectricTensor,
        param: EwaldParameter,
        config: &EwaldConfig,
    ) -> Result<Self> {
        config.validate()?;

        let optimizer = EwaldParameterOptimizer::new(lattice, dielectric, config)?;
        let gamma = optimizer.effective_damping(param.value()) * dielectric.determinant().powf(1.0 / 6.0);

        let real_translations = real_translations(lattice, dielectric, gamma, config.accuracy)?;
        let (reciprocal_vectors, reciprocal_weights) =
            reciprocal_terms(lattice, dielectric, gamma, config.accuracy)?;

        debug!(
            "Ewald sums prepared: gamma = {:.6} 1/Å, {} real-space candidates, {} reciprocal vectors",
            gamma,
            real_translations.nrows(),
            reciprocal_vectors.nrows()
        );

        Ok(Self {
            lattice: lattice.clone(),
            dielectric: dielectric.clone(),
            param,
            accuracy: config.accuracy,
            gamma,
            real_translations,
            reciprocal_vectors,
            reciprocal_weights,
        })
    }

    /// The lattice
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// The dielectric tensor
    pub fn dielectric(&self) -> &DielectricTensor {
        &self.dielectric
    }

    /// The optimized Ewald parameter
    pub fn param(&self) -> EwaldParameter {
        self.param
    }

    /// Kernel damping γ (1/Å)
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Accuracy the sums were prepared with
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Number of candidate real-space translations
    pub fn real_point_count(&self) -> usize {
        self.real_translations.nrows()
    }

    /// Number of reciprocal vectors inside the cutoff
    pub fn reciprocal_point_count(&self) -> usize {
        self.reciprocal_vectors.nrows()
    }

    /// Real-space sum at a fractional shift
    ///
    /// With `include_self = false` the term where the translated shift
    /// vanishes is dropped; this is how the potential of the periodic images
    /// at the charge's own site is obtained. With `include_self = true` every
    /// image is kept, and a vanishing separation diverges to +∞.
    pub fn real_part(&self, shift: &[f64; 3], include_self: bool) -> f64 {
        let r = self.cartesian_shift(shift);
        let inverse = self.dielectric.inverse();
        let mut sum = 0.0;

        for translation in self.real_translations.rows() {
            let v = Vector3::new(
                translation[0] + r.x,
                translation[1] + r.y,
                translation[2] + r.z,
            );
            let distance = quadratic_form(inverse, &v).sqrt();
            let x = self.gamma * distance;

            if x > self.accuracy {
                continue;
            }
            if distance < ZERO_SEPARATION {
                if include_self {
                    return f64::INFINITY;
                }
                continue;
            }

            sum += erfc(x) / distance;
        }

        sum / (4.0 * PI * self.dielectric.root_det())
    }

    /// Reciprocal-space sum at a fractional shift
    pub fn reciprocal_part(&self, shift: &[f64; 3]) -> f64 {
        let r = self.cartesian_shift(shift);

        let sum: f64 = self
            .reciprocal_vectors
            .rows()
            .into_iter()
            .zip(self.reciprocal_weights.iter())
            .map(|(g, weight)| weight * (g[0] * r.x + g[1] * r.y + g[2] * r.z).cos())
            .sum();

        sum / self.lattice.volume()
    }

    /// Potential of the Gaussian screening charge at its own centre
    pub fn self_term(&self) -> f64 {
        -self.gamma / (2.0 * PI.powf(1.5) * self.dielectric.root_det())
    }

    /// Constant from the uniform neutralizing background
    pub fn background_term(&self) -> f64 {
        -1.0 / (4.0 * self.lattice.volume() * self.gamma * self.gamma)
    }

    fn cartesian_shift(&self, shift: &[f64; 3]) -> Vector3D {
        self.lattice.frac_to_cart(&wrap_fractional(shift))
    }
}

/// Translations whose images of any wrapped shift can fall inside the metric cutoff
fn real_translations(
    lattice: &Lattice,
    dielectric: &DielectricTensor,
    gamma: f64,
    accuracy: f64,
) -> Result<Array2<f64>> {
    // γ·sqrt(v·ε⁻¹·v) ≥ γ|v|/sqrt(λ_max), so this sphere contains the metric cutoff
    let cutoff = accuracy * dielectric.max_eigenvalue().sqrt() / gamma;
    let spacings = lattice.interplanar_spacings();
    // Wrapped shifts move each fractional component by at most one half
    let ranges = spacings.map(|d| (cutoff / d).ceil() as i64 + 1);

    let basis = lattice.vectors();
    let mut flat = Vec::new();
    for i in -ranges[0]..=ranges[0] {
        for j in -ranges[1]..=ranges[1] {
            for k in -ranges[2]..=ranges[2] {
                let t = Vector3D::combine(&basis, [i as f64, j as f64, k as f64]);
                flat.extend_from_slice(&t.to_array());
            }
        }
    }

    let rows = flat.len() / 3;
    Array2::from_shape_vec((rows, 3), flat).map_err(|e| EwaldError::LatticePoints(e.to_string()))
}

/// Non-zero reciprocal vectors inside the metric cutoff and their Gaussian weights
fn reciprocal_terms(
    lattice: &Lattice,
    dielectric: &DielectricTensor,
    gamma: f64,
    accuracy: f64,
) -> Result<(Array2<f64>, Array1<f64>)> {
    // G·ε·G ≥ λ_min |G|², so this sphere contains the metric cutoff
    let cutoff = 2.0 * gamma * accuracy / dielectric.min_eigenvalue().sqrt();
    let ranges = lattice
        .lengths()
        .map(|length| (cutoff * length / (2.0 * PI)).ceil() as i64);
    let max_exponent = accuracy * accuracy;

    let basis = lattice.reciprocal_lattice().vectors();
    let mut flat = Vec::new();
    let mut weights = Vec::new();
    for h in -ranges[0]..=ranges[0] {
        for k in -ranges[1]..=ranges[1] {
            for l in -ranges[2]..=ranges[2] {
                if h == 0 && k == 0 && l == 0 {
                    continue;
                }
                let g = Vector3D::combine(&basis, [h as f64, k as f64, l as f64]);
                let g_eps_g = quadratic_form(dielectric.matrix(), &g.into());
                let exponent = g_eps_g / (4.0 * gamma * gamma);
                if exponent > max_exponent {
                    continue;
                }
                flat.extend_from_slice(&g.to_array());
                weights.push((-exponent).exp() / g_eps_g);
            }
        }
    }

    let rows = weights.len();
    let vectors =
        Array2::from_shape_vec((rows, 3), flat).map_err(|e| EwaldError::LatticePoints(e.to_string()))?;
    Ok((vectors, Array1::from(weights)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vacuum_cubic(accuracy: f64) -> EwaldSummation {
        EwaldSummation::new(
            &Lattice::cubic(10.0).unwrap(),
            &DielectricTensor::isotropic(1.0).unwrap(),
            &EwaldConfig::with_accuracy(accuracy),
        )
        .unwrap()
    }

    #[test]
    fn test_madelung_constant_of_simple_cubic() {
        // Potential at a charge's own site from its images and the background:
        // -α / a with α = 2.837297 for the neutralized simple cubic lattice
        let ewald = vacuum_cubic(6.0);
        let zero = [0.0; 3];
        let total = ewald.real_part(&zero, false)
            + ewald.reciprocal_part(&zero)
            + ewald.self_term()
            + ewald.background_term();

        assert_relative_eq!(total * 4.0 * PI * 10.0, -2.837297, epsilon = 1e-6);
    }

    #[test]
    fn test_self_inclusion_at_zero_shift_diverges() {
        let ewald = vacuum_cubic(5.0);
        assert!(ewald.real_part(&[0.0; 3], true).is_infinite());
        assert!(ewald.real_part(&[0.0; 3], false).is_finite());
    }

    #[test]
    fn test_sum_is_periodic_in_shift() {
        let ewald = vacuum_cubic(5.0);
        let shift = [0.3, 0.1, -0.2];
        let image = [1.3, -0.9, 0.8];

        assert_relative_eq!(
            ewald.real_part(&shift, true),
            ewald.real_part(&image, true),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            ewald.reciprocal_part(&shift),
            ewald.reciprocal_part(&image),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_total_is_independent_of_parameter() {
        let lattice = Lattice::cubic(10.0).unwrap();
        let eps = DielectricTensor::isotropic(1.0).unwrap();
        let config = EwaldConfig::with_accuracy(7.0);
        let shift = [0.25, 0.1, 0.0];

        let total = |param: f64| {
            let ewald =
                EwaldSummation::with_param(&lattice, &eps, EwaldParameter::new(param).unwrap(), &config)
                    .unwrap();
            ewald.real_part(&shift, true) + ewald.reciprocal_part(&shift) + ewald.background_term()
        };

        assert_relative_eq!(total(1.4), total(2.2), epsilon = 1e-10);
    }
}
