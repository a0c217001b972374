/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Configuration for the Ewald parameter search and lattice sums

use super::errors::{EwaldError, Result};
use crate::utils::constants::{DEFAULT_ACCURACY, DEFAULT_CONVERGENCE, UNIT_CONVERSION};
use serde::{Deserialize, Serialize};

/// Numerical settings shared by the optimizer, the summation and the correction builders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EwaldConfig {
    /// Product of cutoff radius and Ewald parameter in both spaces
    pub accuracy: f64,
    /// Accepted real/reciprocal lattice-point count ratio (must be ≥ 1)
    pub convergence: f64,
    /// Factor turning Gaussian-unit potentials into volts
    pub unit_conversion: f64,
}

impl Default for EwaldConfig {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ACCURACY,
            convergence: DEFAULT_CONVERGENCE,
            unit_conversion: UNIT_CONVERSION,
        }
    }
}

impl EwaldConfig {
    /// Default settings with a different accuracy
    pub fn with_accuracy(accuracy: f64) -> Self {
        Self {
            accuracy,
            ..Self::default()
        }
    }

    /// Check that every setting is in range
    pub fn validate(&self) -> Result<()> {
        if !(self.accuracy.is_finite() && self.accuracy > 0.0) {
            return Err(EwaldError::InvalidConfig(format!(
                "accuracy must be positive, got {}",
                self.accuracy
            )));
        }
        if !(self.convergence.is_finite() && self.convergence >= 1.0) {
            return Err(EwaldError::InvalidConfig(format!(
                "convergence ratio must be at least 1, got {}",
                self.convergence
            )));
        }
        if !(self.unit_conversion.is_finite() && self.unit_conversion > 0.0) {
            return Err(EwaldError::InvalidConfig(format!(
                "unit conversion must be positive, got {}",
                self.unit_conversion
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EwaldConfig::default();
        assert_eq!(config.accuracy, 25.0);
        assert_eq!(config.convergence, 1.05);
        assert_eq!(config.unit_conversion, 180.95128169876497);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(EwaldConfig::with_accuracy(0.0).validate().is_err());
        assert!(EwaldConfig::with_accuracy(f64::NAN).validate().is_err());

        let config = EwaldConfig {
            convergence: 0.9,
            ..EwaldConfig::default()
        };
        assert!(matches!(config.validate(), Err(EwaldError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EwaldConfig = serde_json::from_str(r#"{"accuracy": 10.0}"#).unwrap();
        assert_eq!(config.accuracy, 10.0);
        assert_eq!(config.convergence, 1.05);
    }
}
