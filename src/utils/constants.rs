/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical and numerical constants used in the correction calculations

/// e / (ε0 · 1 Å) in volts.
///
/// Multiplying a Gaussian-unit potential (charge in elementary charges, lengths
/// in Å, already divided by 4π) by this factor gives volts; for energies of a
/// unit charge the result is in eV.
pub const UNIT_CONVERSION: f64 = 180.95128169876497;

/// Default product of cutoff radius and Ewald parameter
pub const DEFAULT_ACCURACY: f64 = 25.0;

/// Default tolerance on the ratio of real to reciprocal lattice-point counts
pub const DEFAULT_CONVERGENCE: f64 = 1.05;

/// Hard cap on Ewald parameter optimization attempts
pub const MAX_OPTIMIZATION_ITERATIONS: usize = 10;

/// Determinant below which a lattice or tensor is treated as singular
pub const SINGULAR_TOLERANCE: f64 = 1e-10;

/// Largest lattice-vector component difference (Å) for two cells to count as the same
pub const LATTICE_MATCH_TOLERANCE: f64 = 1e-5;
