/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Mathematical utility functions for the lattice sums
//!
//! This module provides the special functions needed by the Ewald summation,
//! most importantly the complementary error function that screens the
//! real-space Coulomb kernel.

use std::f64::consts::PI;

/// Argument above which erfc is evaluated with the continued fraction
const ERFC_SWITCH: f64 = 2.5;

/// Maximum number of terms in the series and continued-fraction expansions
const MAX_TERMS: usize = 500;

/// Error function erf(x)
///
/// # Arguments
///
/// * `x` - The input value
///
/// # Returns
///
/// The value of erf(x), accurate to close to machine precision
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return -erf(-x);
    }
    if x < ERFC_SWITCH {
        erf_series(x)
    } else {
        1.0 - erfc_continued_fraction(x)
    }
}

/// Complementary error function erfc(x) = 1 - erf(x)
///
/// For large arguments the value is computed directly rather than as
/// `1 - erf(x)`, so the relative accuracy is kept in the far tail where the
/// real-space Ewald terms live.
///
/// # Arguments
///
/// * `x` - The input value
///
/// # Returns
///
/// The value of erfc(x)
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    if x < ERFC_SWITCH {
        1.0 - erf_series(x)
    } else {
        erfc_continued_fraction(x)
    }
}

/// erf(x) = 2/√π · exp(-x²) · Σ 2ⁿ x²ⁿ⁺¹ / (2n+1)!!
///
/// All terms are positive, so there is no cancellation for x ≥ 0.
fn erf_series(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;

    for n in 1..MAX_TERMS {
        term *= 2.0 * x2 / (2 * n + 1) as f64;
        sum += term;
        if term < sum * f64::EPSILON {
            break;
        }
    }

    2.0 / PI.sqrt() * (-x2).exp() * sum
}

/// erfc(x) = exp(-x²)/√π · 1 / (x + (1/2) / (x + 1 / (x + (3/2) / (x + ...))))
///
/// Evaluated with the modified Lentz algorithm.
fn erfc_continued_fraction(x: f64) -> f64 {
    const TINY: f64 = 1e-300;

    let mut f = x;
    let mut c = x;
    let mut d = 0.0;

    for n in 1..MAX_TERMS {
        let a = n as f64 / 2.0;

        d = x + a * d;
        if d.abs() < TINY {
            d = TINY;
        }
        d = 1.0 / d;

        c = x + a / c;
        if c.abs() < TINY {
            c = TINY;
        }

        let delta = c * d;
        f *= delta;
        if (delta - 1.0).abs() < f64::EPSILON {
            break;
        }
    }

    (-x * x).exp() / (PI.sqrt() * f)
}
