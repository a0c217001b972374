/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # defcorr-rs
//!
//! Finite-size charge corrections for point-defect supercell calculations.
//!
//! A charged defect computed in a periodic supercell interacts with its own
//! periodic images and with the neutralizing background. This crate provides:
//!
//! * anisotropic Ewald sums for a point charge in a dielectric medium
//!   described by a full 3×3 tensor ([`ewald`]);
//! * the extended FNV correction of a defect in a given charge state and the
//!   GKFO correction of a subsequent ±1 charge change ([`corrections`]).
//!
//! Structures are taken in already-parsed form ([`structure`]).

pub mod cli;
pub mod corrections;
pub mod ewald;
pub mod lattice;
pub mod structure;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub use corrections::{
    make_efnv_correction, make_gkfo_correction, CorrectionError, ExtendedFnvCorrection,
    GkfoCorrection,
};
pub use ewald::{AnisotropicPotential, DielectricTensor, EwaldConfig};
pub use lattice::Lattice;
pub use structure::{CalcResults, Structure};
