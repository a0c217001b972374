/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Structure module
//!
//! Parsed supercell structures and the per-site results of DFT calculations
//! that feed the charge corrections. Reading structure files is left to
//! external tools; these types only hold and validate the data.

pub mod calc_results;
pub mod crystal;
pub mod errors;

pub use calc_results::CalcResults;
pub use crystal::Structure;
pub use errors::{Result, StructureError};
