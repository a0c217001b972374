/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Finite-size charge corrections
//!
//! This module builds the extended FNV correction of a charged defect and the
//! GKFO correction of a subsequent ±1 charge change, and persists both as JSON.

pub mod efnv;
pub mod errors;
pub mod gkfo;
pub mod io;
pub mod site;

pub use efnv::{make_efnv_correction, EfnvInput, ExtendedFnvCorrection};
pub use errors::{CorrectionError, Result};
pub use gkfo::{make_gkfo_correction, GkfoCorrection, GkfoInput};
pub use io::ToJsonFile;
pub use site::PotentialSite;
