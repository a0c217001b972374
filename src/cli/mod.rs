/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Command Line Interface (CLI) module
//!
//! Thin front end over the library: reads JSON inputs, builds corrections
//! and writes them back as JSON.

use crate::corrections::{
    make_efnv_correction, make_gkfo_correction, EfnvInput, ExtendedFnvCorrection,
    GkfoCorrection, GkfoInput, ToJsonFile,
};
use crate::ewald::EwaldConfig;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// Finite-size charge corrections for point-defect supercells
#[derive(Parser, Debug)]
#[command(name = "defcorr")]
#[command(author = "Ameyanagi")]
#[command(version)]
#[command(about = "Extended FNV and GKFO charge corrections for defect supercells", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter selected by the verbosity flag
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the extended FNV correction of a charged defect
    Efnv(EfnvArgs),

    /// Build the GKFO correction of a ±1 charge change
    Gkfo(GkfoArgs),

    /// Print a stored correction
    Show(ShowArgs),
}

/// Ewald settings shared by the building commands
#[derive(Args, Debug, Clone)]
pub struct EwaldArgs {
    /// Accuracy of the lattice sums
    #[arg(long, default_value_t = crate::utils::constants::DEFAULT_ACCURACY)]
    pub accuracy: f64,

    /// Accepted ratio between real and reciprocal lattice point counts
    #[arg(long, default_value_t = crate::utils::constants::DEFAULT_CONVERGENCE)]
    pub convergence: f64,
}

impl EwaldArgs {
    pub fn to_config(&self) -> EwaldConfig {
        EwaldConfig {
            accuracy: self.accuracy,
            convergence: self.convergence,
            ..EwaldConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct EfnvArgs {
    /// JSON file with the defect and reference calculations
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output JSON file for the correction
    #[arg(short, long, default_value = "efnv_correction.json")]
    pub output: PathBuf,

    #[command(flatten)]
    pub ewald: EwaldArgs,
}

#[derive(Args, Debug)]
pub struct GkfoArgs {
    /// JSON file with the extended FNV correction of the initial state
    #[arg(short, long)]
    pub efnv: PathBuf,

    /// JSON file with the initial and final calculations
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output JSON file for the correction
    #[arg(short, long, default_value = "gkfo_correction.json")]
    pub output: PathBuf,

    #[command(flatten)]
    pub ewald: EwaldArgs,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Stored correction
    pub path: PathBuf,

    /// Read the file as a GKFO correction
    #[arg(long)]
    pub gkfo: bool,
}

/// Dispatch a parsed command
pub fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Efnv(args) => run_efnv(args),
        Commands::Gkfo(args) => run_gkfo(args),
        Commands::Show(args) => run_show(args),
    }
}

fn run_efnv(args: &EfnvArgs) -> Result<()> {
    let input = EfnvInput::from_json_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let correction = make_efnv_correction(&input, &args.ewald.to_config())?;
    correction
        .to_json_file(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("{}", correction);
    Ok(())
}

fn run_gkfo(args: &GkfoArgs) -> Result<()> {
    let efnv = ExtendedFnvCorrection::from_json_file(&args.efnv)
        .with_context(|| format!("Failed to read {}", args.efnv.display()))?;
    let input = GkfoInput::from_json_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let correction = make_gkfo_correction(&efnv, &input, &args.ewald.to_config())?;
    correction
        .to_json_file(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("{}", correction);
    Ok(())
}

fn run_show(args: &ShowArgs) -> Result<()> {
    let text = if args.gkfo {
        GkfoCorrection::from_json_file(&args.path)
            .with_context(|| format!("Failed to read {}", args.path.display()))?
            .to_string()
    } else {
        ExtendedFnvCorrection::from_json_file(&args.path)
            .with_context(|| format!("Failed to read {}", args.path.display()))?
            .to_string()
    };

    println!("{}", text);
    Ok(())
}
