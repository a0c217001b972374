/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Main executable for defcorr-rs

use clap::Parser;
use defcorr_rs::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    log::debug!("defcorr-rs v{}", defcorr_rs::VERSION);
    run(&cli.command)
}
