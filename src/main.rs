// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

mod app;
mod cli;
mod config;
mod error;
mod logic;
mod models;
mod mvu;
mod platform;
mod ui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match &cli.command {
        None => app::run(&config).map_err(|err| anyhow::anyhow!("{err}"))?,
        Some(Commands::Export(args)) => {
            let path = cli::export(args, &config)?;
            println!("{}", path.display());
        }
        Some(Commands::InitConfig { force }) => {
            let target = cli
                .config_target()
                .context("No configuration directory available; pass --config")?;
            cli::init_config(&config, &target, *force)?;
            println!("{}", target.display());
        }
    }
    Ok(())
}
