// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line surface: window launch options and the headless `export` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{FlyerConfig, default_config_path};
use crate::logic::export::DocumentExporter;
use crate::logic::layout::PageSize;
use crate::logic::pdf::PdfFlyerExporter;
use crate::models::FlyerInput;
use crate::mvu::Alert;
use crate::platform::load_picked_image;

#[derive(Parser, Debug)]
#[command(name = "flyerbuilder")]
#[command(version)]
#[command(about = "Compose a title, body, contact details, and a photo into a one-page PDF flyer", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to the per-user config directory)
    #[arg(long, value_name = "FILE", env = "FLYERBUILDER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory receiving the shared document
    #[arg(long, value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Paper size
    #[arg(long, value_enum, global = true)]
    pub page_size: Option<PaperArg>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a flyer without opening the window
    Export(ExportArgs),

    /// Write the effective configuration to the config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Headline
    #[arg(long)]
    pub title: String,

    /// Body text
    #[arg(long)]
    pub body: String,

    /// Contact details shown on the tear-off tabs
    #[arg(long)]
    pub contact: String,

    /// Picture file
    #[arg(long, value_name = "FILE")]
    pub image: PathBuf,

    /// Output file (defaults to the configured shared document)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PaperArg {
    Letter,
    A4,
}

impl From<PaperArg> for PageSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => PageSize::Letter,
            PaperArg::A4 => PageSize::A4,
        }
    }
}

impl Cli {
    /// Load the configuration and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<FlyerConfig> {
        let mut config = FlyerConfig::load(self.config.as_deref())?;
        if let Some(dir) = &self.output_dir {
            config.document_dir = dir.clone();
        }
        if let Some(size) = self.page_size {
            config.page_size = size.into();
        }
        Ok(config)
    }

    /// Where `init-config` writes.
    pub fn config_target(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_config_path)
    }
}

/// Validate the inputs and save the flyer through the exporter's save path.
pub fn export(args: &ExportArgs, config: &FlyerConfig) -> Result<PathBuf> {
    let image = load_picked_image(&args.image)
        .with_context(|| format!("Failed to load image {}", args.image.display()))?;
    let input = FlyerInput::new(&args.title, &args.body, &args.contact, Some(image));

    let Ok(fields) = input.fields() else {
        let alert = Alert::missing_information();
        bail!("{}: {}", alert.title, alert.message);
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.document_path());
    let exporter = PdfFlyerExporter::new(config.page_size, output);
    let path = exporter
        .save_document(fields.title, fields.body, fields.image, fields.contact)
        .context("Failed to create flyer")?;
    Ok(path)
}

/// Persist `config` unless the file exists and `force` is not set.
pub fn init_config(config: &FlyerConfig, target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            target.display()
        );
    }
    config.save(target)?;
    log::info!("Wrote config to {}", target.display());
    Ok(())
}
