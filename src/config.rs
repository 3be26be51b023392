// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! User configuration: where the generated document lands and which paper size to use.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logic::layout::PageSize;
use crate::utils::{ensure_extension, sanitize_stem};

const APP_DIR: &str = "flyerbuilder";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_DOCUMENT_NAME: &str = "myCoolPDF.pdf";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerConfig {
    /// Directory receiving the shared document.
    pub document_dir: PathBuf,
    /// Fixed file name of the shared document.
    pub document_name: String,
    pub page_size: PageSize,
}

impl Default for FlyerConfig {
    fn default() -> Self {
        Self {
            document_dir: default_document_dir(),
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            page_size: PageSize::default(),
        }
    }
}

impl FlyerConfig {
    /// Full path of the shared document, with a sanitized stem and a `.pdf` extension.
    pub fn document_path(&self) -> PathBuf {
        let stem = Path::new(&self.document_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        ensure_extension(self.document_dir.join(sanitize_stem(stem)), "pdf")
    }

    /// Load configuration from an explicit file, or from the per-user default location.
    ///
    /// An explicit path must exist; a missing default file yields [`FlyerConfig::default`].
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Persist to `path`, creating the parent directory when needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }
}

/// `<config_dir>/flyerbuilder/config.json` when the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn default_document_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
