// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain error type shared by validation, layout, and PDF export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for flyer operations.
pub type Result<T> = std::result::Result<T, FlyerError>;

/// Errors raised while validating or exporting a flyer.
#[derive(Error, Debug)]
pub enum FlyerError {
    /// At least one of title, body, contact, or image is missing.
    #[error("All Information Not Provided")]
    MissingField,

    /// The picked file could not be decoded as an image.
    #[error("Failed to decode image {path:?}: {reason}")]
    ImageDecode { path: PathBuf, reason: String },

    /// The PDF object graph could not be built or serialized.
    #[error("PDF generation error: {0}")]
    Pdf(String),

    /// I/O error when writing the document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<lopdf::Error> for FlyerError {
    fn from(err: lopdf::Error) -> Self {
        FlyerError::Pdf(err.to_string())
    }
}

impl FlyerError {
    /// True when the error stems from incomplete user input.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, FlyerError::MissingField)
    }
}
