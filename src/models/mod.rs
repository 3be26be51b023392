// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types and validation helpers shared between UI and export logic.

pub mod document;
pub mod flyer;

pub use document::{PdfDocument, ShareRequest};
pub use flyer::{FlyerImage, FlyerInput, validate};
