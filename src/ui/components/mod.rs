// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui components emitting root MVU messages.

pub mod image_well;
pub mod preview;
pub mod share_sheet;
