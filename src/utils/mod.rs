// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and business logic.

pub mod file_name;
pub mod hash;

/// Raw and hex SHA-256 digests.
pub use hash::{sha256, sha256_hex};
/// Filesystem-safe document naming.
pub use file_name::{ensure_extension, sanitize_stem, suggested_document_name};
