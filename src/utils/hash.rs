// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Hashing helper utilities.

use sha2::{Digest, Sha256};

/// Raw SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

/// Compute the SHA-256 hash of a byte slice and return its lowercase hex digest.
///
/// # Examples
///
/// ```rust,ignore
/// let digest = flyerbuilder::utils::sha256_hex(b"flyer");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
