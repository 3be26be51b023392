// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: validation gate, page layout, and PDF rendering.

pub mod export;
pub mod fonts;
pub mod layout;
pub mod pdf;
