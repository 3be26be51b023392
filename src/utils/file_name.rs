// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Filesystem-safe names for generated flyer documents.

use std::path::PathBuf;

const FALLBACK_STEM: &str = "flyer";

/// Turn free text (usually the flyer title) into a portable file stem.
///
/// Unicode is transliterated to ASCII, anything outside `[A-Za-z0-9_-]` becomes `_`,
/// runs of `_` collapse, and leading/trailing `_` are trimmed. Windows device names get a
/// trailing underscore. Empty results fall back to `flyer`.
pub fn sanitize_stem(value: &str) -> String {
    let ascii = deunicode::deunicode(value);
    let mut out = String::with_capacity(ascii.len());
    for ch in ascii.chars() {
        let mapped = if ch.is_ascii_alphanumeric() || ch == '-' { ch } else { '_' };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }

    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        return FALLBACK_STEM.to_string();
    }

    let upper = trimmed.to_ascii_uppercase();
    let reserved = matches!(upper.as_str(), "CON" | "PRN" | "AUX" | "NUL")
        || ((upper.starts_with("COM") || upper.starts_with("LPT"))
            && upper.len() == 4
            && upper.as_bytes()[3].is_ascii_digit()
            && upper.as_bytes()[3] != b'0');

    if reserved {
        format!("{trimmed}_")
    } else {
        trimmed.to_string()
    }
}

/// Suggest a lowercase `.pdf` file name for a flyer title.
pub fn suggested_document_name(title: &str) -> String {
    format!("{}.pdf", sanitize_stem(title).to_ascii_lowercase())
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps an existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let keep = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );
    if !keep {
        path.set_extension(extension);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_transliterates_and_collapses_separators() {
        assert_eq!(sanitize_stem("Garage Sale: Größe 50%!"), "Garage_Sale_Grosse_50");
    }

    #[test]
    fn stem_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_stem("  ///  "), "flyer");
        assert_eq!(sanitize_stem(""), "flyer");
    }

    #[test]
    fn stem_suffixes_windows_device_names() {
        assert_eq!(sanitize_stem("con"), "con_");
        assert_eq!(sanitize_stem("LPT3"), "LPT3_");
        assert_eq!(sanitize_stem("COM0"), "COM0");
    }

    #[test]
    fn suggested_name_is_lowercase_pdf() {
        assert_eq!(suggested_document_name("Bake Sale"), "bake_sale.pdf");
    }

    #[test]
    fn ensure_extension_replaces_or_keeps() {
        assert_eq!(
            ensure_extension(PathBuf::from("out/flyer.txt"), "pdf"),
            PathBuf::from("out/flyer.pdf")
        );
        assert_eq!(
            ensure_extension(PathBuf::from("flyer.PDF"), "pdf"),
            PathBuf::from("flyer.PDF")
        );
        assert_eq!(
            ensure_extension(PathBuf::from("flyer"), "pdf"),
            PathBuf::from("flyer.pdf")
        );
    }
}
