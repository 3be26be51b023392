// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Standard-14 Helvetica metrics, ASCII transliteration, and greedy word wrapping.

/// Base fonts referenced by the page resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name used as `/BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Helvetica => &HELVETICA_WIDTHS,
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

// Advance widths for ASCII 0x20..=0x7E in 1/1000 em (Adobe AFM).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Transliterate to printable ASCII so every character maps into WinAnsi and the width tables.
///
/// Control characters other than `\n` become spaces.
pub fn to_ascii(text: &str) -> String {
    deunicode::deunicode(text)
        .chars()
        .map(|ch| match ch {
            '\n' => '\n',
            ' '..='~' => ch,
            _ => ' ',
        })
        .collect()
}

/// Width of `text` in points; characters outside printable ASCII use the space width.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let widths = font.widths();
    let units: u32 = text
        .chars()
        .map(|ch| {
            let idx = (ch as u32).wrapping_sub(0x20) as usize;
            u32::from(*widths.get(idx).unwrap_or(&widths[0]))
        })
        .sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap of already-transliterated text.
///
/// Explicit newlines start new lines (blank lines are kept). Words longer than `max_width`
/// are broken at character boundaries.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if text_width(&candidate, font, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width(word, font, size) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, font, size, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }

    lines
}

/// Split a single over-long word into chunks that fit `max_width`.
fn break_word(word: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if text_width(&current, font, size) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Trim `text` from the end until it fits `max_width`.
pub fn truncate_to_width(text: &str, font: Font, size: f32, max_width: f32) -> String {
    let mut out = text.to_string();
    while !out.is_empty() && text_width(&out, font, size) > max_width {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_afm_samples() {
        // "Sale" in Helvetica: S 667 + a 556 + l 222 + e 556.
        let width = text_width("Sale", Font::Helvetica, 10.0);
        assert!((width - 20.01).abs() < 1e-3);
        assert!(text_width("Sale", Font::HelveticaBold, 10.0) > width);
    }

    #[test]
    fn to_ascii_transliterates_and_strips_controls() {
        assert_eq!(to_ascii("Café\tnoël"), "Cafe noel");
        assert_eq!(to_ascii("a\nb"), "a\nb");
    }

    #[test]
    fn wrap_respects_max_width() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let lines = wrap_text(text, Font::Helvetica, 12.0, 100.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Helvetica, 12.0) <= 100.0, "{line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_keeps_explicit_newlines_and_blank_lines() {
        let lines = wrap_text("one\n\ntwo", Font::Helvetica, 12.0, 500.0);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn wrap_breaks_overlong_words() {
        let lines = wrap_text("WWWWWWWWWWWWWWWWWWWW", Font::Helvetica, 12.0, 40.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "WWWWWWWWWWWWWWWWWWWW");
    }

    #[test]
    fn truncate_shortens_until_it_fits() {
        let out = truncate_to_width("555-1234 call me maybe", Font::Helvetica, 10.0, 30.0);
        assert!(text_width(&out, Font::Helvetica, 10.0) <= 30.0);
        assert!("555-1234 call me maybe".starts_with(&out));
    }
}
