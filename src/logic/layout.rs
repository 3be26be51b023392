// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Single-page flyer composition shared by the PDF renderer and the in-app preview.
//!
//! Coordinates are in PDF points with the origin at the top-left corner and y growing
//! downwards; the renderer flips them into PDF user space.

use serde::{Deserialize, Serialize};

use super::fonts::{self, Font};

const MARGIN: f32 = 36.0;
const SECTION_GAP: f32 = 18.0;
const TITLE_SIZE: f32 = 18.0;
const MAX_TITLE_LINES: usize = 4;
const BODY_SIZE: f32 = 12.0;
const CONTACT_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = 1.2;
const IMAGE_MAX_WIDTH: f32 = 0.8;
const IMAGE_MAX_HEIGHT: f32 = 0.4;
const TEAR_STRIP_FRACTION: f32 = 0.2;
const TEAR_TAB_COUNT: usize = 8;
const TEAR_TAB_PADDING: f32 = 6.0;
/// Fraction of the font size above the baseline.
const ASCENT: f32 = 0.8;

/// Supported paper sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
        }
    }
}

/// Axis-aligned rectangle in top-left page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// One horizontal line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub font: Font,
}

/// One line of contact text running bottom-to-top inside a tear-off tab.
#[derive(Clone, Debug, PartialEq)]
pub struct VerticalLine {
    pub text: String,
    /// Baseline position along the x axis.
    pub baseline_x: f32,
    /// Where the text starts (its bottom end).
    pub start_y: f32,
    pub size: f32,
}

/// A cut-out tab repeating the contact details.
#[derive(Clone, Debug, PartialEq)]
pub struct TearOff {
    pub bounds: Rect,
    pub lines: Vec<VerticalLine>,
}

/// Positioned content of one flyer page.
#[derive(Clone, Debug, PartialEq)]
pub struct FlyerLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub title: Vec<TextLine>,
    /// Title lines past [`MAX_TITLE_LINES`].
    pub dropped_title_lines: usize,
    pub image: Option<Rect>,
    pub body: Vec<TextLine>,
    /// Body lines that did not fit above the tear-off strip.
    pub dropped_body_lines: usize,
    pub tear_strip: Rect,
    pub tear_offs: Vec<TearOff>,
}

/// Lay out title, image, body, and tear-off tabs on a single page.
///
/// `image_size` is the source pixel size; a zero dimension leaves no image slot.
pub fn compose(
    title: &str,
    body: &str,
    image_size: (u32, u32),
    contact: &str,
    page: PageSize,
) -> FlyerLayout {
    let (page_width, page_height) = page.dimensions();
    let content_width = page_width - 2.0 * MARGIN;

    let tear_strip = Rect {
        x: 0.0,
        y: page_height * (1.0 - TEAR_STRIP_FRACTION),
        width: page_width,
        height: page_height * TEAR_STRIP_FRACTION,
    };

    let title_leading = TITLE_SIZE * LINE_HEIGHT;
    let wrapped_title = fonts::wrap_text(
        fonts::to_ascii(title).trim(),
        Font::HelveticaBold,
        TITLE_SIZE,
        content_width,
    );
    let dropped_title_lines = wrapped_title.len().saturating_sub(MAX_TITLE_LINES);
    let title_lines: Vec<TextLine> = wrapped_title
        .into_iter()
        .take(MAX_TITLE_LINES)
        .enumerate()
        .map(|(i, text)| {
            let width = fonts::text_width(&text, Font::HelveticaBold, TITLE_SIZE);
            TextLine {
                x: (page_width - width) / 2.0,
                baseline: MARGIN + i as f32 * title_leading + TITLE_SIZE * ASCENT,
                size: TITLE_SIZE,
                font: Font::HelveticaBold,
                text,
            }
        })
        .collect();
    let title_bottom = MARGIN + title_lines.len() as f32 * title_leading;

    let image_top = title_bottom + SECTION_GAP;
    let image_room = (tear_strip.y - SECTION_GAP - image_top).max(0.0);
    let image = fit_image(
        image_size,
        page_width,
        page_height * IMAGE_MAX_HEIGHT,
        image_room,
        image_top,
    );
    let body_top = image.map_or(title_bottom, |rect| rect.bottom()) + SECTION_GAP;

    let body_leading = BODY_SIZE * LINE_HEIGHT;
    let body_limit = tear_strip.y - SECTION_GAP / 2.0;
    let wrapped = fonts::wrap_text(
        fonts::to_ascii(body).trim_end(),
        Font::Helvetica,
        BODY_SIZE,
        content_width,
    );
    let total_body = wrapped.len();
    let body: Vec<TextLine> = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| TextLine {
            text,
            x: MARGIN,
            baseline: body_top + i as f32 * body_leading + BODY_SIZE * ASCENT,
            size: BODY_SIZE,
            font: Font::Helvetica,
        })
        .take_while(|line| line.baseline - BODY_SIZE * ASCENT + body_leading <= body_limit)
        .collect();
    let dropped_body_lines = total_body - body.len();

    let tear_offs = layout_tear_offs(contact, &tear_strip);

    FlyerLayout {
        page_width,
        page_height,
        title: title_lines,
        dropped_title_lines,
        image,
        body,
        dropped_body_lines,
        tear_strip,
        tear_offs,
    }
}

/// Aspect-fit the image into the allowed box, centered horizontally at `top`.
///
/// The height never exceeds `room`, the space left above the tear-off strip.
fn fit_image(
    size: (u32, u32),
    page_width: f32,
    max_height: f32,
    room: f32,
    top: f32,
) -> Option<Rect> {
    let (w, h) = size;
    if w == 0 || h == 0 {
        return None;
    }
    let max_width = page_width * IMAGE_MAX_WIDTH;
    let max_height = max_height.min(room);
    let scale = (max_width / w as f32).min(max_height / h as f32);
    let width = w as f32 * scale;
    let height = h as f32 * scale;
    Some(Rect {
        x: (page_width - width) / 2.0,
        y: top,
        width,
        height,
    })
}

fn layout_tear_offs(contact: &str, strip: &Rect) -> Vec<TearOff> {
    let tab_width = strip.width / TEAR_TAB_COUNT as f32;
    let leading = CONTACT_SIZE * LINE_HEIGHT;
    let run_length = strip.height - 2.0 * TEAR_TAB_PADDING;
    let max_lines = ((tab_width - 2.0 * TEAR_TAB_PADDING) / leading).floor().max(1.0) as usize;

    let contact = fonts::to_ascii(contact);
    let texts: Vec<String> = contact
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_lines)
        .map(|line| fonts::truncate_to_width(line, Font::Helvetica, CONTACT_SIZE, run_length))
        .collect();

    (0..TEAR_TAB_COUNT)
        .map(|i| {
            let bounds = Rect {
                x: strip.x + i as f32 * tab_width,
                y: strip.y,
                width: tab_width,
                height: strip.height,
            };
            let lines = texts
                .iter()
                .enumerate()
                .map(|(n, text)| VerticalLine {
                    text: text.clone(),
                    baseline_x: bounds.x
                        + TEAR_TAB_PADDING
                        + CONTACT_SIZE * ASCENT
                        + n as f32 * leading,
                    start_y: bounds.bottom() - TEAR_TAB_PADDING,
                    size: CONTACT_SIZE,
                })
                .collect();
            TearOff { bounds, lines }
        })
        .collect()
}
