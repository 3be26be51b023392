// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Flyer form domain model and the all-or-nothing validation gate (UI-agnostic).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

use crate::error::{FlyerError, Result};

/// Decoded picture placed in the flyer's image well.
///
/// Pixels are shared behind an `Arc` so snapshots handed to worker threads stay cheap.
#[derive(Clone)]
pub struct FlyerImage {
    pixels: Arc<RgbaImage>,
    source: Option<PathBuf>,
}

impl FlyerImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
            source: None,
        }
    }

    /// Remember where the picture came from (shown in the image well tooltip).
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Decode an image file from disk into RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`FlyerError::ImageDecode`] when the file is unreadable or not a supported raster format.
    pub fn load(path: &Path) -> Result<Self> {
        let decoded = image::open(path).map_err(|err| FlyerError::ImageDecode {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(Self::from_rgba(decoded.to_rgba8()).with_source(path))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// A zero-sized bitmap counts as no image at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether any pixel is not fully opaque.
    pub fn has_transparency(&self) -> bool {
        self.pixels.pixels().any(|p| p.0[3] != u8::MAX)
    }
}

impl PartialEq for FlyerImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
            || (self.pixels.dimensions() == other.pixels.dimensions()
                && self.pixels.as_raw() == other.pixels.as_raw())
    }
}

impl fmt::Debug for FlyerImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlyerImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("source", &self.source)
            .finish()
    }
}

/// The four user inputs composed into a flyer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlyerInput {
    /// Single-line headline.
    pub title: String,
    /// Multi-line body copy.
    pub body: String,
    /// Multi-line contact details repeated on the tear-off tabs.
    pub contact: String,
    /// Picture shown under the title.
    pub image: Option<FlyerImage>,
}

/// Borrowed view of a fully populated [`FlyerInput`].
#[derive(Clone, Copy, Debug)]
pub struct FlyerFields<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub image: &'a FlyerImage,
    pub contact: &'a str,
}

impl FlyerInput {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        contact: impl Into<String>,
        image: Option<FlyerImage>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            contact: contact.into(),
            image,
        }
    }

    /// Borrow all four fields, or fail with [`FlyerError::MissingField`] if any is absent.
    ///
    /// Any non-empty text counts as present, including whitespace.
    pub fn fields(&self) -> Result<FlyerFields<'_>> {
        let title = non_empty(&self.title)?;
        let body = non_empty(&self.body)?;
        let contact = non_empty(&self.contact)?;
        let image = self
            .image
            .as_ref()
            .filter(|img| !img.is_empty())
            .ok_or(FlyerError::MissingField)?;

        Ok(FlyerFields {
            title,
            body,
            image,
            contact,
        })
    }
}

fn non_empty(value: &str) -> Result<&str> {
    if value.is_empty() {
        Err(FlyerError::MissingField)
    } else {
        Ok(value)
    }
}

/// True iff title, body, contact are non-empty and an image is present.
pub fn validate(input: &FlyerInput) -> bool {
    input.fields().is_ok()
}

#[cfg(test)]
pub(crate) fn sample_image(width: u32, height: u32) -> FlyerImage {
    FlyerImage::from_rgba(RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([200, 40, 40, 255]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn complete() -> FlyerInput {
        FlyerInput::new("Sale", "50% off", "555-1234", Some(sample_image(4, 3)))
    }

    #[test]
    fn validate_accepts_complete_input() {
        assert!(validate(&complete()));
    }

    // Every single missing field must fail the whole gate.
    #[test]
    fn validate_rejects_each_missing_field() {
        let mut no_title = complete();
        no_title.title.clear();
        let mut no_body = complete();
        no_body.body.clear();
        let mut no_contact = complete();
        no_contact.contact.clear();
        let mut no_image = complete();
        no_image.image = None;

        for input in [no_title, no_body, no_contact, no_image] {
            assert!(!validate(&input), "expected rejection for {input:?}");
        }
    }

    #[test]
    fn validate_accepts_whitespace_only_text() {
        let input = FlyerInput::new(" ", "x", "  \n\t", Some(sample_image(2, 2)));
        assert!(validate(&input));
    }

    #[test]
    fn validate_rejects_zero_sized_image() {
        let mut input = complete();
        input.image = Some(sample_image(0, 0));
        assert!(!validate(&input));
    }

    #[test]
    fn fields_preserve_original_text() {
        let input = FlyerInput::new(" Sale ", "line 1\nline 2", "555-1234", Some(sample_image(1, 1)));
        let fields = input.fields().expect("complete");
        assert_eq!(fields.title, " Sale ");
        assert_eq!(fields.body, "line 1\nline 2");
        assert_eq!(fields.contact, "555-1234");
    }

    #[test]
    fn load_decodes_png_and_records_source() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pic.png");
        RgbaImage::from_pixel(5, 7, image::Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();

        let img = FlyerImage::load(&path).expect("decoded");

        assert_eq!((img.width(), img.height()), (5, 7));
        assert_eq!(img.source(), Some(path.as_path()));
        assert!(!img.has_transparency());
    }

    #[test]
    fn load_rejects_non_image_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fake.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = FlyerImage::load(&path).unwrap_err();
        assert!(matches!(err, FlyerError::ImageDecode { .. }));
    }

    #[test]
    fn clones_compare_equal() {
        let img = sample_image(2, 2);
        assert_eq!(img.clone(), img);
        assert_ne!(img, sample_image(2, 3));
    }
}
