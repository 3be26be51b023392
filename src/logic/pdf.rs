// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Flyer PDF rendering on top of `lopdf`.
//!
//! Responsibilities:
//! - Build the single-page object graph (fonts, image XObject, content stream).
//! - Flate-compress the content and image streams.
//! - Stamp document info and a content-derived trailer `/ID`.

use std::io::Write;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use time::OffsetDateTime;

use super::export::DocumentExporter;
use super::fonts::{self, Font};
use super::layout::{self, FlyerLayout, PageSize};
use crate::config::FlyerConfig;
use crate::error::{FlyerError, Result};
use crate::models::{FlyerImage, PdfDocument};
use crate::utils::sha256;

const PDF_VERSION: &str = "1.7";
const CREATOR: &str = "Flyer Builder";
const IMAGE_RESOURCE: &str = "Im1";
const CUT_LINE_WIDTH: f32 = 0.5;
const CUT_LINE_DASH: i64 = 4;

/// Document exporter producing one Letter/A4 page per flyer.
#[derive(Clone, Debug)]
pub struct PdfFlyerExporter {
    page_size: PageSize,
    output_path: PathBuf,
}

impl PdfFlyerExporter {
    pub fn new(page_size: PageSize, output_path: impl Into<PathBuf>) -> Self {
        Self {
            page_size,
            output_path: output_path.into(),
        }
    }

    pub fn from_config(config: &FlyerConfig) -> Self {
        Self::new(config.page_size, config.document_path())
    }
}

impl DocumentExporter for PdfFlyerExporter {
    fn create_document(
        &self,
        title: &str,
        body: &str,
        image: &FlyerImage,
        contact: &str,
    ) -> Result<PdfDocument> {
        render_flyer(
            title,
            body,
            image,
            contact,
            self.page_size,
            OffsetDateTime::now_utc(),
        )
    }

    fn save_document(
        &self,
        title: &str,
        body: &str,
        image: &FlyerImage,
        contact: &str,
    ) -> Result<PathBuf> {
        let document = self.create_document(title, body, image, contact)?;
        let path = document.write_to(&self.output_path)?;
        log::info!("Saved flyer ({} bytes) to {}", document.len(), path.display());
        Ok(path)
    }
}

/// Compose and serialize a flyer page.
///
/// # Errors
///
/// Returns [`FlyerError::Pdf`] when content encoding or serialization fails.
pub fn render_flyer(
    title: &str,
    body: &str,
    image: &FlyerImage,
    contact: &str,
    page_size: PageSize,
    created_at: OffsetDateTime,
) -> Result<PdfDocument> {
    let layout = layout::compose(
        title,
        body,
        (image.width(), image.height()),
        contact,
        page_size,
    );
    if layout.dropped_title_lines > 0 {
        log::warn!(
            "Title too long for one page; dropped {} line(s)",
            layout.dropped_title_lines
        );
    }
    if layout.dropped_body_lines > 0 {
        log::warn!(
            "Body text too long for one page; dropped {} line(s)",
            layout.dropped_body_lines
        );
    }

    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let regular_id = add_font(&mut doc, Font::Helvetica);
    let bold_id = add_font(&mut doc, Font::HelveticaBold);
    let image_id = add_image(&mut doc, image)?;

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Helvetica.resource_name() => regular_id,
            Font::HelveticaBold.resource_name() => bold_id,
        },
        "XObject" => dictionary! {
            IMAGE_RESOURCE => image_id,
        },
    });

    let content = page_content(&layout).encode()?;
    let content_digest = sha256(&content);
    let content_id = doc.add_object(Stream::new(
        dictionary! { "Filter" => "FlateDecode" },
        deflate(&content)?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), layout.page_width.into(), layout.page_height.into()],
        "Contents" => content_id,
        "Resources" => resources_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(fonts::to_ascii(title.trim())),
        "Creator" => Object::string_literal(CREATOR),
        "Producer" => Object::string_literal(concat!("flyerbuilder ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(pdf_date(created_at)?),
    });

    let file_id = Object::String(content_digest[..16].to_vec(), StringFormat::Hexadecimal);
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(PdfDocument::new(bytes))
}

fn add_font(doc: &mut Document, font: Font) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Embed the picture as an 8-bit DeviceRGB XObject, with a soft mask when it has transparency.
fn add_image(doc: &mut Document, image: &FlyerImage) -> Result<ObjectId> {
    let pixels = image.pixels();
    let (width, height) = pixels.dimensions();

    let mut rgb = Vec::with_capacity(pixels.as_raw().len() / 4 * 3);
    let mut alpha = Vec::with_capacity(pixels.as_raw().len() / 4);
    for px in pixels.pixels() {
        rgb.extend_from_slice(&px.0[..3]);
        alpha.push(px.0[3]);
    }

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };

    if image.has_transparency() {
        let mask_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            deflate(&alpha)?,
        ));
        dict.set("SMask", mask_id);
    }

    Ok(doc.add_object(Stream::new(dict, deflate(&rgb)?)))
}

/// Translate the positioned layout into PDF drawing operators.
fn page_content(layout: &FlyerLayout) -> Content {
    let page_height = layout.page_height;
    let mut ops = Vec::new();

    ops.push(Operation::new("BT", vec![]));
    let mut current: Option<(Font, f32)> = None;
    for line in layout.title.iter().chain(layout.body.iter()) {
        if line.text.is_empty() {
            continue;
        }
        if current != Some((line.font, line.size)) {
            ops.push(Operation::new(
                "Tf",
                vec![line.font.resource_name().into(), line.size.into()],
            ));
            current = Some((line.font, line.size));
        }
        ops.push(Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                line.x.into(),
                (page_height - line.baseline).into(),
            ],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.text.as_str())],
        ));
    }
    ops.push(Operation::new("ET", vec![]));

    if let Some(rect) = layout.image {
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                (page_height - rect.bottom()).into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![IMAGE_RESOURCE.into()]));
        ops.push(Operation::new("Q", vec![]));
    }

    let strip = layout.tear_strip;
    let strip_top = page_height - strip.y;
    let strip_bottom = page_height - strip.bottom();
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("w", vec![CUT_LINE_WIDTH.into()]));
    ops.push(Operation::new(
        "d",
        vec![
            Object::Array(vec![CUT_LINE_DASH.into(), CUT_LINE_DASH.into()]),
            0.into(),
        ],
    ));
    ops.push(Operation::new("m", vec![strip.x.into(), strip_top.into()]));
    ops.push(Operation::new("l", vec![strip.right().into(), strip_top.into()]));
    for tab in layout.tear_offs.iter().skip(1) {
        ops.push(Operation::new("m", vec![tab.bounds.x.into(), strip_top.into()]));
        ops.push(Operation::new("l", vec![tab.bounds.x.into(), strip_bottom.into()]));
    }
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));

    let mut contact_font_set = false;
    ops.push(Operation::new("BT", vec![]));
    for line in layout.tear_offs.iter().flat_map(|tab| tab.lines.iter()) {
        if !contact_font_set {
            ops.push(Operation::new(
                "Tf",
                vec![Font::Helvetica.resource_name().into(), line.size.into()],
            ));
            contact_font_set = true;
        }
        // Rotate 90 degrees counter-clockwise so the text runs bottom-to-top.
        ops.push(Operation::new(
            "Tm",
            vec![
                0.into(),
                1.into(),
                (-1).into(),
                0.into(),
                line.baseline_x.into(),
                (page_height - line.start_y).into(),
            ],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.text.as_str())],
        ));
    }
    ops.push(Operation::new("ET", vec![]));

    Content { operations: ops }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Format a timestamp as a PDF date string (`D:YYYYMMDDHHmmSSZ`).
fn pdf_date(at: OffsetDateTime) -> Result<String> {
    let format = time::macros::format_description!("[year][month][day][hour][minute][second]");
    let utc = at.to_offset(time::UtcOffset::UTC);
    let stamp = utc
        .format(format)
        .map_err(|err| FlyerError::Pdf(format!("Failed to format creation date: {err}")))?;
    Ok(format!("D:{stamp}Z"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flyer::sample_image;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn fixed_time() -> OffsetDateTime {
        time::macros::datetime!(2025-03-14 15:09:26 UTC)
    }

    fn render(image: &FlyerImage) -> PdfDocument {
        render_flyer("Sale", "50% off", image, "555-1234", PageSize::Letter, fixed_time())
            .expect("rendered")
    }

    #[test]
    fn long_title_still_renders_one_page_with_contact_tabs() {
        let title = vec!["Garage sale this weekend"; 40].join(" ");
        let doc = render_flyer(
            &title,
            "Everything",
            &sample_image(30, 20),
            "555-1234",
            PageSize::Letter,
            fixed_time(),
        )
        .expect("rendered");

        assert_eq!(doc.page_count().unwrap(), 1);
        let parsed = Document::load_mem(doc.bytes()).unwrap();
        let (_, page_id) = parsed.get_pages().into_iter().next().unwrap();
        let text = String::from_utf8_lossy(&parsed.get_page_content(page_id).unwrap()).into_owned();
        assert_eq!(text.matches("(555-1234) Tj").count(), 8);
        assert!(text.contains("(Everything) Tj"));
    }

    #[test]
    fn renders_a_single_parsable_page() {
        let doc = render(&sample_image(40, 30));

        assert!(doc.bytes().starts_with(b"%PDF-1.7"));
        assert_eq!(doc.page_count().unwrap(), 1);
    }

    #[test]
    fn content_stream_contains_title_body_and_contact() {
        let doc = render(&sample_image(40, 30));
        let parsed = Document::load_mem(doc.bytes()).unwrap();
        let (_, page_id) = parsed.get_pages().into_iter().next().unwrap();
        let text = String::from_utf8_lossy(&parsed.get_page_content(page_id).unwrap()).into_owned();

        assert!(text.contains("(Sale) Tj"));
        assert!(text.contains("(50% off) Tj"));
        assert_eq!(text.matches("(555-1234) Tj").count(), 8);
        assert!(text.contains("/Im1 Do"));
    }

    #[test]
    fn info_dictionary_carries_title_and_creation_date() {
        let doc = render(&sample_image(2, 2));
        let parsed = Document::load_mem(doc.bytes()).unwrap();
        let info_ref = parsed.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = parsed.get_dictionary(info_ref).unwrap();

        assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Sale");
        assert_eq!(info.get(b"Creator").unwrap().as_str().unwrap(), b"Flyer Builder");
        assert_eq!(
            info.get(b"CreationDate").unwrap().as_str().unwrap(),
            b"D:20250314150926Z"
        );
    }

    #[test]
    fn opaque_images_have_no_soft_mask() {
        let doc = render(&sample_image(3, 3));
        let text = String::from_utf8_lossy(doc.bytes()).into_owned();
        assert!(!text.contains("/SMask"));
    }

    #[test]
    fn transparent_images_get_a_soft_mask() {
        let image = FlyerImage::from_rgba(RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 10])));
        let doc = render(&image);
        let text = String::from_utf8_lossy(doc.bytes()).into_owned();
        assert!(text.contains("/SMask"));
    }

    #[test]
    fn same_input_produces_same_bytes() {
        let image = sample_image(8, 8);
        assert_eq!(render(&image), render(&image));
    }

    #[test]
    fn non_ascii_text_is_transliterated() {
        let doc = render_flyer(
            "Café",
            "Grüße",
            &sample_image(1, 1),
            "☎ 555",
            PageSize::A4,
            fixed_time(),
        )
        .unwrap();
        let parsed = Document::load_mem(doc.bytes()).unwrap();
        let (_, page_id) = parsed.get_pages().into_iter().next().unwrap();
        let text = String::from_utf8_lossy(&parsed.get_page_content(page_id).unwrap()).into_owned();

        assert!(text.contains("(Cafe) Tj"));
        assert!(text.contains("(Grusse) Tj"));
    }

    #[test]
    fn save_document_writes_to_configured_path() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("docs/myCoolPDF.pdf");
        let exporter = PdfFlyerExporter::new(PageSize::Letter, &target);

        let path = exporter
            .save_document("Sale", "50% off", &sample_image(4, 4), "555-1234")
            .expect("saved");

        assert_eq!(path, target);
        assert!(std::fs::read(&target).unwrap().starts_with(b"%PDF-"));
    }

    #[test]
    fn pdf_date_normalizes_to_utc() {
        let at = time::macros::datetime!(2025-01-01 01:00:00 +02:00);
        assert_eq!(pdf_date(at).unwrap(), "D:20241231230000Z");
    }
}
