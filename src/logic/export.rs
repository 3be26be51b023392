// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Export and preview gate: validate the form, call the document exporter once, hand off the result.

use std::path::PathBuf;

use crate::error::Result;
use crate::models::{FlyerImage, FlyerInput, PdfDocument, ShareRequest};

/// Caption shared next to the generated file.
pub const SHARE_CAPTION: &str = "This is my body content";
/// Subject line attached to the share hand-off.
pub const SHARE_SUBJECT: &str = "This is my title";

/// Turns the four flyer fields into PDF bytes.
pub trait DocumentExporter {
    /// Render a single page from the given fields. Must not mutate its inputs.
    fn create_document(
        &self,
        title: &str,
        body: &str,
        image: &FlyerImage,
        contact: &str,
    ) -> Result<PdfDocument>;

    /// Render and persist to the exporter's own output location.
    fn save_document(
        &self,
        title: &str,
        body: &str,
        image: &FlyerImage,
        contact: &str,
    ) -> Result<PathBuf>;
}

/// Receives a generated document for sharing.
pub trait ShareSurface {
    fn share(&mut self, request: ShareRequest) -> Result<()>;
}

/// Receives a generated document for in-app preview.
pub trait PreviewSurface {
    fn preview(&mut self, document: PdfDocument) -> Result<()>;
}

impl PreviewSurface for Option<PdfDocument> {
    fn preview(&mut self, document: PdfDocument) -> Result<()> {
        *self = Some(document);
        Ok(())
    }
}

/// Validate, export exactly once, and pass the document with caption/subject to `share`.
///
/// # Errors
///
/// Returns [`crate::error::FlyerError::MissingField`] without touching the exporter when any
/// field is absent; otherwise propagates exporter or share failures.
pub fn request_export<E, S>(input: &FlyerInput, exporter: &E, share: &mut S) -> Result<()>
where
    E: DocumentExporter + ?Sized,
    S: ShareSurface + ?Sized,
{
    let fields = input.fields()?;
    let document =
        exporter.create_document(fields.title, fields.body, fields.image, fields.contact)?;
    log::info!("Generated flyer for sharing ({} bytes)", document.len());
    share.share(ShareRequest::new(document, SHARE_CAPTION, SHARE_SUBJECT))
}

/// Validate, export exactly once, and route the bytes to `preview`.
pub fn request_preview<E, P>(input: &FlyerInput, exporter: &E, preview: &mut P) -> Result<()>
where
    E: DocumentExporter + ?Sized,
    P: PreviewSurface + ?Sized,
{
    let fields = input.fields()?;
    let document =
        exporter.create_document(fields.title, fields.body, fields.image, fields.contact)?;
    log::info!("Generated flyer for preview ({} bytes)", document.len());
    preview.preview(document)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Capture the request without writing anything.
    impl ShareSurface for Option<ShareRequest> {
        fn share(&mut self, request: ShareRequest) -> Result<()> {
            *self = Some(request);
            Ok(())
        }
    }

    /// Records every call and returns a tiny fake PDF.
    #[derive(Default)]
    pub struct RecordingExporter {
        pub calls: Mutex<Vec<(String, String, FlyerImage, String)>>,
    }

    impl RecordingExporter {
        pub fn call_count(&self) -> usize {
            self.calls.lock().map(|c| c.len()).unwrap_or_default()
        }
    }

    impl DocumentExporter for RecordingExporter {
        fn create_document(
            &self,
            title: &str,
            body: &str,
            image: &FlyerImage,
            contact: &str,
        ) -> Result<PdfDocument> {
            self.calls.lock().unwrap().push((
                title.to_string(),
                body.to_string(),
                image.clone(),
                contact.to_string(),
            ));
            Ok(PdfDocument::new(b"%PDF-1.7 fake".to_vec()))
        }

        fn save_document(
            &self,
            title: &str,
            body: &str,
            image: &FlyerImage,
            contact: &str,
        ) -> Result<PathBuf> {
            self.create_document(title, body, image, contact)?;
            Ok(PathBuf::from("fake.pdf"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingExporter;
    use super::*;
    use crate::error::FlyerError;
    use crate::logic::layout::PageSize;
    use crate::logic::pdf::PdfFlyerExporter;
    use crate::models::flyer::sample_image;

    fn sale() -> FlyerInput {
        FlyerInput::new("Sale", "50% off", "555-1234", Some(sample_image(16, 9)))
    }

    #[test]
    fn export_invokes_exporter_once_with_exact_fields() {
        let exporter = RecordingExporter::default();
        let mut shared: Option<ShareRequest> = None;
        let input = sale();

        request_export(&input, &exporter, &mut shared).expect("exported");

        let calls = exporter.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (title, body, image, contact) = &calls[0];
        assert_eq!(title, "Sale");
        assert_eq!(body, "50% off");
        assert_eq!(contact, "555-1234");
        assert_eq!(Some(image), input.image.as_ref());
    }

    #[test]
    fn export_hands_placeholder_caption_and_subject_to_share() {
        let exporter = PdfFlyerExporter::new(PageSize::Letter, "unused.pdf");
        let mut shared: Option<ShareRequest> = None;

        request_export(&sale(), &exporter, &mut shared).expect("exported");

        let request = shared.expect("shared");
        assert!(!request.document.is_empty());
        assert!(request.document.bytes().starts_with(b"%PDF-"));
        assert_eq!(request.caption, "This is my body content");
        assert_eq!(request.subject, "This is my title");
        assert!(request.path.is_none());
    }

    #[test]
    fn export_with_empty_title_never_calls_exporter() {
        let exporter = RecordingExporter::default();
        let mut shared: Option<ShareRequest> = None;
        let input = FlyerInput::new("", "x", "y", Some(sample_image(2, 2)));

        let err = request_export(&input, &exporter, &mut shared).unwrap_err();

        assert!(matches!(err, FlyerError::MissingField));
        assert_eq!(exporter.call_count(), 0);
        assert!(shared.is_none());
    }

    #[test]
    fn export_with_whitespace_title_still_calls_exporter() {
        let exporter = RecordingExporter::default();
        let mut shared: Option<ShareRequest> = None;
        let input = FlyerInput::new(" ", "x", "y", Some(sample_image(2, 2)));

        request_export(&input, &exporter, &mut shared).expect("exported");

        assert_eq!(exporter.call_count(), 1);
        assert_eq!(exporter.calls.lock().unwrap()[0].0, " ");
        assert!(shared.is_some());
    }

    #[test]
    fn preview_routes_bytes_to_preview_surface() {
        let exporter = RecordingExporter::default();
        let mut previewed: Option<PdfDocument> = None;

        request_preview(&sale(), &exporter, &mut previewed).expect("previewed");

        assert_eq!(exporter.call_count(), 1);
        assert_eq!(previewed.unwrap().bytes(), b"%PDF-1.7 fake");
    }

    #[test]
    fn preview_without_image_is_rejected() {
        let exporter = RecordingExporter::default();
        let mut previewed: Option<PdfDocument> = None;
        let input = FlyerInput::new("Sale", "50% off", "555-1234", None);

        let err = request_preview(&input, &exporter, &mut previewed).unwrap_err();

        assert!(err.is_missing_field());
        assert_eq!(exporter.call_count(), 0);
        assert!(previewed.is_none());
    }

    #[test]
    fn exporter_works_through_trait_objects() {
        let exporter: Box<dyn DocumentExporter> = Box::new(RecordingExporter::default());
        let mut shared: Option<ShareRequest> = None;
        let share: &mut dyn ShareSurface = &mut shared;

        request_export(&sale(), exporter.as_ref(), share).expect("exported");

        assert!(shared.is_some());
    }
}
