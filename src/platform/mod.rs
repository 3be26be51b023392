// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Desktop stand-ins for the platform services: image acquisition, share staging, file launching.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::error::{self, FlyerError};
use crate::logic::export::ShareSurface;
use crate::models::{FlyerImage, ShareRequest};

/// Raster formats the image well accepts.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp",
];

/// Where a picture can be acquired from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageSource {
    PhotoLibrary,
    Camera,
}

impl ImageSource {
    pub const ALL: [ImageSource; 2] = [ImageSource::PhotoLibrary, ImageSource::Camera];

    /// Action sheet button label.
    pub fn label(self) -> &'static str {
        match self {
            ImageSource::PhotoLibrary => "Photos",
            ImageSource::Camera => "Camera",
        }
    }
}

/// Platform image acquisition.
pub trait ImagePicker: Send + Sync {
    fn is_available(&self, source: ImageSource) -> bool;

    /// Block until the user picked a file or cancelled.
    fn pick(&self, source: ImageSource) -> Option<PathBuf>;
}

/// Native file dialog for the library; no capture device on desktop.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopImagePicker;

impl ImagePicker for DesktopImagePicker {
    fn is_available(&self, source: ImageSource) -> bool {
        matches!(source, ImageSource::PhotoLibrary)
    }

    fn pick(&self, source: ImageSource) -> Option<PathBuf> {
        match source {
            ImageSource::PhotoLibrary => rfd::FileDialog::new()
                .set_title("Select Photo")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file(),
            ImageSource::Camera => None,
        }
    }
}

/// Decode a picked file, rejecting paths whose extension is not an image type.
pub fn load_picked_image(path: &Path) -> error::Result<FlyerImage> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(FlyerError::ImageDecode {
            path: path.to_path_buf(),
            reason: format!("unsupported file type {}", mime.essence_str()),
        });
    }
    FlyerImage::load(path)
}

/// Share surface that writes the document to the fixed shared file before presenting it.
pub struct StagingShare {
    target: PathBuf,
    staged: Option<ShareRequest>,
}

impl StagingShare {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            staged: None,
        }
    }

    /// The persisted request, once sharing happened.
    pub fn into_request(self) -> Option<ShareRequest> {
        self.staged
    }
}

impl ShareSurface for StagingShare {
    fn share(&mut self, request: ShareRequest) -> error::Result<()> {
        let request = request.persist(&self.target)?;
        log::info!("Staged shared document at {}", self.target.display());
        self.staged = Some(request);
        Ok(())
    }
}

/// Open a file with the system's default handler.
pub fn open_path(path: &Path) -> Result<()> {
    open::that(path).with_context(|| format!("Failed to open {}", path.display()))
}

/// Open the directory containing `path` in the system file manager.
pub fn reveal_path(path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", path.display()))?;
    open::that(dir).with_context(|| format!("Failed to open folder {}", dir.display()))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Picker returning preset paths and recording which sources were asked for.
    pub struct FakePicker {
        pub camera_available: bool,
        pub result: Option<PathBuf>,
        pub picked: Mutex<Vec<ImageSource>>,
    }

    impl FakePicker {
        pub fn returning(result: Option<PathBuf>) -> Self {
            Self {
                camera_available: false,
                result,
                picked: Mutex::new(Vec::new()),
            }
        }
    }

    impl ImagePicker for FakePicker {
        fn is_available(&self, source: ImageSource) -> bool {
            match source {
                ImageSource::PhotoLibrary => true,
                ImageSource::Camera => self.camera_available,
            }
        }

        fn pick(&self, source: ImageSource) -> Option<PathBuf> {
            self.picked.lock().unwrap().push(source);
            self.result.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PdfDocument;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn desktop_has_library_but_no_camera() {
        let picker = DesktopImagePicker;
        assert!(picker.is_available(ImageSource::PhotoLibrary));
        assert!(!picker.is_available(ImageSource::Camera));
        assert_eq!(picker.pick(ImageSource::Camera), None);
    }

    #[test]
    fn load_picked_image_decodes_png() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.png");
        RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])).save(&path).unwrap();

        let image = load_picked_image(&path).expect("loaded");

        assert_eq!((image.width(), image.height()), (3, 2));
    }

    #[test]
    fn load_picked_image_rejects_non_image_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = load_picked_image(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported file type text/plain"));
    }

    #[test]
    fn staging_share_persists_to_target() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("myCoolPDF.pdf");
        let mut share = StagingShare::new(&target);

        share
            .share(ShareRequest::new(
                PdfDocument::new(b"%PDF-1.7".to_vec()),
                "caption",
                "subject",
            ))
            .expect("shared");

        let request = share.into_request().expect("staged");
        assert_eq!(request.path.as_deref(), Some(target.as_path()));
        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn action_sheet_labels() {
        let labels: Vec<_> = ImageSource::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Photos", "Camera"]);
    }
}
