// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel: form state, messages, and side-effect commands.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::FlyerConfig;
use crate::error::FlyerError;
use crate::logic::export::{DocumentExporter, request_export, request_preview};
use crate::logic::layout::{self, FlyerLayout, PageSize};
use crate::logic::pdf::PdfFlyerExporter;
use crate::models::{FlyerImage, FlyerInput, PdfDocument, ShareRequest, validate};
use crate::platform::{self, DesktopImagePicker, ImagePicker, ImageSource, StagingShare};
use crate::utils::ensure_extension;

/// Modal message with a single acknowledgement action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub action: String,
}

impl Alert {
    /// Shown whenever export or preview is attempted with an incomplete form.
    pub fn missing_information() -> Self {
        Self {
            title: "All Information Not Provided".into(),
            message: "You must supply all information to create a flyer.".into(),
            action: "OK".into(),
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action: "OK".into(),
        }
    }
}

/// Generated document routed to the in-app preview window.
#[derive(Clone, Debug)]
pub struct PreviewModel {
    pub document: PdfDocument,
    /// Title and picture the document was rendered from.
    pub title: String,
    pub image: FlyerImage,
    /// Same composition as the PDF, drawn by the preview widget.
    pub layout: FlyerLayout,
    pub pages: usize,
}

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Title, body, contact, and image entered by the user.
    pub flyer: FlyerInput,
    /// Whether the image well is shown (hidden until a picture was picked).
    pub image_visible: bool,
    /// "Select Photo" action sheet visibility.
    pub image_sheet_open: bool,
    /// Image sources the platform can serve.
    pub available_sources: Vec<ImageSource>,
    /// Last share hand-off, presented as the share sheet.
    pub share_sheet: Option<ShareRequest>,
    pub preview: Option<PreviewModel>,
    /// Modal alert currently presented.
    pub alert: Option<Alert>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

/// Application messages routed through the update function.
pub enum Msg {
    TitleChanged(String),
    BodyChanged(String),
    ContactChanged(String),
    SelectImageTouched,
    ImageSourceChosen(ImageSource),
    ImageSheetCancelled,
    ImagePicked(FlyerImage),
    ImagePickCancelled,
    ImageLoadFailed(String),
    ShareRequested,
    ShareReady(ShareRequest),
    PreviewRequested,
    PreviewReady(PreviewModel),
    ValidationFailed,
    ExportFailed(String),
    SaveCopyRequested { document: PdfDocument, path: PathBuf },
    SaveCopyCancelled,
    OpenDocument(PathBuf),
    RevealDocument(PathBuf),
    FileActionCompleted(Result<String, String>),
    CloseShareSheet,
    ClosePreview,
    DismissAlert,
}

/// Commands represent side-effects executed off the UI thread.
pub enum Command {
    PickImage(ImageSource),
    ExportAndShare(FlyerInput),
    Preview(FlyerInput),
    SaveCopy { document: PdfDocument, path: PathBuf },
    OpenPath(PathBuf),
    RevealPath(PathBuf),
}

/// Collaborators used by [`run_command`].
#[derive(Clone)]
pub struct Services {
    pub exporter: Arc<dyn DocumentExporter + Send + Sync>,
    pub picker: Arc<dyn ImagePicker>,
    /// Fixed location the share surface writes to.
    pub share_target: PathBuf,
    pub page_size: PageSize,
}

impl Services {
    pub fn from_config(config: &FlyerConfig) -> Self {
        Self {
            exporter: Arc::new(PdfFlyerExporter::from_config(config)),
            picker: Arc::new(DesktopImagePicker),
            share_target: config.document_path(),
            page_size: config.page_size,
        }
    }

    /// Sources the picker can serve right now.
    pub fn available_sources(&self) -> Vec<ImageSource> {
        ImageSource::ALL
            .into_iter()
            .filter(|source| self.picker.is_available(*source))
            .collect()
    }
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::TitleChanged(text) => model.flyer.title = text,
        Msg::BodyChanged(text) => model.flyer.body = text,
        Msg::ContactChanged(text) => model.flyer.contact = text,
        Msg::SelectImageTouched => model.image_sheet_open = true,
        Msg::ImageSheetCancelled => model.image_sheet_open = false,
        Msg::ImageSourceChosen(source) => {
            model.image_sheet_open = false;
            if model.available_sources.contains(&source) {
                cmds.push(Command::PickImage(source));
            } else {
                log::debug!("Image source {:?} unavailable; ignoring", source);
            }
        }
        Msg::ImagePicked(image) => {
            model.flyer.image = Some(image);
            model.image_visible = true;
        }
        Msg::ImagePickCancelled => {}
        Msg::ImageLoadFailed(err) => surface_event(model, format!("Could not load photo: {err}"), false),
        Msg::ShareRequested => {
            if let Some(snapshot) = gate(model) {
                cmds.push(Command::ExportAndShare(snapshot));
            }
        }
        Msg::PreviewRequested => {
            if let Some(snapshot) = gate(model) {
                cmds.push(Command::Preview(snapshot));
            }
        }
        Msg::ShareReady(request) => {
            let message = match &request.path {
                Some(path) => format!("Flyer ready to share: {}", path.display()),
                None => "Flyer ready to share".to_string(),
            };
            model.share_sheet = Some(request);
            surface_event(model, message, false);
        }
        Msg::PreviewReady(preview) => model.preview = Some(preview),
        Msg::ValidationFailed => model.alert = Some(Alert::missing_information()),
        Msg::ExportFailed(err) => {
            model.alert = Some(Alert::failure("Failed to create flyer", err.clone()));
            model.status = Some(format!("Failed to create flyer: {err}"));
        }
        Msg::SaveCopyRequested { document, path } => cmds.push(Command::SaveCopy {
            document,
            path: ensure_extension(path, "pdf"),
        }),
        Msg::SaveCopyCancelled => surface_event(model, "Save cancelled.".to_string(), false),
        Msg::OpenDocument(path) => cmds.push(Command::OpenPath(path)),
        Msg::RevealDocument(path) => cmds.push(Command::RevealPath(path)),
        Msg::FileActionCompleted(result) => match result {
            Ok(message) => surface_event(model, message, false),
            Err(err) => surface_event(model, err, true),
        },
        Msg::CloseShareSheet => model.share_sheet = None,
        Msg::ClosePreview => model.preview = None,
        Msg::DismissAlert => model.alert = None,
    }
}

/// Execute a command and return the resulting message.
pub fn run_command(cmd: Command, services: &Services) -> Msg {
    match cmd {
        Command::PickImage(source) => match services.picker.pick(source) {
            Some(path) => match platform::load_picked_image(&path) {
                Ok(image) => Msg::ImagePicked(image),
                Err(err) => {
                    log::warn!("{err}");
                    Msg::ImageLoadFailed(err.to_string())
                }
            },
            None => Msg::ImagePickCancelled,
        },
        Command::ExportAndShare(input) => {
            let mut share = StagingShare::new(&services.share_target);
            match request_export(&input, services.exporter.as_ref(), &mut share) {
                Ok(()) => match share.into_request() {
                    Some(request) => Msg::ShareReady(request),
                    None => Msg::ExportFailed("No document was handed to the share sheet".into()),
                },
                Err(err) => export_failure(err),
            }
        }
        Command::Preview(input) => {
            let mut slot: Option<PdfDocument> = None;
            if let Err(err) = request_preview(&input, services.exporter.as_ref(), &mut slot) {
                return export_failure(err);
            }
            let Some(document) = slot else {
                return Msg::ExportFailed("No document was handed to the preview".into());
            };
            match build_preview(&input, document, services.page_size) {
                Ok(preview) => Msg::PreviewReady(preview),
                Err(err) => export_failure(err),
            }
        }
        Command::SaveCopy { document, path } => {
            let result = document
                .write_to(&path)
                .map(|p| format!("Saved copy to {}", p.display()))
                .map_err(|err| format!("Failed to save copy:\n\n{err}"));
            Msg::FileActionCompleted(result)
        }
        Command::OpenPath(path) => Msg::FileActionCompleted(
            platform::open_path(&path)
                .map(|_| format!("Opened {}", path.display()))
                .map_err(|err| format!("{err:#}")),
        ),
        Command::RevealPath(path) => Msg::FileActionCompleted(
            platform::reveal_path(&path)
                .map(|_| format!("Showing {}", path.display()))
                .map_err(|err| format!("{err:#}")),
        ),
    }
}

/// Validation gate shared by share and preview; raises the alert and returns a snapshot.
fn gate(model: &mut AppModel) -> Option<FlyerInput> {
    if validate(&model.flyer) {
        Some(model.flyer.clone())
    } else {
        model.alert = Some(Alert::missing_information());
        None
    }
}

fn build_preview(
    input: &FlyerInput,
    document: PdfDocument,
    page_size: PageSize,
) -> Result<PreviewModel, FlyerError> {
    let fields = input.fields()?;
    let pages = document.page_count()?;
    let layout = layout::compose(
        fields.title,
        fields.body,
        (fields.image.width(), fields.image.height()),
        fields.contact,
        page_size,
    );
    Ok(PreviewModel {
        document,
        title: fields.title.to_string(),
        image: fields.image.clone(),
        layout,
        pages,
    })
}

fn export_failure(err: FlyerError) -> Msg {
    if err.is_missing_field() {
        Msg::ValidationFailed
    } else {
        log::error!("Flyer export failed: {err}");
        Msg::ExportFailed(err.to_string())
    }
}

/// Update status/alert fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.alert = Some(Alert::failure("Error", message.clone()));
    }
    model.status = Some(message);
}
