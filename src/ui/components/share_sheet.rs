// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! In-app share sheet presenting the generated document with its caption and subject.

use eframe::egui;
use egui_phosphor::regular;

use crate::models::{PdfDocument, ShareRequest};
use crate::mvu::Msg;
use crate::utils::{ensure_extension, suggested_document_name};

/// Render the share sheet and return any messages triggered by user interaction.
pub fn view(ctx: &egui::Context, request: &ShareRequest, title: &str) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::Window::new("Share Flyer")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Grid::new("share_grid")
                .num_columns(2)
                .spacing(egui::vec2(8.0, 6.0))
                .show(ui, |ui| {
                    ui.label("Subject");
                    ui.label(&request.subject);
                    ui.end_row();

                    ui.label("Message");
                    ui.label(&request.caption);
                    ui.end_row();

                    ui.label("Attachment");
                    let name = request
                        .path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(not written)".into());
                    ui.label(name);
                    ui.end_row();

                    ui.label("Size");
                    ui.label(format_bytes(request.document.len()));
                    ui.end_row();
                });

            ui.label(
                egui::RichText::new(format!("sha256 {}", request.document.fingerprint()))
                    .small()
                    .color(egui::Color32::from_gray(110)),
            );
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if let Some(path) = &request.path {
                    if ui
                        .button(format!("{} Open", regular::ARROW_SQUARE_OUT))
                        .clicked()
                    {
                        msgs.push(Msg::OpenDocument(path.clone()));
                    }
                    if ui
                        .button(format!("{} Show in folder", regular::FOLDER_OPEN))
                        .clicked()
                    {
                        msgs.push(Msg::RevealDocument(path.clone()));
                    }
                }
                if ui
                    .button(format!("{} Save copy as…", regular::FLOPPY_DISK))
                    .clicked()
                {
                    msgs.push(save_copy_dialog(&request.document, title));
                }
                if ui.button("Close").clicked() {
                    msgs.push(Msg::CloseShareSheet);
                }
            });
        });

    msgs
}

/// Ask for a destination with the native save dialog.
pub fn save_copy_dialog(document: &PdfDocument, title: &str) -> Msg {
    let dialog = rfd::FileDialog::new()
        .set_title("Save flyer")
        .add_filter("PDF document", &["pdf"])
        .set_file_name(suggested_document_name(title));

    match dialog.save_file() {
        Some(path) => Msg::SaveCopyRequested {
            document: document.clone(),
            path: ensure_extension(path, "pdf"),
        },
        None => Msg::SaveCopyCancelled,
    }
}

/// Human-readable formatting for byte sizes with binary units.
fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["B", "KB", "MB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::format_bytes;

    #[test]
    fn format_bytes_uses_binary_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
