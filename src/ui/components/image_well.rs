// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Image well with its "Select Photo" action sheet.

use eframe::egui;

use crate::models::FlyerImage;
use crate::mvu::Msg;
use crate::platform::ImageSource;

/// Longest edge of the texture uploaded for the well and the preview.
const TEXTURE_MAX: u32 = 512;
const WELL_MAX_HEIGHT: f32 = 240.0;

/// Downscale the picture into an egui texture image, keeping the aspect ratio.
pub fn texture_image(image: &FlyerImage) -> egui::ColorImage {
    let (width, height) = (image.width(), image.height());
    let scale = (TEXTURE_MAX as f32 / width.max(height).max(1) as f32).min(1.0);
    let resized = if scale < 1.0 {
        let w = ((width as f32 * scale).round() as u32).max(1);
        let h = ((height as f32 * scale).round() as u32).max(1);
        image::imageops::thumbnail(image.pixels(), w, h)
    } else {
        image.pixels().clone()
    };
    let size = [resized.width() as usize, resized.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, resized.as_raw())
}

/// Render the select button and, once a picture was picked, the picture itself.
pub fn view(
    ui: &mut egui::Ui,
    image: Option<&FlyerImage>,
    visible: bool,
    texture: Option<&egui::TextureHandle>,
) -> Vec<Msg> {
    let mut msgs = Vec::new();

    ui.label("Image");
    ui.add_space(4.0);
    if ui
        .button(format!("{} Select Photo", egui_phosphor::regular::IMAGE))
        .clicked()
    {
        msgs.push(Msg::SelectImageTouched);
    }

    if visible && let Some(texture) = texture {
        ui.add_space(6.0);
        let size = texture.size_vec2();
        let scale = (ui.available_width() / size.x)
            .min(WELL_MAX_HEIGHT / size.y)
            .min(1.0);
        let response = ui.add(egui::Image::new((texture.id(), size * scale)));
        if let Some(source) = image.and_then(FlyerImage::source) {
            response.on_hover_text(source.display().to_string());
        }
    }

    msgs
}

/// Modal choice between the image sources; unavailable sources are still offered.
pub fn action_sheet(ctx: &egui::Context) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::Window::new("Select Photo")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .show(ctx, |ui| {
            ui.label("Where do you want to select a photo?");
            ui.add_space(8.0);
            for source in ImageSource::ALL {
                let icon = match source {
                    ImageSource::PhotoLibrary => egui_phosphor::regular::IMAGES,
                    ImageSource::Camera => egui_phosphor::regular::CAMERA,
                };
                let button = egui::Button::new(format!("{icon} {}", source.label()))
                    .min_size(egui::vec2(220.0, 0.0));
                if ui.add(button).clicked() {
                    msgs.push(Msg::ImageSourceChosen(source));
                }
            }
            ui.separator();
            if ui
                .add(egui::Button::new("Cancel").min_size(egui::vec2(220.0, 0.0)))
                .clicked()
            {
                msgs.push(Msg::ImageSheetCancelled);
            }
        });

    msgs
}

#[cfg(test)]
mod tests {
    use super::texture_image;
    use crate::models::FlyerImage;
    use image::{Rgba, RgbaImage};

    #[test]
    fn small_images_keep_their_size() {
        let image = FlyerImage::from_rgba(RgbaImage::from_pixel(10, 12, Rgba([0, 255, 0, 255])));
        let tex = texture_image(&image);
        assert_eq!(tex.size, [10, 12]);
    }

    // Large pictures are bounded while keeping the aspect ratio.
    #[test]
    fn large_images_are_downscaled() {
        let image = FlyerImage::from_rgba(RgbaImage::from_pixel(2048, 1024, Rgba([0, 0, 0, 255])));
        let tex = texture_image(&image);
        assert_eq!(tex.size, [512, 256]);
    }
}
