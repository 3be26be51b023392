// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Preview window drawing the composed page with the egui painter.

use std::f32::consts::FRAC_PI_2;

use eframe::egui;
use egui_phosphor::regular;

use crate::logic::layout::{FlyerLayout, Rect};
use crate::mvu::{Msg, PreviewModel};

use super::share_sheet::save_copy_dialog;

const PREVIEW_WIDTH: f32 = 420.0;

/// Render the preview window and return any messages triggered by user interaction.
pub fn view(
    ctx: &egui::Context,
    preview: &PreviewModel,
    texture: Option<&egui::TextureHandle>,
) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::Window::new("Preview")
        .collapsible(false)
        .resizable(false)
        .default_pos(egui::pos2(80.0, 60.0))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(620.0).show(ui, |ui| {
                draw_page(ui, &preview.layout, texture);
            });
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(format!(
                    "{} page(s), {} bytes",
                    preview.pages,
                    preview.document.len()
                ))
                .small()
                .color(egui::Color32::from_gray(110)),
            );
            if preview.layout.dropped_title_lines > 0 {
                ui.label(
                    egui::RichText::new(format!(
                        "{} Title is too long: {} line(s) were left out.",
                        regular::WARNING,
                        preview.layout.dropped_title_lines
                    ))
                    .color(egui::Color32::from_rgb(232, 89, 12)),
                );
            }
            if preview.layout.dropped_body_lines > 0 {
                ui.label(
                    egui::RichText::new(format!(
                        "{} Body text is too long: {} line(s) were left out.",
                        regular::WARNING,
                        preview.layout.dropped_body_lines
                    ))
                    .color(egui::Color32::from_rgb(232, 89, 12)),
                );
            }
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui
                    .button(format!("{} Save copy as…", regular::FLOPPY_DISK))
                    .clicked()
                {
                    msgs.push(save_copy_dialog(&preview.document, &preview.title));
                }
                if ui.button("Close").clicked() {
                    msgs.push(Msg::ClosePreview);
                }
            });
        });

    msgs
}

/// Paint the page scaled to [`PREVIEW_WIDTH`].
fn draw_page(ui: &mut egui::Ui, layout: &FlyerLayout, texture: Option<&egui::TextureHandle>) {
    let scale = PREVIEW_WIDTH / layout.page_width;
    let (response, painter) = ui.allocate_painter(
        egui::vec2(PREVIEW_WIDTH, layout.page_height * scale),
        egui::Sense::hover(),
    );
    let origin = response.rect.min;
    let to_screen = |x: f32, y: f32| origin + egui::vec2(x * scale, y * scale);
    let ink = egui::Color32::BLACK;

    painter.rect_filled(response.rect, 0.0, egui::Color32::WHITE);

    for line in layout.title.iter().chain(layout.body.iter()) {
        let top = line.baseline - line.size * 0.8;
        painter.text(
            to_screen(line.x, top),
            egui::Align2::LEFT_TOP,
            &line.text,
            egui::FontId::proportional(line.size * scale),
            ink,
        );
    }

    if let (Some(rect), Some(texture)) = (layout.image, texture) {
        painter.image(
            texture.id(),
            screen_rect(&rect, origin, scale),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(120));
    let strip = layout.tear_strip;
    let mut cut_lines = vec![[
        to_screen(strip.x, strip.y),
        to_screen(strip.right(), strip.y),
    ]];
    for tab in layout.tear_offs.iter().skip(1) {
        cut_lines.push([
            to_screen(tab.bounds.x, strip.y),
            to_screen(tab.bounds.x, strip.bottom()),
        ]);
    }
    for segment in cut_lines {
        painter.extend(egui::Shape::dashed_line(&segment, stroke, 4.0 * scale, 4.0 * scale));
    }

    for line in layout.tear_offs.iter().flat_map(|tab| tab.lines.iter()) {
        let galley = painter.layout_no_wrap(
            line.text.clone(),
            egui::FontId::proportional(line.size * scale),
            ink,
        );
        let pos = to_screen(line.baseline_x - line.size * 0.8, line.start_y);
        painter.add(egui::epaint::TextShape::new(pos, galley, ink).with_angle(-FRAC_PI_2));
    }
}

fn screen_rect(rect: &Rect, origin: egui::Pos2, scale: f32) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(rect.x * scale, rect.y * scale),
        egui::vec2(rect.width * scale, rect.height * scale),
    )
}
